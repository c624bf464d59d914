//! Modal prompt bookkeeping for the windowed front end.
//!
//! The terminal asks and answers inside [`ResidentsListView::delete`]; a
//! window instead shows a modal and gets the answer in a later click. This
//! tracks which modal is up so a click that lands while one is open cannot
//! start another delete.
//!
//! [`ResidentsListView::delete`]: crate::app::ResidentsListView::delete

use std::collections::VecDeque;

use crate::app::state::{DeleteRejected, ResidentsListState, DELETE_CONFIRMATION};
use crate::app::ResidentsError;
use crate::domain::ResidentId;
use crate::services::ApiError;

/// The modal currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt<'a> {
    ConfirmDelete { id: ResidentId, message: &'a str },
    Alert(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PromptRejected {
    #[error("another prompt is open")]
    Busy,
    #[error("no delete is awaiting confirmation")]
    NothingToConfirm,
    #[error(transparent)]
    Delete(#[from] DeleteRejected),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    confirming: Option<ResidentId>,
    alerts: VecDeque<String>,
}

impl PromptState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.confirming.is_some() || !self.alerts.is_empty()
    }

    /// Alerts are shown ahead of a pending confirmation.
    pub fn current(&self) -> Option<Prompt<'_>> {
        if let Some(message) = self.alerts.front() {
            return Some(Prompt::Alert(message));
        }
        self.confirming.map(|id| Prompt::ConfirmDelete {
            id,
            message: DELETE_CONFIRMATION,
        })
    }

    /// Open the delete confirmation for `id`.
    pub fn request_delete(
        &mut self,
        state: &ResidentsListState,
        id: ResidentId,
    ) -> Result<(), PromptRejected> {
        if self.is_open() {
            return Err(PromptRejected::Busy);
        }
        state.check_delete(id)?;
        self.confirming = Some(id);
        Ok(())
    }

    /// Close the confirmation without sending anything.
    pub fn cancel(&mut self) -> Option<ResidentId> {
        self.confirming.take()
    }

    /// Close the confirmation and mark its row in flight. The caller sends
    /// the request for the returned id.
    pub fn confirm(&mut self, state: &mut ResidentsListState) -> Result<ResidentId, PromptRejected> {
        let id = self
            .confirming
            .take()
            .ok_or(PromptRejected::NothingToConfirm)?;
        state.begin_delete(id)?;
        Ok(id)
    }

    /// Apply a delete response, queueing the failure alert if it failed.
    pub fn finish_delete(
        &mut self,
        state: &mut ResidentsListState,
        id: ResidentId,
        result: Result<(), ApiError>,
    ) -> Result<(), ResidentsError> {
        state.finish_delete(id, result).inspect_err(|e| {
            self.alerts.push_back(e.user_message().to_string());
        })
    }

    pub fn dismiss_alert(&mut self) -> Option<String> {
        self.alerts.pop_front()
    }
}
