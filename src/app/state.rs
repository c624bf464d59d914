//! Resident list state.
//!
//! Three display fields (collection, loading flag, error message) plus the
//! set of rows with a delete request in flight. All mutation goes through
//! the load and delete transitions below.

use std::collections::HashSet;

use crate::app::ResidentsError;
use crate::domain::{Resident, ResidentId};
use crate::services::ApiError;

/// Inline message shown when the collection cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load resident data. Please try again later.";

/// Alert raised when a delete request fails.
pub const DELETE_FAILURE_MESSAGE: &str = "Error deleting resident.";

/// Question asked before any delete request is sent.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this resident?";

/// What the view shows below the title, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewBody<'a> {
    /// Initial fetch outstanding.
    Loading,
    /// Fetch failed.
    Error(&'a str),
    /// Fetch succeeded with no records.
    Empty,
    /// One row per resident, backend order.
    Table(&'a [Resident]),
}

/// Why a delete cannot start for a given row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeleteRejected {
    #[error("resident {0} is not in the list")]
    UnknownResident(ResidentId),
    #[error("a delete for resident {0} is already in flight")]
    InFlight(ResidentId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentsListState {
    residents: Vec<Resident>,
    loading: bool,
    error: Option<String>,
    pending_deletes: HashSet<ResidentId>,
}

impl Default for ResidentsListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ResidentsListState {
    /// A freshly mounted view: loading, nothing fetched yet.
    pub fn new() -> Self {
        Self {
            residents: Vec::new(),
            loading: true,
            error: None,
            pending_deletes: HashSet::new(),
        }
    }

    pub fn residents(&self) -> &[Resident] {
        &self.residents
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the delete control for `id` should be disabled.
    pub fn is_delete_pending(&self, id: ResidentId) -> bool {
        self.pending_deletes.contains(&id)
    }

    pub fn body(&self) -> ViewBody<'_> {
        if self.loading {
            ViewBody::Loading
        } else if let Some(error) = &self.error {
            ViewBody::Error(error)
        } else if self.residents.is_empty() {
            ViewBody::Empty
        } else {
            ViewBody::Table(&self.residents)
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Clear the loading flag without touching anything else.
    pub(crate) fn end_load(&mut self) {
        self.loading = false;
    }

    /// Apply the outcome of the collection fetch. Always clears `loading`.
    pub fn finish_load(
        &mut self,
        result: Result<Vec<Resident>, ApiError>,
    ) -> Result<usize, ResidentsError> {
        self.end_load();
        match result {
            Ok(residents) => {
                self.residents = residents;
                self.error = None;
                Ok(self.residents.len())
            }
            Err(source) => {
                self.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                Err(ResidentsError::Load { source })
            }
        }
    }

    /// Check that a delete could start for `id`, without marking it.
    pub fn check_delete(&self, id: ResidentId) -> Result<(), DeleteRejected> {
        if !self.residents.iter().any(|r| r.id == id) {
            return Err(DeleteRejected::UnknownResident(id));
        }
        if self.pending_deletes.contains(&id) {
            return Err(DeleteRejected::InFlight(id));
        }
        Ok(())
    }

    /// Mark `id` as having a delete request in flight.
    pub fn begin_delete(&mut self, id: ResidentId) -> Result<(), DeleteRejected> {
        self.check_delete(id)?;
        self.pending_deletes.insert(id);
        Ok(())
    }

    /// Apply the outcome of a delete request.
    ///
    /// On success exactly the row with `id` is removed; on failure the
    /// collection is left as it was.
    pub fn finish_delete(
        &mut self,
        id: ResidentId,
        result: Result<(), ApiError>,
    ) -> Result<(), ResidentsError> {
        self.pending_deletes.remove(&id);
        match result {
            Ok(()) => {
                self.residents.retain(|r| r.id != id);
                Ok(())
            }
            Err(source) => Err(ResidentsError::Delete { id, source }),
        }
    }

    /// Drop the in-flight mark for a request whose response will never be applied.
    pub fn abandon_delete(&mut self, id: ResidentId) {
        self.pending_deletes.remove(&id);
    }
}
