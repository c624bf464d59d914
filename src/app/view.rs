//! The resident list view driver.
//!
//! [`ResidentsListView`] owns one mount of the list: it loads the collection
//! once, runs confirmed deletes against the backend, and stops applying
//! responses once torn down.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::app::dialogs::Dialogs;
use crate::app::state::{DeleteRejected, ResidentsListState, DELETE_CONFIRMATION};
use crate::domain::ResidentId;
use crate::services::ResidentsApi;

/// Result of [`ResidentsListView::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Collection replaced with this many records.
    Loaded(usize),
    /// Fetch failed; the inline error is showing.
    Failed,
    /// This mount already ran its load.
    AlreadyLoaded,
    /// The view was torn down before the response arrived.
    Abandoned,
}

/// Result of [`ResidentsListView::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// User declined the confirmation; nothing was sent.
    Declined,
    /// Backend refused or was unreachable; the alert was raised.
    Failed,
    /// No such row in the list; nothing was sent.
    NotFound,
    /// A delete for this row is still running; nothing was sent.
    InFlight,
    /// The view was torn down; any response is ignored.
    Abandoned,
}

impl From<DeleteRejected> for DeleteOutcome {
    fn from(rejected: DeleteRejected) -> Self {
        match rejected {
            DeleteRejected::UnknownResident(_) => DeleteOutcome::NotFound,
            DeleteRejected::InFlight(_) => DeleteOutcome::InFlight,
        }
    }
}

/// Clears the loading flag on every exit path of a load attempt.
struct LoadingGuard<'a> {
    state: &'a mut ResidentsListState,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a mut ResidentsListState) -> Self {
        state.begin_load();
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.end_load();
    }
}

pub struct ResidentsListView {
    state: ResidentsListState,
    api: Arc<dyn ResidentsApi>,
    teardown: CancellationToken,
    load_started: bool,
}

impl ResidentsListView {
    /// Mount a new view. Nothing is fetched until [`load`](Self::load).
    pub fn new(api: Arc<dyn ResidentsApi>) -> Self {
        Self {
            state: ResidentsListState::new(),
            api,
            teardown: CancellationToken::new(),
            load_started: false,
        }
    }

    pub fn state(&self) -> &ResidentsListState {
        &self.state
    }

    /// Token cancelled by [`teardown`](Self::teardown); clone it to tear the
    /// view down from elsewhere while a request is running.
    pub fn teardown_token(&self) -> CancellationToken {
        self.teardown.clone()
    }

    pub fn teardown(&self) {
        tracing::debug!(event = "residents.view.teardown");
        self.teardown.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.teardown.is_cancelled()
    }

    /// Fetch the collection. Runs at most once per mount.
    pub async fn load(&mut self) -> LoadOutcome {
        if self.load_started {
            tracing::warn!(event = "residents.load.skipped", reason = "already_loaded");
            return LoadOutcome::AlreadyLoaded;
        }
        self.load_started = true;

        let guard = LoadingGuard::begin(&mut self.state);
        tracing::info!(event = "residents.load.started");

        let result = tokio::select! {
            biased;
            _ = self.teardown.cancelled() => {
                tracing::debug!(event = "residents.load.abandoned");
                return LoadOutcome::Abandoned;
            }
            result = self.api.list_residents() => result,
        };

        match guard.state.finish_load(result) {
            Ok(count) => {
                tracing::info!(event = "residents.load.completed", count);
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                tracing::error!(event = "residents.load.failed", error = %e);
                LoadOutcome::Failed
            }
        }
    }

    /// Delete one resident after the user confirms.
    ///
    /// The row is removed only once the backend reports success.
    pub async fn delete(&mut self, id: ResidentId, dialogs: &dyn Dialogs) -> DeleteOutcome {
        if let Err(rejected) = self.state.check_delete(id) {
            tracing::warn!(event = "residents.delete.rejected", id = %id, reason = %rejected);
            return rejected.into();
        }

        if !dialogs.confirm(DELETE_CONFIRMATION) {
            tracing::info!(event = "residents.delete.declined", id = %id);
            return DeleteOutcome::Declined;
        }

        if self.is_torn_down() {
            return DeleteOutcome::Abandoned;
        }
        if let Err(rejected) = self.state.begin_delete(id) {
            return rejected.into();
        }
        tracing::info!(event = "residents.delete.started", id = %id);

        let result = tokio::select! {
            biased;
            _ = self.teardown.cancelled() => {
                tracing::debug!(event = "residents.delete.abandoned", id = %id);
                self.state.abandon_delete(id);
                return DeleteOutcome::Abandoned;
            }
            result = self.api.delete_resident(id) => result,
        };

        match self.state.finish_delete(id, result) {
            Ok(()) => {
                tracing::info!(event = "residents.delete.completed", id = %id);
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::error!(event = "residents.delete.failed", id = %id, error = %e);
                dialogs.alert(e.user_message());
                DeleteOutcome::Failed
            }
        }
    }
}

impl Drop for ResidentsListView {
    fn drop(&mut self) {
        self.teardown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::dialogs::MockDialogs;
    use crate::app::state::{ViewBody, DELETE_FAILURE_MESSAGE, LOAD_FAILURE_MESSAGE};
    use crate::domain::Resident;
    use crate::services::{ApiError, MockResidentsApi};
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use std::time::Duration;

    /// Backend that answers only after a delay, so teardown can land while
    /// a request is outstanding.
    struct SlowApi {
        list_delay: Duration,
        delete_delay: Duration,
    }

    #[async_trait]
    impl ResidentsApi for SlowApi {
        async fn list_residents(&self) -> Result<Vec<Resident>, ApiError> {
            tokio::time::sleep(self.list_delay).await;
            Ok(sample())
        }

        async fn delete_resident(&self, _id: ResidentId) -> Result<(), ApiError> {
            tokio::time::sleep(self.delete_delay).await;
            Ok(())
        }
    }

    fn cancel_after(token: CancellationToken, after: Duration) {
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            token.cancel();
        });
    }

    fn status_error(method: &'static str, status: StatusCode) -> ApiError {
        ApiError::Status {
            method,
            url: "http://localhost/api/residents".to_string(),
            status,
        }
    }

    fn sample() -> Vec<Resident> {
        vec![
            Resident::new(1, "a@x.com").with_name("Ann"),
            Resident::new(2, "b@x.com"),
            Resident::new(3, "c@x.com").with_phone("555-0100"),
        ]
    }

    fn ids(view: &ResidentsListView) -> Vec<i64> {
        view.state().residents().iter().map(|r| r.id.get()).collect()
    }

    async fn loaded_view(api: MockResidentsApi) -> ResidentsListView {
        let mut view = ResidentsListView::new(Arc::new(api));
        assert_eq!(view.load().await, LoadOutcome::Loaded(3));
        view
    }

    fn api_with_sample() -> MockResidentsApi {
        let mut api = MockResidentsApi::new();
        api.expect_list_residents()
            .times(1)
            .returning(|| Ok(sample()));
        api
    }

    #[tokio::test]
    async fn load_replaces_collection_in_order() {
        let view = loaded_view(api_with_sample()).await;

        assert!(!view.state().is_loading());
        assert_eq!(ids(&view), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn load_failure_shows_fixed_message() {
        let mut api = MockResidentsApi::new();
        api.expect_list_residents()
            .times(1)
            .returning(|| Err(status_error("GET", StatusCode::BAD_GATEWAY)));
        let mut view = ResidentsListView::new(Arc::new(api));

        assert_eq!(view.load().await, LoadOutcome::Failed);
        assert!(!view.state().is_loading());
        assert_eq!(view.state().body(), ViewBody::Error(LOAD_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn load_runs_once_per_mount() {
        let mut view = loaded_view(api_with_sample()).await;
        assert_eq!(view.load().await, LoadOutcome::AlreadyLoaded);
    }

    #[tokio::test]
    async fn teardown_before_response_leaves_state_untouched() {
        let mut api = MockResidentsApi::new();
        api.expect_list_residents().returning(|| Ok(sample()));
        let mut view = ResidentsListView::new(Arc::new(api));

        view.teardown();

        assert_eq!(view.load().await, LoadOutcome::Abandoned);
        assert!(view.state().residents().is_empty());
        assert!(!view.state().is_loading());
    }

    #[tokio::test]
    async fn teardown_while_load_pending_ignores_response() {
        let api = SlowApi {
            list_delay: Duration::from_secs(5),
            delete_delay: Duration::ZERO,
        };
        let mut view = ResidentsListView::new(Arc::new(api));
        cancel_after(view.teardown_token(), Duration::from_millis(20));

        assert_eq!(view.load().await, LoadOutcome::Abandoned);
        assert!(view.is_torn_down());
        assert!(view.state().residents().is_empty());
        assert!(!view.state().is_loading());
        assert_eq!(view.state().error(), None);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_exactly_one_row() {
        let mut api = api_with_sample();
        api.expect_delete_resident()
            .with(eq(ResidentId::new(2)))
            .times(1)
            .returning(|_| Ok(()));
        let mut dialogs = MockDialogs::new();
        dialogs
            .expect_confirm()
            .withf(|message| message == DELETE_CONFIRMATION)
            .times(1)
            .return_const(true);
        dialogs.expect_alert().never();

        let mut view = loaded_view(api).await;
        let outcome = view.delete(ResidentId::new(2), &dialogs).await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(ids(&view), vec![1, 3]);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let mut api = api_with_sample();
        api.expect_delete_resident().never();
        let mut dialogs = MockDialogs::new();
        dialogs.expect_confirm().times(1).return_const(false);
        dialogs.expect_alert().never();

        let mut view = loaded_view(api).await;
        let before = view.state().clone();
        let outcome = view.delete(ResidentId::new(1), &dialogs).await;

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(view.state(), &before);
    }

    #[tokio::test]
    async fn failed_delete_alerts_and_keeps_rows() {
        let mut api = api_with_sample();
        api.expect_delete_resident()
            .times(1)
            .returning(|_| Err(status_error("DELETE", StatusCode::INTERNAL_SERVER_ERROR)));
        let mut dialogs = MockDialogs::new();
        dialogs.expect_confirm().return_const(true);
        dialogs
            .expect_alert()
            .withf(|message| message == DELETE_FAILURE_MESSAGE)
            .times(1)
            .return_const(());

        let mut view = loaded_view(api).await;
        let outcome = view.delete(ResidentId::new(3), &dialogs).await;

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(ids(&view), vec![1, 2, 3]);
        assert!(!view.state().is_delete_pending(ResidentId::new(3)));
    }

    #[tokio::test]
    async fn unknown_row_is_not_prompted_or_sent() {
        let mut api = api_with_sample();
        api.expect_delete_resident().never();
        let mut dialogs = MockDialogs::new();
        dialogs.expect_confirm().never();

        let mut view = loaded_view(api).await;

        assert_eq!(
            view.delete(ResidentId::new(42), &dialogs).await,
            DeleteOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn teardown_after_confirmation_skips_request() {
        let mut api = api_with_sample();
        api.expect_delete_resident().never();
        let mut dialogs = MockDialogs::new();
        dialogs.expect_confirm().return_const(true);

        let mut view = loaded_view(api).await;
        view.teardown();

        assert_eq!(
            view.delete(ResidentId::new(1), &dialogs).await,
            DeleteOutcome::Abandoned
        );
        assert_eq!(ids(&view), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn teardown_while_delete_pending_keeps_rows_and_clears_mark() {
        let api = SlowApi {
            list_delay: Duration::ZERO,
            delete_delay: Duration::from_secs(5),
        };
        let mut dialogs = MockDialogs::new();
        dialogs.expect_confirm().times(1).return_const(true);
        dialogs.expect_alert().never();

        let mut view = ResidentsListView::new(Arc::new(api));
        assert_eq!(view.load().await, LoadOutcome::Loaded(3));
        cancel_after(view.teardown_token(), Duration::from_millis(20));

        assert_eq!(
            view.delete(ResidentId::new(2), &dialogs).await,
            DeleteOutcome::Abandoned
        );
        assert_eq!(ids(&view), vec![1, 2, 3]);
        assert!(!view.state().is_delete_pending(ResidentId::new(2)));
    }

    #[test]
    fn empty_collection_loads_on_a_plain_runtime() {
        let mut api = MockResidentsApi::new();
        api.expect_list_residents().returning(|| Ok(Vec::new()));
        let mut view = ResidentsListView::new(Arc::new(api));

        let outcome = tokio_test::block_on(view.load());

        assert_eq!(outcome, LoadOutcome::Loaded(0));
        assert_eq!(view.state().body(), ViewBody::Empty);
    }
}
