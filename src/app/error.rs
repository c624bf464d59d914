use crate::app::state::{DELETE_FAILURE_MESSAGE, LOAD_FAILURE_MESSAGE};
use crate::domain::ResidentId;
use crate::services::ApiError;

/// The two failures the resident list surfaces to the user.
#[derive(Debug, thiserror::Error)]
pub enum ResidentsError {
    #[error("failed to load residents: {source}")]
    Load {
        #[source]
        source: ApiError,
    },

    #[error("failed to delete resident {id}: {source}")]
    Delete {
        id: ResidentId,
        #[source]
        source: ApiError,
    },
}

impl ResidentsError {
    /// Fixed text shown to the user; the cause goes to the log only.
    pub fn user_message(&self) -> &'static str {
        match self {
            ResidentsError::Load { .. } => LOAD_FAILURE_MESSAGE,
            ResidentsError::Delete { .. } => DELETE_FAILURE_MESSAGE,
        }
    }
}
