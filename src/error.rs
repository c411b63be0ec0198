use crate::store::StoreError;
use crate::validate::ValidationError;

/// Crate-level error for callers that do not care which component failed.
#[derive(thiserror::Error, Debug)]
pub enum LobbyError {
    #[error("not found: {0}")] NotFound(String),
    #[error("conflict: {0}")] Conflict(String),
    #[error(transparent)] Validation(#[from] ValidationError),
}

impl From<StoreError> for LobbyError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => LobbyError::NotFound(id),
            StoreError::Conflict(id) => LobbyError::Conflict(id),
            StoreError::Validation(v) => LobbyError::Validation(v),
        }
    }
}
