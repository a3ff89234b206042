//! Lobby error types.

use crate::{
    auth::AuthError, deal::DealError, session::SessionError, storage::StorageError,
    table::TableError,
};
use thiserror::Error;

/// Lobby errors
#[derive(Debug, Error)]
pub enum LobbyError {
    /// Operation needs a logged-in user
    #[error("Please log in first")]
    NotLoggedIn,

    /// Operation needs an admin
    #[error("Only an admin can do that")]
    NotAuthorized,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Deal(#[from] DealError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LobbyError {
    /// The lobby refused the request on its rules or its input, so repeating
    /// it unchanged fails the same way. Storage failures and concurrent
    /// changes are not rejections.
    pub fn is_rejection(&self) -> bool {
        match self {
            LobbyError::NotLoggedIn | LobbyError::NotAuthorized => true,
            LobbyError::Auth(e) => e.is_validation(),
            LobbyError::Table(e)
            | LobbyError::Session(SessionError::Table(e))
            | LobbyError::Deal(DealError::Table(e)) => e.is_state_conflict() || e.is_validation(),
            LobbyError::Deal(DealError::NotAuthorized) => true,
            _ => false,
        }
    }

    /// Get a client-safe error message
    pub fn client_message(&self) -> String {
        match self {
            LobbyError::Auth(e) => e.client_message(),
            LobbyError::Session(e) => e.client_message(),
            LobbyError::Table(e) => e.client_message(),
            LobbyError::Deal(e) => e.client_message(),
            LobbyError::Storage(e) => e.client_message(),
            _ => self.to_string(),
        }
    }
}

/// Result type for lobby operations
pub type LobbyResult<T> = Result<T, LobbyError>;
