//! Authentication error types.

use crate::storage::StorageError;
use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Blank username
    #[error("Please enter a username")]
    EmptyUsername,

    /// Blank password
    #[error("Please enter a password")]
    EmptyPassword,

    /// No user is logged in
    #[error("Not logged in")]
    NotLoggedIn,

    /// Persisted user could not be written or removed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Input was rejected before touching any state.
    pub fn is_validation(&self) -> bool {
        matches!(self, AuthError::EmptyUsername | AuthError::EmptyPassword)
    }

    /// Get a client-safe error message
    ///
    /// Storage errors are sanitized to hide paths and record contents.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Storage(e) => e.client_message(),
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
