//! Authentication errors.

use crate::Role;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No user is logged in.
    #[error("not logged in")]
    NotLoggedIn,

    /// Session expired.
    #[error("session expired")]
    SessionExpired,

    /// Logged-in user lacks the role for an action.
    #[error("insufficient permissions: {required} required, logged in as {actual}")]
    InsufficientPermissions { required: Role, actual: Role },

    /// A profile field required for login is blank.
    #[error("profile is missing {0}")]
    IncompleteProfile(&'static str),

    /// Role string not recognised.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// Underlying store failed.
    #[error("storage error: {0}")]
    Storage(#[from] brms_storage::StorageError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::NotLoggedIn | AuthError::SessionExpired)
    }

    /// Check if this is a permission error.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, AuthError::InsufficientPermissions { .. })
    }
}
