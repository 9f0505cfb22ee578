//! Domain errors for the permission module.

use auth_sdk::AuthError;

#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for DomainError {
    fn from(e: AuthError) -> Self {
        if e.is_authentication_failure() {
            Self::Unauthorized(e.to_string())
        } else {
            Self::Internal(e.to_string())
        }
    }
}
