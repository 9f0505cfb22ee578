use portalkit::api::Problem;
use tracing::error;

use crate::domain::DomainError;

/// Convert domain errors to HTTP Problem responses
#[must_use]
pub fn domain_error_to_problem(err: DomainError) -> Problem {
    match err {
        DomainError::Unauthorized(message) => Problem::unauthorized(message),
        DomainError::Internal(message) => {
            error!(error = %message, "Permission request failed");
            Problem::internal("An internal error occurred")
        }
    }
}

/// Implement Into<Problem> for `DomainError` so `?` works in handlers
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(e)
    }
}
