use auth_sdk::AuthError;
use http::StatusCode;
use portalkit::api::Problem;
use tracing::error;

/// Convert auth errors to HTTP Problem responses
#[must_use]
pub fn auth_error_to_problem(err: AuthError) -> Problem {
    match err {
        AuthError::IdentityResolution(e) => Problem::new(
            StatusCode::UNAUTHORIZED,
            "Identity Resolution Failed",
            e.to_string(),
        ),

        AuthError::Authentication(message) => {
            Problem::new(StatusCode::UNAUTHORIZED, "Authentication Failed", message)
        }

        AuthError::Unauthorized(message) => Problem::unauthorized(message),

        AuthError::ProviderNotFound(id) => {
            Problem::not_found(format!("Unknown auth provider: {id}"))
        }

        AuthError::ProviderConflict(id) => Problem::new(
            StatusCode::CONFLICT,
            "Provider Conflict",
            format!("Auth provider already registered: {id}"),
        ),

        AuthError::NotSupported(op) => {
            Problem::bad_request(format!("Operation not supported by this provider: {op}"))
        }

        AuthError::TokenIssuance(message) | AuthError::Internal(message) => {
            error!(error = %message, "Auth request failed");
            Problem::internal("An internal error occurred")
        }
    }
}
