//! Error types for the auth module and its provider plugins.

use thiserror::Error;

/// The upstream profile cannot be mapped to an internal identity.
///
/// Deterministic for a given profile, so callers never retry it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("upstream profile lacks required identifier `{field}`")]
pub struct IdentityResolutionError {
    field: &'static str,
}

impl IdentityResolutionError {
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self { field }
    }

    /// Name of the profile field that was absent or empty.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }
}

/// Errors surfaced by auth providers, resolvers and the token service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The sign-in resolver could not derive an identity from the upstream profile.
    #[error(transparent)]
    IdentityResolution(#[from] IdentityResolutionError),

    /// The upstream handshake failed (denied consent, bad code, nonce mismatch, ...).
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A presented session token is missing, malformed, expired or forged.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// No provider is registered under the requested id.
    #[error("unknown auth provider `{0}`")]
    ProviderNotFound(String),

    /// A provider with the same id was already registered.
    #[error("auth provider `{0}` is already registered")]
    ProviderConflict(String),

    /// The provider does not implement the requested flow step.
    #[error("operation `{0}` is not supported by this provider")]
    NotSupported(&'static str),

    /// Signing the session token failed.
    #[error("token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether the error should be reported to the caller as an authentication failure.
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::IdentityResolution(_) | Self::Authentication(_) | Self::Unauthorized(_)
        )
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn identity_resolution_message_names_field() {
        let err = IdentityResolutionError::missing("username");
        assert_eq!(err.field(), "username");
        assert_eq!(
            err.to_string(),
            "upstream profile lacks required identifier `username`"
        );
    }

    #[test]
    fn identity_resolution_converts_into_auth_failure() {
        let err: AuthError = IdentityResolutionError::missing("username").into();
        assert!(err.is_authentication_failure());
        assert!(matches!(err, AuthError::IdentityResolution(_)));
    }

    #[test]
    fn infrastructure_errors_are_not_auth_failures() {
        assert!(!AuthError::TokenIssuance("key".to_owned()).is_authentication_failure());
        assert!(!AuthError::ProviderNotFound("x".to_owned()).is_authentication_failure());
    }
}
