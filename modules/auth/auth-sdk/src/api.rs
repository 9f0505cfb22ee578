//! Public API traits of the auth module.
//!
//! The auth module registers implementations of these traits in `ClientHub`.
//! Provider plugins fetch [`AuthProviderRegistry`] during their `init` and add
//! themselves; other modules fetch [`TokenVerifier`] to authenticate callers:
//!
//! ```ignore
//! let registry = hub.get::<dyn AuthProviderRegistry>()?;
//! registry.register_provider("github", Arc::new(provider))?;
//!
//! let verifier = hub.get::<dyn TokenVerifier>()?;
//! let claims = verifier.verify_token(bearer)?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::models::{
    Credential, FrameRequest, SignInResponse, StartRequest, StartResponse, TokenClaims,
    TokenParams,
};
use crate::resolver::AuthResolverContext;

/// A sign-in provider mounted under `/api/auth/{provider_id}`.
///
/// Every flow step defaults to [`AuthError::NotSupported`]; providers override
/// the steps they implement.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Begin a browser sign-in.
    ///
    /// # Errors
    ///
    /// - `NotSupported` if the provider has no redirect flow
    async fn start(&self, _req: &StartRequest) -> Result<StartResponse, AuthError> {
        Err(AuthError::NotSupported("start"))
    }

    /// Complete a browser sign-in from the upstream callback.
    ///
    /// # Errors
    ///
    /// - `Authentication` if the callback is malformed or the handshake fails
    /// - `IdentityResolution` if the upstream profile cannot be mapped
    /// - `NotSupported` if the provider has no redirect flow
    async fn frame_handler(
        &self,
        _req: &FrameRequest,
        _ctx: &dyn AuthResolverContext,
    ) -> Result<SignInResponse, AuthError> {
        Err(AuthError::NotSupported("frame_handler"))
    }

    /// Re-issue a session without a browser round-trip.
    ///
    /// # Errors
    ///
    /// - `NotSupported` if the provider cannot refresh sessions
    async fn refresh(&self, _ctx: &dyn AuthResolverContext) -> Result<SignInResponse, AuthError> {
        Err(AuthError::NotSupported("refresh"))
    }
}

/// Extension point through which plugins contribute sign-in providers.
pub trait AuthProviderRegistry: Send + Sync {
    /// # Errors
    ///
    /// - `ProviderConflict` if `provider_id` is already taken
    fn register_provider(
        &self,
        provider_id: &str,
        provider: Arc<dyn AuthProvider>,
    ) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// - `ProviderNotFound` if nothing is registered under `provider_id`
    fn get(&self, provider_id: &str) -> Result<Arc<dyn AuthProvider>, AuthError>;

    /// Registered provider ids in ascending order.
    fn provider_ids(&self) -> Vec<String>;
}

/// Issues signed session tokens.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// # Errors
    ///
    /// - `TokenIssuance` if signing fails
    async fn issue_token(&self, params: TokenParams) -> Result<Credential, AuthError>;
}

/// Validates session tokens previously issued by [`TokenIssuer`].
pub trait TokenVerifier: Send + Sync {
    /// Validate signature, issuer, audience and expiry of `token`.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the token is invalid, expired, or malformed
    fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}
