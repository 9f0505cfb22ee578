//! Sign-in resolver seam: turns an upstream identity into a session credential.

use async_trait::async_trait;

use crate::error::AuthError;
use crate::models::{Credential, OAuthResult, TokenParams};

/// Capabilities the auth module lends to a resolver for the duration of one sign-in.
#[async_trait]
pub trait AuthResolverContext: Send + Sync {
    /// # Errors
    ///
    /// - `TokenIssuance` if the token cannot be signed
    async fn issue_token(&self, params: TokenParams) -> Result<Credential, AuthError>;
}

/// Maps the result of an upstream handshake to an internal identity.
///
/// Implementations are stateless and do no I/O besides calling back into `ctx`.
#[async_trait]
pub trait SignInResolver: Send + Sync {
    /// # Errors
    ///
    /// - `IdentityResolution` if the profile lacks the identifier the resolver keys on
    /// - whatever `ctx.issue_token` returns, unchanged
    async fn resolve(
        &self,
        result: &OAuthResult,
        ctx: &dyn AuthResolverContext,
    ) -> Result<Credential, AuthError>;
}
