use std::sync::Arc;

use auth_sdk::{
    AuthError, AuthProviderRegistry, FrameRequest, SignInResponse, StartRequest, StartResponse,
    TokenClaims, TokenVerifier,
};
use tracing::{info, warn};

use crate::domain::context::IssuerContext;

/// Request-facing operations of the auth module.
pub struct AuthService {
    providers: Arc<dyn AuthProviderRegistry>,
    verifier: Arc<dyn TokenVerifier>,
    context: IssuerContext,
}

impl AuthService {
    #[must_use]
    pub fn new(
        providers: Arc<dyn AuthProviderRegistry>,
        verifier: Arc<dyn TokenVerifier>,
        context: IssuerContext,
    ) -> Self {
        Self {
            providers,
            verifier,
            context,
        }
    }

    /// # Errors
    ///
    /// `ProviderNotFound` or whatever the provider's `start` returns.
    pub async fn start(
        &self,
        provider_id: &str,
        req: &StartRequest,
    ) -> Result<StartResponse, AuthError> {
        self.providers.get(provider_id)?.start(req).await
    }

    /// # Errors
    ///
    /// `ProviderNotFound` or whatever the provider's `frame_handler` returns.
    pub async fn frame_handler(
        &self,
        provider_id: &str,
        req: &FrameRequest,
    ) -> Result<SignInResponse, AuthError> {
        let provider = self.providers.get(provider_id)?;
        match provider.frame_handler(req, &self.context).await {
            Ok(resp) => {
                info!(
                    provider_id,
                    user = %resp.backstage_identity.identity.user_entity_ref,
                    "Sign-in completed"
                );
                Ok(resp)
            }
            Err(e) => {
                warn!(provider_id, error = %e, "Sign-in failed");
                Err(e)
            }
        }
    }

    /// # Errors
    ///
    /// `ProviderNotFound` or whatever the provider's `refresh` returns.
    pub async fn refresh(&self, provider_id: &str) -> Result<SignInResponse, AuthError> {
        self.providers.get(provider_id)?.refresh(&self.context).await
    }

    /// # Errors
    ///
    /// `Unauthorized` if the token does not verify.
    pub fn user_info(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.verifier.verify_token(token)
    }

    #[must_use]
    pub fn provider_ids(&self) -> Vec<String> {
        self.providers.provider_ids()
    }
}
