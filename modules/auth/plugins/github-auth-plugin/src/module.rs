//! GitHub auth plugin module.

use std::sync::Arc;

use async_trait::async_trait;
use auth_sdk::{AuthProviderRegistry, OAuthProvider};
use portalkit::{Module, ModuleCtx};
use tracing::info;

use crate::config::GithubAuthConfig;
use crate::domain::{GithubAuthenticator, GithubSignInResolver};

/// Provider id the plugin registers under.
pub const PROVIDER_ID: &str = "github";

/// Contributes the `github` provider to the auth module.
#[derive(Default)]
pub struct GithubAuthPlugin;

#[async_trait]
impl Module for GithubAuthPlugin {
    fn name(&self) -> &'static str {
        "github-auth"
    }

    fn deps(&self) -> &'static [&'static str] {
        &["auth"]
    }

    #[tracing::instrument(skip_all, fields(module = "github-auth"))]
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing github auth plugin");

        let cfg: GithubAuthConfig = ctx.config()?;
        info!(
            client_id = %cfg.client_id,
            callback_url = %cfg.callback_url,
            user_profile_url = %cfg.user_profile_url,
            "Loaded plugin configuration"
        );

        let authenticator = GithubAuthenticator::from_config(&cfg)?;
        let provider = OAuthProvider::new(authenticator, GithubSignInResolver);

        let registry = ctx.client_hub().get::<dyn AuthProviderRegistry>()?;
        registry.register_provider(PROVIDER_ID, Arc::new(provider))?;

        info!(provider_id = PROVIDER_ID, "GitHub auth plugin initialized");
        Ok(())
    }
}
