//! Guest auth plugin module.

use std::sync::Arc;

use async_trait::async_trait;
use auth_sdk::AuthProviderRegistry;
use portalkit::{Module, ModuleCtx};
use tracing::{info, warn};

use crate::config::GuestAuthConfig;
use crate::provider::GuestProvider;

pub const PROVIDER_ID: &str = "guest";

#[derive(Default)]
pub struct GuestAuthPlugin;

#[async_trait]
impl Module for GuestAuthPlugin {
    fn name(&self) -> &'static str {
        "guest-auth"
    }

    fn deps(&self) -> &'static [&'static str] {
        &["auth"]
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    #[tracing::instrument(skip_all, fields(module = "guest-auth"))]
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let cfg: GuestAuthConfig = ctx.config()?;
        warn!(
            user = %cfg.user_entity_ref,
            "Guest sign-in is enabled; anyone can obtain a session. Do NOT enable in production."
        );

        let registry = ctx.client_hub().get::<dyn AuthProviderRegistry>()?;
        registry.register_provider(
            PROVIDER_ID,
            Arc::new(GuestProvider::new(cfg.user_entity_ref)),
        )?;

        info!(provider_id = PROVIDER_ID, "Guest auth plugin initialized");
        Ok(())
    }
}
