//! Permission module.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use auth_sdk::TokenVerifier;
use axum::Router;
use portalkit::{Module, ModuleCtx, RestApiCapability};
use tracing::info;

use crate::api::rest::routes;
use crate::config::PermissionConfig;
use crate::domain::{PermissionService, policy_for};

#[derive(Default)]
pub struct PermissionModule {
    service: OnceLock<Arc<PermissionService>>,
}

#[async_trait]
impl Module for PermissionModule {
    fn name(&self) -> &'static str {
        "permission"
    }

    fn deps(&self) -> &'static [&'static str] {
        &["auth"]
    }

    #[tracing::instrument(skip_all, fields(module = "permission"))]
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let cfg: PermissionConfig = ctx.config()?;
        info!(policy = ?cfg.policy, "Initializing permission module");

        let verifier = ctx.client_hub().get::<dyn TokenVerifier>()?;
        let service = Arc::new(PermissionService::new(policy_for(cfg.policy), verifier));
        self.service
            .set(service)
            .map_err(|_| anyhow::anyhow!("Permission service already initialized"))?;

        Ok(())
    }

    fn rest(&self) -> Option<&dyn RestApiCapability> {
        Some(self)
    }
}

impl RestApiCapability for PermissionModule {
    fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        let service = self
            .service
            .get()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Permission module not initialized"))?;
        Ok(routes::register_routes(router, service))
    }
}
