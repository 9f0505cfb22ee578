//! Auth module.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use auth_sdk::{AuthProviderRegistry, TokenIssuer, TokenVerifier};
use axum::Router;
use portalkit::{Module, ModuleCtx, RestApiCapability};
use tracing::info;

use crate::api::rest::cookies::NonceCookie;
use crate::api::rest::routes;
use crate::config::AuthConfig;
use crate::domain::{AuthService, IssuerContext, ProviderRegistry, TokenService};

/// Owns session tokens and the sign-in provider extension point.
///
/// Provider plugins depend on this module and register themselves through
/// `dyn AuthProviderRegistry` during their own `init`.
#[derive(Default)]
pub struct AuthModule {
    service: OnceLock<Arc<AuthService>>,
    cookie: OnceLock<NonceCookie>,
}

impl AuthModule {
    pub const NAME: &'static str = "auth";
}

#[async_trait]
impl Module for AuthModule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[tracing::instrument(skip_all, fields(module = "auth"))]
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing auth module");

        let cfg: AuthConfig = ctx.config()?;
        info!(
            issuer = %cfg.issuer,
            session_duration_secs = cfg.session_duration_secs,
            "Loaded auth configuration"
        );

        let tokens = Arc::new(TokenService::from_config(&cfg)?);
        let providers = Arc::new(ProviderRegistry::new());

        let issuer: Arc<dyn TokenIssuer> = tokens.clone();
        let verifier: Arc<dyn TokenVerifier> = tokens;
        let registry: Arc<dyn AuthProviderRegistry> = providers;

        let service = Arc::new(AuthService::new(
            registry.clone(),
            verifier.clone(),
            IssuerContext::new(issuer.clone()),
        ));
        self.service
            .set(service)
            .map_err(|_| anyhow::anyhow!("Auth service already initialized"))?;
        self.cookie
            .set(NonceCookie {
                secure: cfg.secure_cookies,
            })
            .map_err(|_| anyhow::anyhow!("Auth cookie settings already initialized"))?;

        let hub = ctx.client_hub();
        hub.register::<dyn AuthProviderRegistry>(registry);
        hub.register::<dyn TokenIssuer>(issuer);
        hub.register::<dyn TokenVerifier>(verifier);

        info!("Auth module initialized");
        Ok(())
    }

    fn rest(&self) -> Option<&dyn RestApiCapability> {
        Some(self)
    }
}

impl RestApiCapability for AuthModule {
    fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        let service = self
            .service
            .get()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Auth module not initialized"))?;
        let cookie = self
            .cookie
            .get()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Auth module not initialized"))?;

        Ok(routes::register_routes(router, service, cookie))
    }
}
