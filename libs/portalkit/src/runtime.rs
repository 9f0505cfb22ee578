//! Host runtime: owns the `ClientHub`, runs module init in dependency order,
//! assembles module routers and serves them until cancelled.

use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::{Json, Router};
use tokio_util::sync::CancellationToken;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client_hub::ClientHub;
use crate::config::AppConfig;
use crate::context::ModuleCtx;
use crate::contracts::Module;
use crate::registry::{ModuleRegistry, RegistryError};

pub struct HostRuntime {
    config: Arc<AppConfig>,
    registry: ModuleRegistry,
    client_hub: Arc<ClientHub>,
    cancellation_token: CancellationToken,
}

impl HostRuntime {
    /// Build the runtime from the configuration and the modules compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when the enabled module set is inconsistent.
    pub fn new(config: AppConfig, available: Vec<Arc<dyn Module>>) -> Result<Self, RegistryError> {
        let registry = ModuleRegistry::build(available, |m| {
            config.is_module_enabled(m.name(), m.enabled_by_default())
        })?;

        Ok(Self {
            config: Arc::new(config),
            registry,
            client_hub: Arc::new(ClientHub::new()),
            cancellation_token: CancellationToken::new(),
        })
    }

    #[must_use]
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    #[must_use]
    pub fn client_hub(&self) -> Arc<ClientHub> {
        Arc::clone(&self.client_hub)
    }

    /// Token that stops [`Self::serve`] when cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    fn module_ctx(&self, module: &str) -> ModuleCtx {
        ModuleCtx::new(module, self.config.clone(), self.client_hub())
    }

    /// Run every module's `init` in dependency order.
    ///
    /// # Errors
    ///
    /// Stops at the first module whose `init` fails.
    #[tracing::instrument(skip_all)]
    pub async fn init_modules(&self) -> anyhow::Result<()> {
        for module in self.registry.modules() {
            let ctx = self.module_ctx(module.name());
            module
                .init(&ctx)
                .await
                .with_context(|| format!("failed to initialize module `{}`", module.name()))?;
            info!(module = module.name(), "Module initialized");
        }
        Ok(())
    }

    /// Collect the routes of every REST-capable module behind the common layers.
    ///
    /// # Errors
    ///
    /// Stops at the first module whose route registration fails.
    pub fn build_router(&self) -> anyhow::Result<Router> {
        let mut router = Router::new().route("/health", get(health));

        for module in self.registry.modules() {
            if let Some(rest) = module.rest() {
                let ctx = self.module_ctx(module.name());
                router = rest
                    .register_rest(&ctx, router)
                    .with_context(|| format!("failed to register routes of `{}`", module.name()))?;
            }
        }

        // Last added layer runs first: SetRequestId -> Trace -> PropagateRequestId -> routes.
        Ok(router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
    }

    /// Bind `server.bind_addr` and serve `router` until the cancellation token fires.
    ///
    /// # Errors
    ///
    /// Fails if the address cannot be bound or the server stops with an I/O error.
    pub async fn serve(&self, router: Router) -> anyhow::Result<()> {
        let bind_addr = &self.config.server.bind_addr;
        let listener = tokio::net::TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("failed to bind {bind_addr}"))?;
        info!(addr = %listener.local_addr()?, "HTTP server listening");

        let shutdown = self.cancellation_token.clone();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .context("HTTP server failed")?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Init all modules, build the router and serve.
    ///
    /// # Errors
    ///
    /// Propagates failures of [`Self::init_modules`], [`Self::build_router`] and [`Self::serve`].
    pub async fn run(&self) -> anyhow::Result<()> {
        self.init_modules().await?;
        let router = self.build_router()?;
        self.serve(router).await
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
