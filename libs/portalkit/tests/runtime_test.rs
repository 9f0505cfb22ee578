#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Host runtime tests: init ordering through the `ClientHub`, route
//! registration and the built-in health endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::routing::get;
use axum::{Json, Router};
use http::{Request, StatusCode};
use parking_lot::Mutex;
use portalkit::config::load_config_from_str;
use portalkit::{HostRuntime, Module, ModuleCtx, RestApiCapability};
use serde::Deserialize;
use tower::ServiceExt;

trait Greeting: Send + Sync {
    fn text(&self) -> String;
}

struct StaticGreeting(String);

impl Greeting for StaticGreeting {
    fn text(&self) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ProviderConfig {
    greeting: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            greeting: "hello".to_owned(),
        }
    }
}

struct ProviderModule {
    log: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl Module for ProviderModule {
    fn name(&self) -> &'static str {
        "provider"
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let cfg: ProviderConfig = ctx.config()?;
        let api: Arc<dyn Greeting> = Arc::new(StaticGreeting(cfg.greeting));
        ctx.client_hub().register::<dyn Greeting>(api);
        self.log.lock().push("provider");
        Ok(())
    }
}

struct ConsumerModule {
    log: Arc<Mutex<Vec<&'static str>>>,
    greeting: Mutex<Option<Arc<dyn Greeting>>>,
}

#[async_trait]
impl Module for ConsumerModule {
    fn name(&self) -> &'static str {
        "consumer"
    }

    fn deps(&self) -> &'static [&'static str] {
        &["provider"]
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        let greeting = ctx.client_hub().get::<dyn Greeting>()?;
        *self.greeting.lock() = Some(greeting);
        self.log.lock().push("consumer");
        Ok(())
    }

    fn rest(&self) -> Option<&dyn RestApiCapability> {
        Some(self)
    }
}

impl RestApiCapability for ConsumerModule {
    fn register_rest(&self, _ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router> {
        let greeting = self
            .greeting
            .lock()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("consumer not initialized"))?;
        Ok(router.route(
            "/greeting",
            get(move || {
                let greeting = Arc::clone(&greeting);
                async move { Json(serde_json::json!({ "text": greeting.text() })) }
            }),
        ))
    }
}

struct FailingModule;

#[async_trait]
impl Module for FailingModule {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn init(&self, _ctx: &ModuleCtx) -> anyhow::Result<()> {
        anyhow::bail!("boom")
    }
}

fn modules(log: &Arc<Mutex<Vec<&'static str>>>) -> Vec<Arc<dyn Module>> {
    vec![
        Arc::new(ConsumerModule {
            log: Arc::clone(log),
            greeting: Mutex::new(None),
        }),
        Arc::new(ProviderModule {
            log: Arc::clone(log),
        }),
    ]
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn modules_init_in_dependency_order_and_serve_routes() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let config = load_config_from_str(
        r"
modules:
  provider:
    config:
      greeting: howdy
",
    )
    .unwrap();

    let runtime = HostRuntime::new(config, modules(&log)).unwrap();
    assert_eq!(runtime.registry().names(), vec!["provider", "consumer"]);

    runtime.init_modules().await.unwrap();
    assert_eq!(*log.lock(), vec!["provider", "consumer"]);

    let router = runtime.build_router().unwrap();
    let response = router
        .oneshot(Request::get("/greeting").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_json(response).await["text"], "howdy");
}

#[tokio::test]
async fn health_endpoint_is_always_mounted() {
    let runtime = HostRuntime::new(load_config_from_str("").unwrap(), Vec::new()).unwrap();
    runtime.init_modules().await.unwrap();

    let response = runtime
        .build_router()
        .unwrap()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn disabling_a_dependency_is_rejected_at_build_time() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let config = load_config_from_str(
        r"
modules:
  provider:
    enabled: false
",
    )
    .unwrap();

    let err = HostRuntime::new(config, modules(&log)).err().unwrap();
    assert!(err.to_string().contains("disabled module `provider`"));
}

#[tokio::test]
async fn init_failure_names_the_module() {
    let runtime = HostRuntime::new(
        load_config_from_str("").unwrap(),
        vec![Arc::new(FailingModule) as Arc<dyn Module>],
    )
    .unwrap();

    let err = runtime.init_modules().await.unwrap_err();
    assert!(format!("{err:#}").contains("failed to initialize module `failing`"));
    assert!(format!("{err:#}").contains("boom"));
}
