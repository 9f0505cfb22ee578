//! Contracts implemented by backend modules.

use async_trait::async_trait;
use axum::Router;

use crate::context::ModuleCtx;

/// A pluggable backend module.
///
/// The host calls [`Module::init`] once per process, after every module named
/// in [`Module::deps`] has finished its own `init`. Modules publish the
/// capabilities they provide into the `ClientHub` from `init` and fetch the
/// ones they consume from it.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    /// Unique module name; also the key of its `modules.<name>` config section.
    fn name(&self) -> &'static str;

    /// Names of modules that must be initialized before this one.
    fn deps(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether the module loads when its config section has no `enabled` flag.
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Initialize the module.
    ///
    /// # Errors
    ///
    /// Any error aborts host startup.
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()>;

    /// REST capability, if the module serves HTTP routes.
    fn rest(&self) -> Option<&dyn RestApiCapability> {
        None
    }
}

/// Capability of modules that contribute HTTP routes.
pub trait RestApiCapability: Send + Sync {
    /// Add this module's routes to `router`. Called after every module's `init`.
    ///
    /// # Errors
    ///
    /// Any error aborts host startup.
    fn register_rest(&self, ctx: &ModuleCtx, router: Router) -> anyhow::Result<Router>;
}
