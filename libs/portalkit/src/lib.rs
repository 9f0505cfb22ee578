#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `PortalKit`: the module kernel of the developer portal backend.
//!
//! - [`Module`] / [`RestApiCapability`] - the contract every backend module implements
//! - [`ClientHub`] - process-wide typed client registry used for dependency injection
//! - [`ModuleCtx`] - per-module view of configuration and the `ClientHub`
//! - [`ModuleRegistry`] - the enabled modules, ordered by their declared dependencies
//! - [`HostRuntime`] - initializes modules, assembles their routers and serves HTTP
//!
//! Configuration is loaded with [`config::load_config`] and logging is set up
//! with [`logging::init_logging`].

pub mod api;
pub mod client_hub;
pub mod config;
pub mod context;
pub mod contracts;
pub mod logging;
pub mod registry;
pub mod runtime;

pub use client_hub::{ClientHub, ClientHubError};
pub use config::{AppConfig, ConfigError, ConfigProvider};
pub use context::ModuleCtx;
pub use contracts::{Module, RestApiCapability};
pub use registry::{ModuleRegistry, RegistryError};
pub use runtime::HostRuntime;
