//! Auth Module
//!
//! Issues and verifies signed session tokens, owns the sign-in provider
//! extension point and serves the `/api/auth` HTTP surface.
//!
//! Registers in `ClientHub`:
//! - `dyn AuthProviderRegistry` - provider plugins add themselves here
//! - `dyn TokenIssuer` / `dyn TokenVerifier` - for modules that mint or check sessions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod api;
pub mod config;
pub mod domain;
pub mod module;

pub use module::AuthModule;
