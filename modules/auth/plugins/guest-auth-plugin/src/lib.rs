//! Guest auth plugin
//!
//! Registers the `guest` provider, which signs anyone in as a fixed guest
//! user through `POST /api/auth/guest/refresh`. Disabled unless
//! `modules.guest-auth.enabled` is set.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod module;
pub mod provider;

pub use module::GuestAuthPlugin;
pub use provider::GuestProvider;
