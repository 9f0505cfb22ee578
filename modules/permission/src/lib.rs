//! Permission Module
//!
//! Answers `POST /api/permission/authorize` for callers holding a session
//! token issued by the auth module. Decisions come from the configured
//! [`PermissionPolicy`](domain::PermissionPolicy).
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod api;
pub mod config;
pub mod domain;
pub mod module;

pub use module::PermissionModule;
