//! GitHub auth plugin
//!
//! Registers the `github` sign-in provider with the auth module: an OAuth
//! authenticator for github.com (or GitHub Enterprise) and a sign-in resolver
//! that maps the GitHub login to `user:default/<login lowercased>`.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use domain::{GithubAuthenticator, GithubSignInResolver};
pub use module::GithubAuthPlugin;
