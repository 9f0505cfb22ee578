//! Auth SDK
//!
//! Contracts shared by the `auth` module and its provider plugins:
//!
//! - [`AuthProviderRegistry`] - Extension point plugins register providers with
//! - [`AuthProvider`] - A sign-in provider mounted under `/api/auth/{id}`
//! - [`TokenIssuer`] / [`TokenVerifier`] - Session token capabilities
//! - [`SignInResolver`] - Maps an upstream profile to an internal identity
//! - [`OAuthProvider`] - Redirect flow combining an [`OAuthAuthenticator`] with a resolver
//! - [`AuthError`] / [`IdentityResolutionError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use auth_sdk::AuthProviderRegistry;
//!
//! let registry = ctx.client_hub().get::<dyn AuthProviderRegistry>()?;
//! registry.register_provider("github", Arc::new(OAuthProvider::new(authenticator, resolver)))?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod entity_ref;
pub mod error;
pub mod models;
pub mod oauth;
pub mod resolver;

pub use api::{AuthProvider, AuthProviderRegistry, TokenIssuer, TokenVerifier};
pub use entity_ref::{EntityRef, EntityRefParseError};
pub use error::{AuthError, IdentityResolutionError};
pub use models::{
    Credential, FrameRequest, FullProfile, IdentityClaims, IdentityKind, OAuthResult,
    ProfileInfo, SignInIdentity, SignInResponse, StartRequest, StartResponse, TokenClaims,
    TokenParams,
};
pub use oauth::{OAuthAuthenticator, OAuthProvider, OAuthState};
pub use resolver::{AuthResolverContext, SignInResolver};
