//! Configuration for the auth module.

use secrecy::SecretString;
use serde::Deserialize;

/// Module configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// `iss` claim of issued tokens.
    pub issuer: String,

    /// Lifetime of issued session tokens.
    pub session_duration_secs: u64,

    /// HMAC key for session tokens. A random key is generated when unset.
    pub signing_secret: Option<SecretString>,

    /// Mark the nonce cookie `Secure`; enable when served over HTTPS.
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: "http://localhost:7007/api/auth".to_owned(),
            session_duration_secs: 3600,
            signing_secret: None,
            secure_cookies: false,
        }
    }
}
