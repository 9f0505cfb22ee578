//! Configuration for the GitHub auth plugin.

use secrecy::SecretString;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubAuthConfig {
    /// OAuth app client id.
    pub client_id: String,

    /// OAuth app client secret.
    pub client_secret: Option<SecretString>,

    /// Redirect URI registered with the OAuth app.
    pub callback_url: String,

    pub authorization_url: String,
    pub token_url: String,
    pub user_profile_url: String,

    /// Space-separated OAuth scopes.
    pub scope: String,

    /// Timeout for each request to GitHub.
    pub timeout_secs: u64,
}

impl Default for GithubAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: None,
            callback_url: "http://localhost:7007/api/auth/github/handler/frame".to_owned(),
            authorization_url: "https://github.com/login/oauth/authorize".to_owned(),
            token_url: "https://github.com/login/oauth/access_token".to_owned(),
            user_profile_url: "https://api.github.com/user".to_owned(),
            scope: "read:user".to_owned(),
            timeout_secs: 10,
        }
    }
}
