use std::time::Duration;

use async_trait::async_trait;
use auth_sdk::{AuthError, FullProfile, OAuthAuthenticator, OAuthResult};
use reqwest::header::{ACCEPT, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::config::GithubAuthConfig;

const GITHUB_USER_AGENT: &str = concat!("bt-portal/", env!("CARGO_PKG_VERSION"));

/// Access token response of `POST /login/oauth/access_token`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    scope: String,
    error: Option<String>,
    error_description: Option<String>,
}

/// OAuth client for github.com or a GitHub Enterprise instance.
pub struct GithubAuthenticator {
    client: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    callback_url: String,
    authorization_url: Url,
    token_url: Url,
    user_profile_url: Url,
    scope: String,
}

impl GithubAuthenticator {
    /// # Errors
    ///
    /// Fails if credentials are missing, a URL does not parse, or the HTTP
    /// client cannot be built.
    pub fn from_config(cfg: &GithubAuthConfig) -> anyhow::Result<Self> {
        if cfg.client_id.is_empty() {
            anyhow::bail!("github-auth: client_id is required");
        }
        let client_secret = cfg
            .client_secret
            .clone()
            .ok_or_else(|| anyhow::anyhow!("github-auth: client_secret is required"))?;

        let parse = |name: &str, raw: &str| {
            Url::parse(raw).map_err(|e| anyhow::anyhow!("github-auth: invalid {name}: {e}"))
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            client_id: cfg.client_id.clone(),
            client_secret,
            callback_url: cfg.callback_url.clone(),
            authorization_url: parse("authorization_url", &cfg.authorization_url)?,
            token_url: parse("token_url", &cfg.token_url)?,
            user_profile_url: parse("user_profile_url", &cfg.user_profile_url)?,
            scope: cfg.scope.clone(),
        })
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AuthError> {
        let response = self
            .client
            .post(self.token_url.clone())
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
                ("code", code),
                ("redirect_uri", self.callback_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Authentication(format!("token exchange failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::Authentication(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AuthError::Authentication(format!("malformed token response: {e}")))
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<FullProfile, AuthError> {
        let response = self
            .client
            .get(self.user_profile_url.clone())
            .bearer_auth(access_token)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, GITHUB_USER_AGENT)
            .send()
            .await
            .map_err(|e| AuthError::Authentication(format!("profile fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::Authentication(format!(
                "profile fetch failed with status {}",
                response.status()
            )));
        }

        let raw = response
            .json::<Map<String, Value>>()
            .await
            .map_err(|e| AuthError::Authentication(format!("malformed profile: {e}")))?;
        Ok(profile_from_github(raw))
    }
}

fn take_string(raw: &mut Map<String, Value>, key: &str) -> Option<String> {
    match raw.remove(key)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Map a GitHub `/user` payload; unmapped fields land in `extra`.
fn profile_from_github(mut raw: Map<String, Value>) -> FullProfile {
    FullProfile {
        id: take_string(&mut raw, "id"),
        username: take_string(&mut raw, "login"),
        display_name: take_string(&mut raw, "name"),
        emails: take_string(&mut raw, "email").into_iter().collect(),
        photos: take_string(&mut raw, "avatar_url").into_iter().collect(),
        extra: raw,
    }
}

#[async_trait]
impl OAuthAuthenticator for GithubAuthenticator {
    fn authorize_url(&self, state: &str) -> Result<String, AuthError> {
        let mut url = self.authorization_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.callback_url)
            .append_pair("scope", &self.scope)
            .append_pair("state", state);
        Ok(url.into())
    }

    async fn authenticate(&self, code: &str) -> Result<OAuthResult, AuthError> {
        let token = self.exchange_code(code).await?;
        if let Some(error) = token.error {
            let detail = token.error_description.unwrap_or_default();
            return Err(AuthError::Authentication(format!(
                "GitHub rejected the authorization code: {error} {detail}"
            )));
        }
        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AuthError::Authentication("GitHub returned no access token".to_owned())
            })?;

        let full_profile = self.fetch_profile(&access_token).await?;
        debug!(login = ?full_profile.username, "Fetched GitHub profile");

        Ok(OAuthResult {
            full_profile,
            access_token: SecretString::from(access_token),
            scope: token.scope,
        })
    }
}
