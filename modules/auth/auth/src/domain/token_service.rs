use async_trait::async_trait;
use auth_sdk::{
    AuthError, Credential, IdentityKind, SignInIdentity, TokenClaims, TokenIssuer, TokenParams,
    TokenVerifier,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use tracing::{debug, warn};

use crate::config::AuthConfig;

/// `aud` claim of every session token.
pub const TOKEN_AUDIENCE: &str = "backstage";

/// Upper bound for `session_duration_secs` (ten years).
pub const MAX_SESSION_DURATION_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Signs and verifies HS256 session tokens.
pub struct TokenService {
    issuer: String,
    session_duration_secs: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    #[must_use]
    pub fn new(issuer: &str, session_duration_secs: i64, secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            issuer: issuer.to_owned(),
            session_duration_secs,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// # Errors
    ///
    /// Fails if the configured session duration is zero or out of range.
    pub fn from_config(cfg: &AuthConfig) -> anyhow::Result<Self> {
        let duration = Some(cfg.session_duration_secs)
            .filter(|d| (1..=MAX_SESSION_DURATION_SECS).contains(d))
            .and_then(|d| i64::try_from(d).ok())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "session_duration_secs must be between 1 and {MAX_SESSION_DURATION_SECS}, got {}",
                    cfg.session_duration_secs
                )
            })?;

        let service = match &cfg.signing_secret {
            Some(secret) => Self::new(&cfg.issuer, duration, secret.expose_secret().as_bytes()),
            None => {
                warn!(
                    "No signing_secret configured; using a random key. \
                     Sessions will not survive a restart."
                );
                Self::new(&cfg.issuer, duration, &rand::random::<[u8; 32]>())
            }
        };
        Ok(service)
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))
    }

    fn issue(&self, params: TokenParams) -> Result<Credential, AuthError> {
        let TokenParams { claims } = params;
        let ent = if claims.ent.is_empty() {
            vec![claims.sub.clone()]
        } else {
            claims.ent
        };

        let iat = chrono::Utc::now().timestamp();
        let exp = iat.checked_add(self.session_duration_secs).ok_or_else(|| {
            AuthError::TokenIssuance("session expiry overflows the timestamp range".to_owned())
        })?;
        let token_claims = TokenClaims {
            iss: self.issuer.clone(),
            aud: TOKEN_AUDIENCE.to_owned(),
            sub: claims.sub,
            ent,
            iat,
            exp,
        };
        let token = self.sign(&token_claims)?;
        debug!(sub = %token_claims.sub, exp = token_claims.exp, "Issued session token");

        Ok(Credential {
            token,
            expires_at: token_claims.exp,
            identity: SignInIdentity {
                kind: IdentityKind::User,
                user_entity_ref: token_claims.sub,
                ownership_entity_refs: token_claims.ent,
            },
        })
    }
}

#[async_trait]
impl TokenIssuer for TokenService {
    async fn issue_token(&self, params: TokenParams) -> Result<Credential, AuthError> {
        self.issue(params)
    }
}

impl TokenVerifier for TokenService {
    fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::Unauthorized(e.to_string()))
    }
}
