//! Generic OAuth redirect flow shared by upstream providers.
//!
//! An [`OAuthProvider`] pairs an [`OAuthAuthenticator`] (talks to the upstream
//! identity provider) with a [`SignInResolver`] (maps the upstream profile to
//! an internal identity).

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::AuthProvider;
use crate::error::AuthError;
use crate::models::{
    FrameRequest, OAuthResult, ProfileInfo, SignInResponse, StartRequest, StartResponse,
};
use crate::resolver::{AuthResolverContext, SignInResolver};

/// Upstream half of an OAuth provider.
#[async_trait]
pub trait OAuthAuthenticator: Send + Sync {
    /// URL of the upstream consent page carrying `state`.
    ///
    /// # Errors
    ///
    /// - `Internal` if the configured authorization URL is unusable
    fn authorize_url(&self, state: &str) -> Result<String, AuthError>;

    /// Exchange an authorization code for an access token and fetch the profile.
    ///
    /// # Errors
    ///
    /// - `Authentication` if the upstream rejects the code or the profile fetch fails
    async fn authenticate(&self, code: &str) -> Result<OAuthResult, AuthError>;
}

/// Round-tripped through the upstream provider in the `state` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthState {
    pub nonce: String,
    pub env: String,
}

impl OAuthState {
    /// `base64url(json)` without padding.
    ///
    /// # Errors
    ///
    /// - `Internal` if serialization fails
    pub fn encode(&self) -> Result<String, AuthError> {
        let json = serde_json::to_vec(self).map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// # Errors
    ///
    /// - `Authentication` if `raw` is not a state produced by [`Self::encode`]
    pub fn decode(raw: &str) -> Result<Self, AuthError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(raw)
            .map_err(|_| AuthError::Authentication("malformed OAuth state".to_owned()))?;
        serde_json::from_slice(&bytes)
            .map_err(|_| AuthError::Authentication("malformed OAuth state".to_owned()))
    }
}

fn generate_nonce() -> String {
    URL_SAFE_NO_PAD.encode(rand::random::<[u8; 16]>())
}

pub struct OAuthProvider<A, R> {
    authenticator: A,
    resolver: R,
}

impl<A, R> OAuthProvider<A, R>
where
    A: OAuthAuthenticator,
    R: SignInResolver,
{
    #[must_use]
    pub fn new(authenticator: A, resolver: R) -> Self {
        Self {
            authenticator,
            resolver,
        }
    }

    fn check_state(req: &FrameRequest) -> Result<(), AuthError> {
        let state = req
            .state
            .as_deref()
            .ok_or_else(|| AuthError::Authentication("missing OAuth state".to_owned()))?;
        let state = OAuthState::decode(state)?;

        match req.nonce_cookie.as_deref() {
            Some(cookie) if !cookie.is_empty() && nonce_matches(cookie, &state.nonce) => Ok(()),
            Some(_) => Err(AuthError::Authentication("invalid nonce".to_owned())),
            None => Err(AuthError::Authentication("auth nonce cookie missing".to_owned())),
        }
    }
}

/// Byte comparison that does not stop at the first mismatch.
fn nonce_matches(cookie: &str, expected: &str) -> bool {
    cookie.len() == expected.len()
        && cookie
            .bytes()
            .zip(expected.bytes())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

#[async_trait]
impl<A, R> AuthProvider for OAuthProvider<A, R>
where
    A: OAuthAuthenticator,
    R: SignInResolver,
{
    async fn start(&self, req: &StartRequest) -> Result<StartResponse, AuthError> {
        let nonce = generate_nonce();
        let state = OAuthState {
            nonce: nonce.clone(),
            env: req.env.clone(),
        }
        .encode()?;
        let url = self.authenticator.authorize_url(&state)?;
        Ok(StartResponse { url, nonce })
    }

    async fn frame_handler(
        &self,
        req: &FrameRequest,
        ctx: &dyn AuthResolverContext,
    ) -> Result<SignInResponse, AuthError> {
        if let Some(error) = &req.error {
            return Err(AuthError::Authentication(format!(
                "upstream provider returned `{error}`"
            )));
        }
        Self::check_state(req)?;
        let code = req
            .code
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AuthError::Authentication("missing authorization code".to_owned()))?;

        let result = self.authenticator.authenticate(code).await?;
        let credential = self.resolver.resolve(&result, ctx).await?;
        debug!(user = %credential.identity.user_entity_ref, "OAuth sign-in resolved");

        Ok(SignInResponse {
            profile: ProfileInfo::from(&result.full_profile),
            backstage_identity: credential,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use secrecy::SecretString;

    use super::*;
    use crate::entity_ref::EntityRef;
    use crate::models::{
        Credential, FullProfile, IdentityClaims, IdentityKind, SignInIdentity, TokenParams,
    };

    #[derive(Default)]
    struct FakeAuthenticator {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl OAuthAuthenticator for FakeAuthenticator {
        fn authorize_url(&self, state: &str) -> Result<String, AuthError> {
            Ok(format!("https://idp.test/authorize?state={state}"))
        }

        async fn authenticate(&self, code: &str) -> Result<OAuthResult, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OAuthResult {
                full_profile: FullProfile {
                    username: Some(code.to_owned()),
                    emails: vec!["dev@example.com".to_owned()],
                    ..FullProfile::default()
                },
                access_token: SecretString::from("upstream".to_owned()),
                scope: "read:user".to_owned(),
            })
        }
    }

    struct UsernameResolver;

    #[async_trait]
    impl SignInResolver for UsernameResolver {
        async fn resolve(
            &self,
            result: &OAuthResult,
            ctx: &dyn AuthResolverContext,
        ) -> Result<Credential, AuthError> {
            let name = result.full_profile.username.clone().unwrap_or_default();
            ctx.issue_token(TokenParams {
                claims: IdentityClaims::for_user(EntityRef::user(&name)),
            })
            .await
        }
    }

    struct EchoContext;

    #[async_trait]
    impl AuthResolverContext for EchoContext {
        async fn issue_token(&self, params: TokenParams) -> Result<Credential, AuthError> {
            Ok(Credential {
                token: format!("token-for-{}", params.claims.sub),
                expires_at: 0,
                identity: SignInIdentity {
                    kind: IdentityKind::User,
                    user_entity_ref: params.claims.sub,
                    ownership_entity_refs: params.claims.ent,
                },
            })
        }
    }

    fn provider() -> (OAuthProvider<FakeAuthenticator, UsernameResolver>, Arc<AtomicUsize>) {
        let authenticator = FakeAuthenticator::default();
        let calls = Arc::clone(&authenticator.calls);
        (OAuthProvider::new(authenticator, UsernameResolver), calls)
    }

    fn state_for(nonce: &str) -> String {
        OAuthState {
            nonce: nonce.to_owned(),
            env: "development".to_owned(),
        }
        .encode()
        .unwrap()
    }

    #[test]
    fn state_survives_encoding() {
        let state = OAuthState {
            nonce: "abc".to_owned(),
            env: "production".to_owned(),
        };
        assert_eq!(OAuthState::decode(&state.encode().unwrap()).unwrap(), state);
        assert!(OAuthState::decode("%%%").is_err());
    }

    #[tokio::test]
    async fn start_embeds_state_with_returned_nonce() {
        let (provider, _) = provider();
        let resp = provider
            .start(&StartRequest {
                env: "development".to_owned(),
            })
            .await
            .unwrap();

        let state = resp.url.split("state=").nth(1).unwrap();
        let decoded = OAuthState::decode(state).unwrap();
        assert_eq!(decoded.nonce, resp.nonce);
        assert_eq!(decoded.env, "development");
    }

    #[tokio::test]
    async fn frame_handler_resolves_identity() {
        let (provider, calls) = provider();
        let req = FrameRequest {
            code: Some("octocat".to_owned()),
            state: Some(state_for("n1")),
            error: None,
            nonce_cookie: Some("n1".to_owned()),
        };

        let resp = provider.frame_handler(&req, &EchoContext).await.unwrap();
        assert_eq!(
            resp.backstage_identity.identity.user_entity_ref.to_string(),
            "user:default/octocat"
        );
        assert_eq!(resp.profile.email.as_deref(), Some("dev@example.com"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn nonce_mismatch_is_rejected_before_code_exchange() {
        let (provider, calls) = provider();
        for cookie in [Some("other".to_owned()), None, Some(String::new())] {
            let req = FrameRequest {
                code: Some("octocat".to_owned()),
                state: Some(state_for("n1")),
                error: None,
                nonce_cookie: cookie,
            };
            let err = provider.frame_handler(&req, &EchoContext).await.unwrap_err();
            assert!(matches!(err, AuthError::Authentication(_)));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upstream_error_and_missing_code_fail_authentication() {
        let (provider, calls) = provider();

        let denied = FrameRequest {
            error: Some("access_denied".to_owned()),
            ..FrameRequest::default()
        };
        let err = provider.frame_handler(&denied, &EchoContext).await.unwrap_err();
        assert!(err.to_string().contains("access_denied"));

        let no_code = FrameRequest {
            state: Some(state_for("n1")),
            nonce_cookie: Some("n1".to_owned()),
            ..FrameRequest::default()
        };
        let err = provider.frame_handler(&no_code, &EchoContext).await.unwrap_err();
        assert!(matches!(err, AuthError::Authentication(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn refresh_is_not_supported() {
        let (provider, _) = provider();
        let err = provider.refresh(&EchoContext).await.unwrap_err();
        assert!(matches!(err, AuthError::NotSupported("refresh")));
    }

    #[test]
    fn nonce_comparison_requires_exact_match() {
        assert!(nonce_matches("c29tZS1ub25jZQ", "c29tZS1ub25jZQ"));
        assert!(!nonce_matches("c29tZS1ub25jZQ", "c29tZS1ub25jZR"));
        assert!(!nonce_matches("c29tZS1ub25jZQ", "c29tZS1ub25j"));
        assert!(!nonce_matches("", "c29tZS1ub25jZQ"));
    }
}
