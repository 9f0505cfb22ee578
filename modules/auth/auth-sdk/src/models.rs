use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::entity_ref::EntityRef;

/// Identity claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// The signed-in user.
    pub sub: EntityRef,
    /// Ownership references (the user itself plus any groups).
    #[serde(default)]
    pub ent: Vec<EntityRef>,
}

impl IdentityClaims {
    /// Claims for a user that owns nothing but itself.
    #[must_use]
    pub fn for_user(user: EntityRef) -> Self {
        Self {
            ent: vec![user.clone()],
            sub: user,
        }
    }
}

/// Input to token issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParams {
    pub claims: IdentityClaims,
}

/// Full set of claims encoded in an issued session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    pub aud: String,
    pub sub: EntityRef,
    pub ent: Vec<EntityRef>,
    pub iat: i64,
    pub exp: i64,
}

/// Identity portion of an issued credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInIdentity {
    #[serde(rename = "type")]
    pub kind: IdentityKind,
    pub user_entity_ref: EntityRef,
    pub ownership_entity_refs: Vec<EntityRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    User,
}

/// A signed session credential handed back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub token: String,
    /// Unix timestamp (seconds) after which the token is rejected.
    pub expires_at: i64,
    pub identity: SignInIdentity,
}

/// Profile returned by the upstream identity provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullProfile {
    pub id: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    /// Remaining upstream fields, kept verbatim.
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Outcome of a completed OAuth handshake.
#[derive(Debug)]
pub struct OAuthResult {
    pub full_profile: FullProfile,
    pub access_token: SecretString,
    pub scope: String,
}

/// Public profile summary returned to the client after sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl From<&FullProfile> for ProfileInfo {
    fn from(profile: &FullProfile) -> Self {
        Self {
            display_name: profile.display_name.clone(),
            email: profile.emails.first().cloned(),
            picture: profile.photos.first().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub profile: ProfileInfo,
    pub backstage_identity: Credential,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartRequest {
    /// Deployment environment the client is signing in to.
    pub env: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartResponse {
    /// Where to redirect the browser.
    pub url: String,
    /// Value to store in the `<provider>-nonce` cookie.
    pub nonce: String,
}

/// Parameters of the OAuth callback request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameRequest {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Error reported by the upstream provider (e.g. `access_denied`).
    pub error: Option<String>,
    /// Nonce read back from the `<provider>-nonce` cookie.
    pub nonce_cookie: Option<String>,
}
