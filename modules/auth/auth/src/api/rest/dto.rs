use auth_sdk::TokenClaims;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct StartQuery {
    pub env: Option<String>,
}

/// Query string of the upstream OAuth callback.
#[derive(Debug, Deserialize)]
pub struct FrameQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfoDto {
    pub claims: TokenClaims,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProvidersDto {
    pub providers: Vec<String>,
}
