use serde::{Deserialize, Serialize};

use crate::domain::{AuthorizeDecision, Permission, PolicyQuery};

#[derive(Debug, Deserialize)]
pub struct AuthorizeRequestDto {
    pub items: Vec<AuthorizeItemDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeItemDto {
    pub id: String,
    pub permission: Permission,
    #[serde(default)]
    pub resource_ref: Option<String>,
}

impl From<AuthorizeItemDto> for PolicyQuery {
    fn from(item: AuthorizeItemDto) -> Self {
        Self {
            permission: item.permission,
            resource_ref: item.resource_ref,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorizeResponseDto {
    pub items: Vec<DecisionDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DecisionDto {
    pub id: String,
    pub result: AuthorizeDecision,
}
