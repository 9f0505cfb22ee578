use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named permission and its attributes (e.g. `action: read`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub name: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

/// One question put to the policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyQuery {
    pub permission: Permission,
    pub resource_ref: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizeDecision {
    Allow,
    Deny,
}
