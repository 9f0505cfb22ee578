use std::sync::Arc;

use async_trait::async_trait;
use auth_sdk::TokenClaims;

use crate::config::PolicyKind;
use crate::domain::model::{AuthorizeDecision, PolicyQuery};

/// Decides whether `user` may exercise a permission.
#[async_trait]
pub trait PermissionPolicy: Send + Sync {
    async fn handle(&self, query: &PolicyQuery, user: &TokenClaims) -> AuthorizeDecision;
}

#[derive(Debug, Default)]
pub struct AllowAllPolicy;

#[async_trait]
impl PermissionPolicy for AllowAllPolicy {
    async fn handle(&self, _query: &PolicyQuery, _user: &TokenClaims) -> AuthorizeDecision {
        AuthorizeDecision::Allow
    }
}

/// Policy instance for the configured kind.
#[must_use]
pub fn policy_for(kind: PolicyKind) -> Arc<dyn PermissionPolicy> {
    match kind {
        PolicyKind::AllowAll => Arc::new(AllowAllPolicy),
    }
}
