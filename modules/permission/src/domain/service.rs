use std::sync::Arc;

use auth_sdk::TokenVerifier;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::model::{AuthorizeDecision, PolicyQuery};
use crate::domain::policy::PermissionPolicy;

pub struct PermissionService {
    policy: Arc<dyn PermissionPolicy>,
    verifier: Arc<dyn TokenVerifier>,
}

impl PermissionService {
    #[must_use]
    pub fn new(policy: Arc<dyn PermissionPolicy>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { policy, verifier }
    }

    /// One decision per query, in query order.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if `token` is not a valid session token.
    pub async fn authorize(
        &self,
        token: &str,
        queries: &[PolicyQuery],
    ) -> Result<Vec<AuthorizeDecision>, DomainError> {
        let user = self.verifier.verify_token(token)?;

        let mut decisions = Vec::with_capacity(queries.len());
        for query in queries {
            decisions.push(self.policy.handle(query, &user).await);
        }

        debug!(user = %user.sub, count = decisions.len(), "Evaluated permission requests");
        Ok(decisions)
    }
}
