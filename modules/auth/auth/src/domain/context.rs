use std::sync::Arc;

use async_trait::async_trait;
use auth_sdk::{AuthError, AuthResolverContext, Credential, TokenIssuer, TokenParams};

/// Resolver context backed by the module's token issuer.
#[derive(Clone)]
pub struct IssuerContext {
    issuer: Arc<dyn TokenIssuer>,
}

impl IssuerContext {
    #[must_use]
    pub fn new(issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { issuer }
    }
}

#[async_trait]
impl AuthResolverContext for IssuerContext {
    async fn issue_token(&self, params: TokenParams) -> Result<Credential, AuthError> {
        self.issuer.issue_token(params).await
    }
}
