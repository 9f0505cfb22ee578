use async_trait::async_trait;
use auth_sdk::{
    AuthError, AuthProvider, AuthResolverContext, EntityRef, IdentityClaims, ProfileInfo,
    SignInResponse, TokenParams,
};

/// Signs every caller in as the same guest user.
pub struct GuestProvider {
    user_ref: EntityRef,
}

impl GuestProvider {
    #[must_use]
    pub fn new(user_ref: EntityRef) -> Self {
        Self { user_ref }
    }
}

#[async_trait]
impl AuthProvider for GuestProvider {
    async fn refresh(&self, ctx: &dyn AuthResolverContext) -> Result<SignInResponse, AuthError> {
        let credential = ctx
            .issue_token(TokenParams {
                claims: IdentityClaims::for_user(self.user_ref.clone()),
            })
            .await?;

        Ok(SignInResponse {
            profile: ProfileInfo {
                display_name: Some("Guest".to_owned()),
                ..ProfileInfo::default()
            },
            backstage_identity: credential,
        })
    }
}
