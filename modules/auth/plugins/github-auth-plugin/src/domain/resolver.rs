use async_trait::async_trait;
use auth_sdk::{
    AuthError, AuthResolverContext, Credential, EntityRef, IdentityClaims,
    IdentityResolutionError, OAuthResult, SignInResolver, TokenParams,
};

/// Signs GitHub users in as `user:default/<login>`, with the login lowercased.
///
/// GitHub logins are case-insensitive, so `OctoCat` and `octocat` resolve to
/// the same internal user.
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubSignInResolver;

impl GithubSignInResolver {
    /// Internal user reference for an upstream profile.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityResolutionError`] if the profile has no username or
    /// only whitespace.
    pub fn user_ref(result: &OAuthResult) -> Result<EntityRef, IdentityResolutionError> {
        let username = result
            .full_profile
            .username
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| IdentityResolutionError::missing("username"))?;

        Ok(EntityRef::user(&username.to_lowercase()))
    }
}

#[async_trait]
impl SignInResolver for GithubSignInResolver {
    async fn resolve(
        &self,
        result: &OAuthResult,
        ctx: &dyn AuthResolverContext,
    ) -> Result<Credential, AuthError> {
        let user_ref = Self::user_ref(result)?;

        ctx.issue_token(TokenParams {
            claims: IdentityClaims::for_user(user_ref),
        })
        .await
    }
}
