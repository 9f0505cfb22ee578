pub mod authenticator;
pub mod resolver;

pub use authenticator::GithubAuthenticator;
pub use resolver::GithubSignInResolver;
