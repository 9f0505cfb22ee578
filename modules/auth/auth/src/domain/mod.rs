pub mod context;
pub mod registry;
pub mod service;
pub mod token_service;

pub use context::IssuerContext;
pub use registry::ProviderRegistry;
pub use service::AuthService;
pub use token_service::TokenService;
