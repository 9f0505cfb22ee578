pub mod error;
pub mod model;
pub mod policy;
pub mod service;

pub use error::DomainError;
pub use model::{AuthorizeDecision, Permission, PolicyQuery};
pub use policy::{AllowAllPolicy, PermissionPolicy, policy_for};
pub use service::PermissionService;
