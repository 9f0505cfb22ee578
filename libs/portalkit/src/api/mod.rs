//! HTTP helpers shared by module REST layers.

pub mod bearer;
pub mod problem;

pub use bearer::extract_bearer_token;
pub use problem::{ApiResult, Problem};
