use std::sync::Arc;

use axum::routing::post;
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::PermissionService;

#[must_use]
pub fn register_routes(router: Router, service: Arc<PermissionService>) -> Router {
    router.merge(
        Router::new()
            .route("/api/permission/authorize", post(handlers::authorize))
            .layer(Extension(service)),
    )
}
