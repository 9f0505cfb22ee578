use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::cookies::NonceCookie;
use crate::api::rest::handlers;
use crate::domain::AuthService;

/// Mount the `/api/auth` routes on `router`.
#[must_use]
pub fn register_routes(router: Router, service: Arc<AuthService>, cookie: NonceCookie) -> Router {
    let auth = Router::new()
        .route("/api/auth/v1/userinfo", get(handlers::user_info))
        .route("/api/auth/v1/providers", get(handlers::list_providers))
        .route("/api/auth/{provider}/start", get(handlers::start))
        .route("/api/auth/{provider}/handler/frame", get(handlers::frame_handler))
        .route("/api/auth/{provider}/refresh", post(handlers::refresh))
        .layer(Extension(service))
        .layer(Extension(cookie));

    router.merge(auth)
}
