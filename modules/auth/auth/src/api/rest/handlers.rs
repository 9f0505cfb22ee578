use std::sync::Arc;

use auth_sdk::{FrameRequest, SignInResponse, StartRequest};
use axum::extract::{Extension, Path, Query};
use axum::response::{IntoResponse, Response};
use axum::{Json, http::HeaderMap};
use http::StatusCode;
use http::header::{LOCATION, SET_COOKIE};
use portalkit::api::{ApiResult, Problem, extract_bearer_token};
use tracing::field::Empty;

use crate::api::rest::cookies::NonceCookie;
use crate::api::rest::dto::{FrameQuery, ProvidersDto, StartQuery, UserInfoDto};
use crate::api::rest::error::auth_error_to_problem;
use crate::domain::AuthService;

/// Redirect the browser to the provider's consent page.
#[tracing::instrument(skip(svc, cookie, query), fields(request_id = Empty))]
pub async fn start(
    Extension(svc): Extension<Arc<AuthService>>,
    Extension(cookie): Extension<NonceCookie>,
    Path(provider): Path<String>,
    Query(query): Query<StartQuery>,
) -> ApiResult<Response> {
    let env = query
        .env
        .filter(|e| !e.is_empty())
        .ok_or_else(|| Problem::bad_request("No env provided in request query parameters"))?;

    let resp = svc
        .start(&provider, &StartRequest { env })
        .await
        .map_err(auth_error_to_problem)?;

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, resp.url),
            (SET_COOKIE, cookie.set(&provider, &resp.nonce)),
        ],
    )
        .into_response())
}

/// OAuth callback: validate the nonce, complete the handshake and sign in.
#[tracing::instrument(skip(svc, cookie, query, headers), fields(request_id = Empty))]
pub async fn frame_handler(
    Extension(svc): Extension<Arc<AuthService>>,
    Extension(cookie): Extension<NonceCookie>,
    Path(provider): Path<String>,
    Query(query): Query<FrameQuery>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let req = FrameRequest {
        code: query.code,
        state: query.state,
        error: query.error,
        nonce_cookie: NonceCookie::read(&headers, &provider),
    };

    let resp = svc
        .frame_handler(&provider, &req)
        .await
        .map_err(auth_error_to_problem)?;

    Ok(([(SET_COOKIE, cookie.clear(&provider))], Json(resp)).into_response())
}

#[tracing::instrument(skip(svc), fields(request_id = Empty))]
pub async fn refresh(
    Extension(svc): Extension<Arc<AuthService>>,
    Path(provider): Path<String>,
) -> ApiResult<Json<SignInResponse>> {
    let resp = svc.refresh(&provider).await.map_err(auth_error_to_problem)?;
    Ok(Json(resp))
}

/// Claims of the caller's session token.
#[tracing::instrument(skip_all, fields(request_id = Empty))]
pub async fn user_info(
    Extension(svc): Extension<Arc<AuthService>>,
    headers: HeaderMap,
) -> ApiResult<Json<UserInfoDto>> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| Problem::unauthorized("Missing bearer token"))?;
    let claims = svc.user_info(token).map_err(auth_error_to_problem)?;
    Ok(Json(UserInfoDto { claims }))
}

pub async fn list_providers(Extension(svc): Extension<Arc<AuthService>>) -> Json<ProvidersDto> {
    Json(ProvidersDto {
        providers: svc.provider_ids(),
    })
}
