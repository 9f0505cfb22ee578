use std::sync::Arc;

use axum::extract::Extension;
use axum::http::HeaderMap;
use axum::Json;
use portalkit::api::{ApiResult, Problem, extract_bearer_token};
use tracing::field::Empty;

use crate::api::rest::dto::{AuthorizeRequestDto, AuthorizeResponseDto, DecisionDto};
use crate::domain::{PermissionService, PolicyQuery};

/// Evaluate a batch of permission requests for the caller.
#[tracing::instrument(skip_all, fields(items = req.items.len(), request_id = Empty))]
pub async fn authorize(
    Extension(svc): Extension<Arc<PermissionService>>,
    headers: HeaderMap,
    Json(req): Json<AuthorizeRequestDto>,
) -> ApiResult<Json<AuthorizeResponseDto>> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| Problem::unauthorized("Missing bearer token"))?;

    let (ids, queries): (Vec<String>, Vec<PolicyQuery>) = req
        .items
        .into_iter()
        .map(|item| (item.id.clone(), PolicyQuery::from(item)))
        .unzip();

    let decisions = svc.authorize(token, &queries).await?;

    Ok(Json(AuthorizeResponseDto {
        items: ids
            .into_iter()
            .zip(decisions)
            .map(|(id, result)| DecisionDto { id, result })
            .collect(),
    }))
}
