use http::HeaderMap;
use http::header::AUTHORIZATION;

/// Token from an `Authorization: Bearer <token>` header, if present and non-empty.
#[must_use]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(str::trim))
        .filter(|t| !t.is_empty())
}
