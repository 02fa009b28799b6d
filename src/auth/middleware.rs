//! Bearer-token middleware.
//!
//! Two variants: [`require_auth`] rejects requests without a valid
//! token, [`optional_auth`] lets them through either way. Both attach
//! the decoded identity to the request's extensions, scoped to that
//! single request.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity decoded from a verified token, available to handlers via
/// `Extension<AuthUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Rejects the request unless it carries a valid, unexpired token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return ApiError::unauthorized("Authentication required").into_response();
    };

    match state.tokens.verify(token) {
        Some(user_id) => {
            request.extensions_mut().insert(AuthUser { user_id });
            next.run(request).await
        }
        None => ApiError::unauthorized("Invalid or expired token").into_response(),
    }
}

/// Attaches the identity when a valid token is present, but never
/// rejects. Downstream logic decides whether it needs one.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(user_id) = bearer_token(request.headers()).and_then(|t| state.tokens.verify(t)) {
        request.extensions_mut().insert(AuthUser { user_id });
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        let headers = headers_with_auth("Bearer abc.def");
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let headers = headers_with_auth("Basic dXNlcjpwdw==");
        assert_eq!(bearer_token(&headers), None);
    }
}
