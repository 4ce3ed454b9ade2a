//! Authentication interceptor and route policy.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use gantry_jwt::Role;
use std::sync::Arc;

use crate::state::AppState;

/// Request-scoped authenticated identity.
///
/// Present in request extensions only when the bearer token was valid,
/// unexpired, and carried a recognized role. Dropped with the request.
#[derive(Clone, Debug)]
pub struct AuthenticatedIdentity {
    pub subject_id: String,
    pub role: Role,
    /// Authorization capability derived from the role, e.g. `ROLE_MANAGER`.
    pub authority: String,
}

/// Axum middleware establishing the authenticated identity:
/// - extract the `Authorization: Bearer` token, if any
/// - verify signature and expiry
/// - accept only recognized roles
///
/// This middleware never rejects a request itself; whether an identity is
/// required is the route policy's decision ([`require_authentication`]).
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        if let Some(claims) = state.validator.claims(&token) {
            match Role::from_claim(&claims.role) {
                Some(role) => {
                    req.extensions_mut().insert(AuthenticatedIdentity {
                        subject_id: claims.sub,
                        authority: role.authority(),
                        role,
                    });
                }
                None => {
                    tracing::debug!(role = %claims.role, "unrecognized role claim, proceeding unauthenticated");
                }
            }
        }
    }

    next.run(req).await
}

/// Route policy: reject with 401 when no identity was installed.
pub async fn require_authentication(req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthenticatedIdentity>().is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(req).await
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    let rest = value.strip_prefix("Bearer ")?.trim();
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            bearer_token(&headers_with("Bearer abc.def.ghi")),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&headers_with("Basic dXNlcg==")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&headers_with("bearer abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
