//! Identity echo endpoint.
//!
//! Returns the request-scoped identity the authentication interceptor
//! installed, so clients (and tests) can see who the gateway thinks they
//! are.

use axum::extract::Request;
use axum::Json;
use serde_json::json;

use crate::middleware::auth::AuthenticatedIdentity;

pub async fn whoami(req: Request) -> Json<serde_json::Value> {
    if let Some(identity) = req.extensions().get::<AuthenticatedIdentity>() {
        Json(json!({
            "subject_id": identity.subject_id,
            "role": identity.role.as_str(),
            "authority": identity.authority,
        }))
    } else {
        Json(json!({ "subject_id": null, "role": null, "authority": null }))
    }
}
