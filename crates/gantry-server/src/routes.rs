//! Router assembly.
//!
//! All proxied routes live under `/gateway` and run through the
//! interception pipeline; `/healthz` stays outside it.

use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::{middleware, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    boms, dashboard, drone_images, employees, inventory, logs, materials, positions,
    project_plans, purchase_orders, sales_orders, shipments, whoami,
};
use crate::middleware::{audit, auth};
use crate::state::AppState;

/// Build the gateway application.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origin);

    Router::new()
        .route(
            "/gateway/employees",
            get(employees::list).post(employees::create),
        )
        .route(
            "/gateway/employees/{employee_id}",
            put(employees::update).delete(employees::remove),
        )
        .route(
            "/gateway/materials",
            get(materials::list).post(materials::create),
        )
        .route(
            "/gateway/materials/{material_id}",
            get(materials::fetch).delete(materials::remove),
        )
        .route("/gateway/inventory", get(inventory::list))
        .route("/gateway/inventory/deduct", post(inventory::deduct))
        .route("/gateway/inventory/restore", post(inventory::restore))
        .route("/gateway/inventory/update", put(inventory::update))
        .route(
            "/gateway/sales-orders",
            get(sales_orders::list).post(sales_orders::create),
        )
        .route(
            "/gateway/sales-orders/{sales_order_id}",
            put(sales_orders::update).delete(sales_orders::remove),
        )
        .route("/gateway/positions", get(positions::list))
        .route("/gateway/project-plans", get(project_plans::list))
        .route(
            "/gateway/project-plans/{plan_id}/progress",
            put(project_plans::update_progress),
        )
        .route("/gateway/purchase-orders", get(purchase_orders::list))
        .route("/gateway/boms", get(boms::list))
        .route(
            "/gateway/shipments/by-order/{sales_order_id}",
            get(shipments::by_order),
        )
        .route("/gateway/drone-images", get(drone_images::list))
        .route("/gateway/drone-images/{image_id}", get(drone_images::fetch))
        .route("/gateway/drone-images/upload", post(drone_images::upload))
        .route("/gateway/dashboard/projects", get(dashboard::projects))
        .route("/gateway/dashboard/customers", get(dashboard::customers))
        .route("/gateway/dashboard/materials", get(dashboard::materials))
        .route(
            "/gateway/dashboard/purchase-orders",
            get(dashboard::purchase_orders),
        )
        .route(
            "/gateway/dashboard/project-plans",
            get(dashboard::project_plans),
        )
        .route(
            "/gateway/dashboard/sales-orders",
            get(dashboard::sales_orders),
        )
        .route("/gateway/dashboard/employees", get(dashboard::employees))
        .route("/gateway/whoami", get(whoami::whoami))
        .route("/gateway/logs", get(logs::list).post(logs::ingest))
        // Pipeline order, outermost last: authenticate → audit → policy.
        .layer(middleware::from_fn(auth::require_authentication))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            audit::record_cycle,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "gantry-server" }))
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            tracing::warn!(allowed_origin, "invalid CORS origin, allowing none");
            CorsLayer::new()
        }
    }
}
