//! Route classification.
//!
//! Maps a request path to the logical downstream service it represents.
//! Rules are an ordered table of (path segment, service label) pairs;
//! the first matching segment wins, so the drone rule shadows everything
//! that might share a path with it.

/// Label for requests forwarded to the ERP server.
pub const ERP_SERVER: &str = "ERP Server";

/// Label for requests forwarded to the MES server.
pub const MES_SERVER: &str = "MES Server";

/// Label for requests forwarded to the drone image server.
pub const DRONE_SERVER: &str = "Drone Server";

/// Label for requests the gateway answers itself.
pub const API_GATEWAY: &str = "API Gateway";

const RULES: &[(&str, &str)] = &[
    ("drone-images", DRONE_SERVER),
    ("employees", ERP_SERVER),
    ("sales-orders", ERP_SERVER),
    ("project-plans", ERP_SERVER),
    ("positions", ERP_SERVER),
    ("inventory", ERP_SERVER),
    ("materials", ERP_SERVER),
    ("purchase-orders", ERP_SERVER),
    ("boms", ERP_SERVER),
    ("shipments", MES_SERVER),
];

/// Classify a request path into a service label.
pub fn classify(path: &str) -> &'static str {
    for (segment, service) in RULES {
        if path.split('/').any(|s| s == *segment) {
            return service;
        }
    }
    API_GATEWAY
}
