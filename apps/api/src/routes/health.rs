use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness probe with the service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "active",
        "brain": "online",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
