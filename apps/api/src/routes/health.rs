use axum::Json;
use serde_json::{json, Value};

/// GET /api/health
/// Always 200; does not probe any dependency.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Resume Enhancement API is running"
    }))
}
