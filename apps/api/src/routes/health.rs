use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api"
    }))
}

/// GET /
/// Static welcome payload pointing callers at the upload endpoint.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Resume Processing API!",
        "instructions": "Use /process_resume to upload a PDF and extract structured data."
    }))
}
