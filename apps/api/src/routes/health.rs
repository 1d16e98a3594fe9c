use axum::Json;
use serde_json::{json, Value};

/// GET /hello
/// Fixed liveness payload.
pub async fn hello_handler() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}
