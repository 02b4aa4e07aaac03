//! 헬스 체크 핸들러

use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "adk-registry",
    }))
}
