use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Always 200; `status` flips to "degraded" when no model is loaded.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model_loaded = state.predictor.is_some();
    Json(json!({
        "status": if model_loaded { "ok" } else { "degraded" },
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "model_loaded": model_loaded,
    }))
}
