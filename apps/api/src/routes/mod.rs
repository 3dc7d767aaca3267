pub mod health;
pub mod predict;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Service banner listing the available endpoints.
async fn home() -> Json<Value> {
    Json(json!({
        "message": "Career Prediction API is running",
        "endpoints": {
            "health": "/health (GET)",
            "predict": "/predict (POST)"
        }
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health::health_handler))
        .route("/predict", post(predict::handle_predict))
        .with_state(state)
}
