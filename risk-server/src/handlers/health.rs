//! Liveness and health handlers

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    environment: String,
    model: ModelInfo,
}

#[derive(Serialize)]
pub struct ModelInfo {
    classes: Vec<String>,
    fee_classes: Vec<String>,
    llm_enabled: bool,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Dropout risk service is running" }))
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        environment: state.config.environment.clone(),
        model: ModelInfo {
            classes: state.predictor.risk_classes().to_vec(),
            fee_classes: state.predictor.fee_classes().to_vec(),
            llm_enabled: state.recommender.llm_enabled(),
        },
    })
}
