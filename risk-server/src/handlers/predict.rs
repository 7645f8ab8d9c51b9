//! Prediction handler

use axum::{body::Bytes, extract::State, Json};
use dropout_core::StudentObservation;

use super::parse_body;
use crate::error::{AppError, AppResult};
use crate::models::{ApiResponse, Explanation, PredictData};
use crate::AppState;

pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ApiResponse<PredictData>>> {
    let student = StudentObservation::from_json(&parse_body(&body)?);

    let predictor = state.predictor.clone();
    let input = student.clone();
    let prediction = tokio::task::spawn_blocking(move || predictor.predict(&input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    tracing::debug!(
        risk = %prediction.risk_level,
        confidence = prediction.confidence,
        "prediction"
    );

    let recommendations = state
        .recommender
        .recommend(&student, &prediction.risk_level)
        .await;

    Ok(Json(ApiResponse::ok(PredictData {
        explanation: Explanation::from(&student),
        prediction,
        recommendations,
    })))
}
