//! Recommendation handler

use axum::{body::Bytes, extract::State, Json};

use super::parse_body;
use crate::error::AppResult;
use crate::models::{ApiResponse, RecommendData, RecommendRequest};
use crate::AppState;

pub async fn recommend(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ApiResponse<RecommendData>>> {
    let req = RecommendRequest::from_json(&parse_body(&body)?);

    let recommendations = state
        .recommender
        .recommend(&req.student, &req.risk_label)
        .await;

    Ok(Json(ApiResponse::ok(RecommendData { recommendations })))
}
