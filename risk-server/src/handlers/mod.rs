//! HTTP handlers

pub mod health;
pub mod predict;
pub mod recommend;

use axum::body::Bytes;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Empty or whitespace-only bodies count as `{}`
pub(crate) fn parse_body(body: &Bytes) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(body).map_err(|e| AppError::InvalidJson(e.to_string()))
}
