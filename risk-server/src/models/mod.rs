//! Data models

pub mod student;

pub use student::*;

use serde::Serialize;

/// `{"success": true, "data": ...}` envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}
