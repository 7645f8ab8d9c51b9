//! Configuration module

use std::env;

use dropout_core::constants::{self, DEFAULT_PORT, GEMINI_TIMEOUT_SECS};
use dropout_core::GeminiConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Model bundle written by `train`
    pub model_path: String,

    /// Gemini key; `None` disables generative recommendations
    pub gemini_api_key: Option<String>,

    pub gemini_model: String,

    pub gemini_api_base: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),

            model_path: constants::get_model_path(),

            gemini_api_key: constants::get_gemini_api_key(),

            gemini_model: constants::get_gemini_model(),

            gemini_api_base: constants::get_gemini_api_base(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn gemini(&self) -> Option<GeminiConfig> {
        self.gemini_api_key.as_ref().map(|key| GeminiConfig {
            api_key: key.clone(),
            model: self.gemini_model.clone(),
            api_base: self.gemini_api_base.clone(),
            timeout_secs: GEMINI_TIMEOUT_SECS,
        })
    }
}
