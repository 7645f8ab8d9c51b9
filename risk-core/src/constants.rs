//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! The server and the `train` binary both read from here.

/// Default bundle path (trainer output, server input)
pub const DEFAULT_MODEL_PATH: &str = "model.bundle";

/// Default HTTP port for the prediction service
pub const DEFAULT_PORT: u16 = 5001;

/// Default Gemini model used for generative recommendations
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fixed client-side timeout for the generative call (seconds)
pub const GEMINI_TIMEOUT_SECS: u64 = 30;

/// Number of trees in the ensemble
pub const DEFAULT_TREES: usize = 200;

/// Seed for the train/test split and bootstrap resampling
pub const DEFAULT_SEED: u64 = 42;

/// Held-out fraction for evaluation
pub const DEFAULT_TEST_SIZE: f64 = 0.15;

/// Max items returned by the rule engine
pub const MAX_RULE_RECOMMENDATIONS: usize = 5;

/// Max items kept from a generative reply
pub const MAX_LLM_RECOMMENDATIONS: usize = 6;

/// Number of recommendations requested in the prompt
pub const LLM_REQUESTED_RECOMMENDATIONS: usize = 4;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get bundle path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get Gemini API key from environment; empty counts as unset
pub fn get_gemini_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

/// Get Gemini model name from environment or use default
pub fn get_gemini_model() -> String {
    std::env::var("GEMINI_MODEL")
        .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string())
}

/// Get Gemini API base URL from environment or use default
pub fn get_gemini_api_base() -> String {
    std::env::var("GEMINI_API_BASE")
        .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string())
}
