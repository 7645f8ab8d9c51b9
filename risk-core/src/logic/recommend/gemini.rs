//! Gemini Source - generative recommendations over the REST API
//!
//! One `generateContent` call per request, no retries. The reply text is
//! split into lines, repeats dropped.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{dedupe, RecommendError, RecommendationSource};
use crate::constants::{LLM_REQUESTED_RECOMMENDATIONS, MAX_LLM_RECOMMENDATIONS};
use crate::logic::features::StudentObservation;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini endpoint configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Gemini-backed recommendation source
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, RecommendError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RecommendError::Network(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, RecommendError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(self.config.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RecommendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecommendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RecommendError::Parse(e.to_string()))?;

        reply.text().ok_or(RecommendError::Empty)
    }
}

#[async_trait]
impl RecommendationSource for GeminiClient {
    async fn generate(
        &self,
        obs: &StudentObservation,
        risk_label: &str,
    ) -> Result<Vec<String>, RecommendError> {
        let prompt = build_prompt(obs, risk_label);
        log::debug!("Requesting recommendations from {}", self.config.model);

        let text = self.generate_text(&prompt).await?;
        Ok(parse_reply(&text))
    }
}

/// Counselor prompt for one student
pub fn build_prompt(obs: &StudentObservation, risk_label: &str) -> String {
    format!(
        "You are an educational counselor. Student details:\n\
         Attendance: {}\n\
         Backlogs: {}\n\
         Fee status: {}\n\
         Predicted risk: {}\n\n\
         Give {} concise personalized recommendations, each 1 sentence long, to reduce dropout risk.",
        obs.attendance, obs.backlogs, obs.fee_status, risk_label, LLM_REQUESTED_RECOMMENDATIONS
    )
}

/// Non-blank trimmed lines, repeats dropped, at most 6
pub fn parse_reply(text: &str) -> Vec<String> {
    let lines = text
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from);

    let mut out = dedupe(lines);
    out.truncate(MAX_LLM_RECOMMENDATIONS);
    out
}
