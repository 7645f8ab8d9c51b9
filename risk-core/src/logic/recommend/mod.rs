//! Recommend Module - intervention suggestions
//!
//! Two sources: the generative one (Gemini) when configured, and the rule
//! engine, which always answers. `Recommender` tries the former and falls
//! back to the latter on any failure or empty reply.

pub mod gemini;
pub mod rules;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::logic::features::StudentObservation;

pub use gemini::{GeminiClient, GeminiConfig};

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("network error: {0}")]
    Network(String),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed reply: {0}")]
    Parse(String),

    #[error("reply contained no text")]
    Empty,
}

/// Anything that can suggest interventions for a student
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn generate(
        &self,
        obs: &StudentObservation,
        risk_label: &str,
    ) -> Result<Vec<String>, RecommendError>;
}

/// Generative-first recommender with rule-engine fallback
#[derive(Clone, Default)]
pub struct Recommender {
    llm: Option<Arc<dyn RecommendationSource>>,
}

impl Recommender {
    /// Rule engine only
    pub fn rules_only() -> Self {
        Self { llm: None }
    }

    pub fn with_source(source: Arc<dyn RecommendationSource>) -> Self {
        Self { llm: Some(source) }
    }

    /// Gemini when a config is given, rules otherwise
    pub fn from_config(config: Option<GeminiConfig>) -> Self {
        let Some(config) = config else {
            log::info!("GEMINI_API_KEY not set, using rule-based recommendations");
            return Self::rules_only();
        };

        match GeminiClient::new(config) {
            Ok(client) => {
                log::info!("Generative recommendations enabled ({})", client.model());
                Self::with_source(Arc::new(client))
            }
            Err(e) => {
                log::warn!("Gemini client unavailable, using rules: {}", e);
                Self::rules_only()
            }
        }
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Never empty: the rule engine answers whenever the generative
    /// source fails or has nothing to say
    pub async fn recommend(&self, obs: &StudentObservation, risk_label: &str) -> Vec<String> {
        if let Some(llm) = &self.llm {
            match llm.generate(obs, risk_label).await.map(dedupe) {
                Ok(recs) if !recs.is_empty() => return recs,
                Ok(_) => log::warn!("Generative source returned no recommendations, falling back to rules"),
                Err(e) => log::warn!("Generative recommendations failed: {}", e),
            }
        }

        rules::generate(obs)
    }
}

/// Drop repeats, keeping the first occurrence
pub fn dedupe<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
