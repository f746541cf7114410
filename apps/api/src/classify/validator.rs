//! Result validator. Turns raw oracle output into a closed-set label.
//!
//! Never returns an error: oracle failures, missing output, and out-of-set labels
//! all degrade to the designated default with one warning logged.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classify::labels::{Emotion, Sentiment};
use crate::classify::oracle::{RawEmotion, RawSentiment};
use crate::llm_client::LlmError;

pub const SENTIMENT_ERROR_EXPLANATION: &str = "Could not analyze sentiment due to an error.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// True when `sentiment` was substituted rather than produced by the oracle.
    #[serde(default)]
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    pub emotion: Emotion,
    #[serde(default)]
    pub fallback: bool,
}

impl SentimentResult {
    fn fallback(explanation: Option<&str>) -> Self {
        Self {
            sentiment: Sentiment::default(),
            explanation: explanation.map(String::from),
            fallback: true,
        }
    }
}

impl EmotionResult {
    fn fallback() -> Self {
        Self {
            emotion: Emotion::default(),
            fallback: true,
        }
    }
}

pub fn validate_sentiment(output: Result<RawSentiment, LlmError>) -> SentimentResult {
    let raw = match output {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "Sentiment oracle call failed, defaulting to Neutral");
            return SentimentResult::fallback(Some(SENTIMENT_ERROR_EXPLANATION));
        }
    };

    match raw.sentiment.as_deref().and_then(Sentiment::from_label) {
        Some(sentiment) => SentimentResult {
            sentiment,
            explanation: raw.explanation.filter(|e| !e.trim().is_empty()),
            fallback: false,
        },
        None => {
            warn!(
                label = ?raw.sentiment,
                "Oracle did not return a valid sentiment, defaulting to Neutral"
            );
            SentimentResult::fallback(None)
        }
    }
}

pub fn validate_emotion(output: Result<RawEmotion, LlmError>) -> EmotionResult {
    let raw = match output {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "Emotion oracle call failed, defaulting to Unsure");
            return EmotionResult::fallback();
        }
    };

    match raw.emotion.as_deref().and_then(Emotion::from_label) {
        Some(emotion) => EmotionResult {
            emotion,
            fallback: false,
        },
        None => {
            warn!(
                label = ?raw.emotion,
                "Oracle did not return a valid emotion, defaulting to Unsure"
            );
            EmotionResult::fallback()
        }
    }
}
