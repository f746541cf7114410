//! Classifier oracle seam.
//!
//! The oracle is an external black box: text in, loosely-structured output out.
//! Raw outputs keep labels as plain strings so that malformed or missing values
//! reach the validator instead of failing deserialization.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::classify::labels::{joined, Emotion, Sentiment};
use crate::classify::prompts::{
    EMOTION_PROMPT_TEMPLATE, REPHRASE_PROMPT_TEMPLATE, REPHRASE_SYSTEM,
    SENTIMENT_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{EXACT_LABEL_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSentiment {
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEmotion {
    #[serde(default)]
    pub emotion: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRephrase {
    #[serde(default, alias = "rephrasedText")]
    pub rephrased_text: Option<String>,
}

/// The three oracle flows. Implementations perform exactly one call per invocation.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn classify_sentiment(&self, text: &str) -> Result<RawSentiment, LlmError>;

    async fn classify_emotion(&self, text: &str) -> Result<RawEmotion, LlmError>;

    async fn rephrase(&self, text: &str) -> Result<RawRephrase, LlmError>;
}

/// Oracle backed by the shared `LlmClient`.
pub struct LlmOracle(pub LlmClient);

#[async_trait]
impl Oracle for LlmOracle {
    async fn classify_sentiment(&self, text: &str) -> Result<RawSentiment, LlmError> {
        let prompt = SENTIMENT_PROMPT_TEMPLATE
            .replace("{labels}", &joined(&Sentiment::ALL, |s| s.as_str()))
            .replace("{text}", text);
        let system = format!("{JSON_ONLY_SYSTEM} {EXACT_LABEL_INSTRUCTION}");
        self.0.call_json(&prompt, &system).await
    }

    async fn classify_emotion(&self, text: &str) -> Result<RawEmotion, LlmError> {
        let prompt = EMOTION_PROMPT_TEMPLATE
            .replace("{labels}", &joined(&Emotion::ALL, |e| e.as_str()))
            .replace("{text}", text);
        let system = format!("{JSON_ONLY_SYSTEM} {EXACT_LABEL_INSTRUCTION}");
        self.0.call_json(&prompt, &system).await
    }

    async fn rephrase(&self, text: &str) -> Result<RawRephrase, LlmError> {
        let prompt = REPHRASE_PROMPT_TEMPLATE.replace("{text}", text);
        self.0.call_json(&prompt, REPHRASE_SYSTEM).await
    }
}
