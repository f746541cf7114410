// Classification pipeline: closed label sets, oracle seam, result validator.
// Every oracle call goes through `Classifier`, which rejects bad input before the
// call and validates output after it.

pub mod handlers;
pub mod labels;
pub mod oracle;
pub mod prompts;
pub mod validator;

use std::sync::Arc;

use crate::classify::oracle::Oracle;
use crate::classify::validator::{validate_emotion, validate_sentiment, EmotionResult, SentimentResult};
use crate::errors::AppError;

/// Minimum length (in characters) of text sent to the sentiment oracle.
pub const MIN_SENTIMENT_TEXT_CHARS: usize = 10;

#[derive(Clone)]
pub struct Classifier {
    oracle: Arc<dyn Oracle>,
}

impl Classifier {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &Arc<dyn Oracle> {
        &self.oracle
    }

    /// Classifies sentiment. Input errors are returned before any oracle call;
    /// oracle errors degrade to `Neutral`.
    pub async fn sentiment(&self, text: &str) -> Result<SentimentResult, AppError> {
        check_sentiment_input(text)?;
        Ok(validate_sentiment(self.oracle.classify_sentiment(text).await))
    }

    /// Classifies the primary emotion. Oracle errors degrade to `Unsure`.
    pub async fn emotion(&self, text: &str) -> Result<EmotionResult, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Please type how you are feeling before analyzing.".to_string(),
            ));
        }
        Ok(validate_emotion(self.oracle.classify_emotion(text).await))
    }
}

pub fn check_sentiment_input(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Text cannot be empty".to_string()));
    }
    if text.chars().count() < MIN_SENTIMENT_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "Text must be at least {MIN_SENTIMENT_TEXT_CHARS} characters long"
        )));
    }
    Ok(())
}
