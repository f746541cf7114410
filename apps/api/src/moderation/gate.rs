//! Moderation gate for user-submitted questions.
//!
//! Every submission is rewritten by the rephrase oracle and only the rewritten text
//! is ever stored. Both block reasons reach the user as the same "please revise"
//! message; the distinction is kept for logs only.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::classify::oracle::Oracle;
use crate::errors::AppError;

pub const REVISE_MESSAGE: &str =
    "We couldn't post your question as written. Please revise it and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// The oracle answered but produced no usable text.
    EmptyRephrase,
    /// The oracle call itself failed.
    OracleFailed,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::EmptyRephrase => f.write_str("empty rephrase"),
            BlockReason::OracleFailed => f.write_str("oracle failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    /// Rephrased text, safe to publish.
    Accepted(String),
    Blocked(BlockReason),
}

#[derive(Clone)]
pub struct ModerationGate {
    oracle: Arc<dyn Oracle>,
}

impl ModerationGate {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Screens `text`. Empty input is a validation error and never reaches the oracle.
    pub async fn screen(&self, text: &str) -> Result<Screening, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("Question cannot be empty".to_string()));
        }

        let raw = match self.oracle.rephrase(text).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, reason = %BlockReason::OracleFailed, "Question blocked");
                return Ok(Screening::Blocked(BlockReason::OracleFailed));
            }
        };

        match raw.rephrased_text.map(|t| t.trim().to_string()) {
            Some(rephrased) if !rephrased.is_empty() => {
                debug!("Question accepted after rephrase");
                Ok(Screening::Accepted(rephrased))
            }
            _ => {
                warn!(reason = %BlockReason::EmptyRephrase, "Question blocked");
                Ok(Screening::Blocked(BlockReason::EmptyRephrase))
            }
        }
    }
}

impl Screening {
    /// Accepted text, or the user-facing "please revise" error for either block reason.
    pub fn into_accepted(self) -> Result<String, AppError> {
        match self {
            Screening::Accepted(text) => Ok(text),
            Screening::Blocked(_) => Err(AppError::UnprocessableEntity(REVISE_MESSAGE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubOracle;

    #[tokio::test]
    async fn test_empty_input_blocked_without_oracle_call() {
        let oracle = Arc::new(StubOracle::rephrase("anything"));
        let gate = ModerationGate::new(oracle.clone());

        assert!(matches!(gate.screen("").await, Err(AppError::Validation(_))));
        assert!(matches!(gate.screen("  \t").await, Err(AppError::Validation(_))));
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_rephrased_text_is_submitted() {
        let oracle = Arc::new(StubOracle::rephrase("hello"));
        let gate = ModerationGate::new(oracle.clone());

        let screening = gate.screen("hello").await.unwrap();
        assert_eq!(screening, Screening::Accepted("hello".to_string()));
        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test]
    async fn test_original_text_never_passes_through() {
        let gate = ModerationGate::new(Arc::new(StubOracle::rephrase(
            "Why does everyone ignore me?",
        )));
        let screening = gate.screen("WHY DOES EVERYONE IGNORE ME you idiots").await.unwrap();
        assert_eq!(
            screening.into_accepted().unwrap(),
            "Why does everyone ignore me?"
        );
    }

    #[tokio::test]
    async fn test_empty_rephrase_blocks() {
        let gate = ModerationGate::new(Arc::new(StubOracle::rephrase("   ")));
        let screening = gate.screen("something rude").await.unwrap();
        assert_eq!(screening, Screening::Blocked(BlockReason::EmptyRephrase));
    }

    #[tokio::test]
    async fn test_oracle_failure_blocks_with_same_user_message() {
        let gate = ModerationGate::new(Arc::new(StubOracle::failing()));
        let screening = gate.screen("a perfectly fine question").await.unwrap();
        assert_eq!(screening, Screening::Blocked(BlockReason::OracleFailed));

        let empty = Screening::Blocked(BlockReason::EmptyRephrase).into_accepted();
        let failed = screening.into_accepted();
        match (empty, failed) {
            (Err(AppError::UnprocessableEntity(a)), Err(AppError::UnprocessableEntity(b))) => {
                assert_eq!(a, b)
            }
            other => panic!("expected two revise errors, got {other:?}"),
        }
    }
}
