//! Check-in state machine.
//!
//! `Idle -> Detecting(source) -> CheckedIn(label, source)`. A failed detection lands
//! on the "I'm not sure" sentinel; a manual pick jumps straight to `CheckedIn`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkin::mapping::{not_sure, ui_label_for, UiLabel};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInSource {
    Text,
    Camera,
    Voice,
    Manual,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckIn {
    #[default]
    Idle,
    Detecting {
        source: CheckInSource,
    },
    CheckedIn {
        /// Display label, e.g. "Calm 🌿".
        label: String,
        color: String,
        source: CheckInSource,
        at: DateTime<Utc>,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("A {0:?} detection is already in progress")]
    AlreadyDetecting(CheckInSource),

    #[error("No detection in progress")]
    NotDetecting,

    #[error("{0:?} is not a detection source")]
    NotDetector(CheckInSource),
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::NotDetector(_) => AppError::Validation(e.to_string()),
            TransitionError::AlreadyDetecting(_) | TransitionError::NotDetecting => {
                AppError::UnprocessableEntity(e.to_string())
            }
        }
    }
}

impl CheckIn {
    pub fn begin(&self, source: CheckInSource) -> Result<CheckIn, TransitionError> {
        if source == CheckInSource::Manual {
            return Err(TransitionError::NotDetector(source));
        }
        match self {
            CheckIn::Detecting { source: current } => {
                Err(TransitionError::AlreadyDetecting(*current))
            }
            CheckIn::Idle | CheckIn::CheckedIn { .. } => Ok(CheckIn::Detecting { source }),
        }
    }

    pub fn complete(&self, label: &UiLabel, at: DateTime<Utc>) -> Result<CheckIn, TransitionError> {
        match self {
            CheckIn::Detecting { source } => Ok(checked_in(label, *source, at)),
            _ => Err(TransitionError::NotDetecting),
        }
    }

    /// Detection failed: settle on the sentinel.
    pub fn fail(&self, at: DateTime<Utc>) -> Result<CheckIn, TransitionError> {
        self.complete(not_sure(), at)
    }

    /// Manual selection is allowed from any state.
    pub fn select(&self, label: &UiLabel, at: DateTime<Utc>) -> CheckIn {
        checked_in(label, CheckInSource::Manual, at)
    }

    pub fn clear(&self) -> CheckIn {
        CheckIn::Idle
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            CheckIn::CheckedIn { label, .. } => Some(label),
            _ => None,
        }
    }
}

fn checked_in(label: &UiLabel, source: CheckInSource, at: DateTime<Utc>) -> CheckIn {
    CheckIn::CheckedIn {
        label: label.display.to_string(),
        color: label.color.to_string(),
        source,
        at,
    }
}

/// Per-emotion confidence scores reported by a camera or voice detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    #[serde(default)]
    pub joy: f64,
    #[serde(default)]
    pub sadness: f64,
    #[serde(default)]
    pub anger: f64,
    #[serde(default)]
    pub surprise: f64,
}

const SCORE_THRESHOLD: f64 = 0.5;

impl EmotionScores {
    pub fn is_valid(&self) -> bool {
        [self.joy, self.sadness, self.anger, self.surprise]
            .iter()
            .all(|s| s.is_finite() && (0.0..=1.0).contains(s))
    }
}

/// Joy wins over sadness, sadness over anger. Surprise alone maps to the sentinel.
pub fn detect_from_scores(scores: &EmotionScores) -> &'static UiLabel {
    if scores.joy > SCORE_THRESHOLD {
        ui_label_for("Joyful")
    } else if scores.sadness > SCORE_THRESHOLD {
        ui_label_for("Sad")
    } else if scores.anger > SCORE_THRESHOLD {
        ui_label_for("Angry")
    } else {
        not_sure()
    }
}
