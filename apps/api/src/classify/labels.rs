//! Closed label sets produced by the classifier oracle.
//!
//! Lookup is exact after normalization (trim, collapse whitespace, case-fold).
//! There is no prefix matching: "Joy" is not "Joyful".

use serde::{Deserialize, Serialize};

/// Overall sentiment of a journal entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    Positive,
    #[default]
    Neutral,
    Negative,
    #[serde(rename = "Very Negative")]
    VeryNegative,
    Mixed,
}

impl Sentiment {
    pub const ALL: [Sentiment; 6] = [
        Sentiment::VeryPositive,
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
        Sentiment::VeryNegative,
        Sentiment::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::VeryPositive => "Very Positive",
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
            Sentiment::VeryNegative => "Very Negative",
            Sentiment::Mixed => "Mixed",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let wanted = normalize_label(raw);
        Self::ALL
            .into_iter()
            .find(|s| normalize_label(s.as_str()) == wanted)
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary emotion expressed in a short check-in text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Joyful,
    Excited,
    Grateful,
    Proud,
    Calm,
    Hopeful,
    Curious,
    Lonely,
    Sad,
    Anxious,
    Angry,
    Grieving,
    Drained,
    Confused,
    Insecure,
    Healing,
    Vulnerable,
    /// Catch-all when no specific emotion is clear.
    #[default]
    Unsure,
}

impl Emotion {
    pub const ALL: [Emotion; 18] = [
        Emotion::Joyful,
        Emotion::Excited,
        Emotion::Grateful,
        Emotion::Proud,
        Emotion::Calm,
        Emotion::Hopeful,
        Emotion::Curious,
        Emotion::Lonely,
        Emotion::Sad,
        Emotion::Anxious,
        Emotion::Angry,
        Emotion::Grieving,
        Emotion::Drained,
        Emotion::Confused,
        Emotion::Insecure,
        Emotion::Healing,
        Emotion::Vulnerable,
        Emotion::Unsure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joyful => "Joyful",
            Emotion::Excited => "Excited",
            Emotion::Grateful => "Grateful",
            Emotion::Proud => "Proud",
            Emotion::Calm => "Calm",
            Emotion::Hopeful => "Hopeful",
            Emotion::Curious => "Curious",
            Emotion::Lonely => "Lonely",
            Emotion::Sad => "Sad",
            Emotion::Anxious => "Anxious",
            Emotion::Angry => "Angry",
            Emotion::Grieving => "Grieving",
            Emotion::Drained => "Drained",
            Emotion::Confused => "Confused",
            Emotion::Insecure => "Insecure",
            Emotion::Healing => "Healing",
            Emotion::Vulnerable => "Vulnerable",
            Emotion::Unsure => "Unsure",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let wanted = normalize_label(raw);
        Self::ALL
            .into_iter()
            .find(|e| normalize_label(e.as_str()) == wanted)
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trims, collapses internal whitespace runs to one space, and lowercases.
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Comma-separated label list for prompt templates.
pub fn joined<T: Copy>(labels: &[T], name: impl Fn(T) -> &'static str) -> String {
    labels.iter().map(|l| name(*l)).collect::<Vec<_>>().join(", ")
}
