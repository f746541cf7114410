use serde::Serialize;

use crate::circles::slug::slugify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveStatus {
    Live,
    Async,
}

/// A themed peer-support circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub theme: &'static str,
    pub description: &'static str,
    pub status: LiveStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircleSummary {
    pub id: String,
    pub theme: &'static str,
    pub description: &'static str,
    pub status: LiveStatus,
}

pub static CIRCLES: [Circle; 6] = [
    Circle {
        theme: "Lonely + Reflective",
        description: "A space for quiet contemplation and connection.",
        status: LiveStatus::Live,
    },
    Circle {
        theme: "Anxious + Overwhelmed",
        description: "Share coping strategies and find understanding.",
        status: LiveStatus::Async,
    },
    Circle {
        theme: "Happy + Grateful",
        description: "Celebrate joys and express gratitude together.",
        status: LiveStatus::Live,
    },
    Circle {
        theme: "Healing + Vulnerable",
        description: "A supportive environment for the healing journey.",
        status: LiveStatus::Async,
    },
    Circle {
        theme: "Curious + Hopeful",
        description: "Explore possibilities and share optimism.",
        status: LiveStatus::Live,
    },
    Circle {
        theme: "Drained + Confused",
        description: "Find clarity and recharge with others who understand.",
        status: LiveStatus::Async,
    },
];

impl Circle {
    pub fn id(&self) -> String {
        slugify(self.theme)
    }

    pub fn summary(&self) -> CircleSummary {
        CircleSummary {
            id: self.id(),
            theme: self.theme,
            description: self.description,
            status: self.status,
        }
    }

    /// True if one of the theme's `+`-separated words equals `word` (case-insensitive).
    pub fn mentions(&self, word: &str) -> bool {
        self.theme
            .split('+')
            .any(|part| part.trim().eq_ignore_ascii_case(word.trim()))
    }
}

pub fn find_circle(id: &str) -> Option<&'static Circle> {
    CIRCLES.iter().find(|c| c.id() == id)
}

/// Circles whose theme mentions `emotion`; the first three circles when none do.
pub fn circles_for(emotion: &str) -> Vec<CircleSummary> {
    let matching: Vec<_> = CIRCLES
        .iter()
        .filter(|c| c.mentions(emotion))
        .map(Circle::summary)
        .collect();
    if matching.is_empty() {
        CIRCLES.iter().take(3).map(Circle::summary).collect()
    } else {
        matching
    }
}
