// Emotion check-in: UI label mapping, the check-in state machine, and the
// follow-up suggestions shown once a user has checked in.

pub mod handlers;
pub mod mapping;
pub mod state;

use serde::Serialize;

use crate::checkin::mapping::{find_ui_label, not_sure};
use crate::circles::catalog::{circles_for, CircleSummary};

pub const ASK_PATH: &str = "/ask";
pub const JOURNAL_PATH: &str = "/journal";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestions {
    pub circles: Vec<CircleSummary>,
    pub journal_prompt: String,
    pub journal_path: &'static str,
    pub ask_path: &'static str,
}

/// Builds suggestions for a checked-in display label (e.g. "Lonely 🧍‍♂️").
pub fn suggestions_for(display_label: &str) -> Suggestions {
    let label = find_ui_label(display_label).unwrap_or_else(not_sure);
    let journal_prompt = if label == not_sure() || label.emotion.is_none() {
        "Not sure how you feel? Write down whatever is on your mind.".to_string()
    } else {
        format!(
            "You're feeling {}. What happened today that brought this on?",
            label.name.to_lowercase()
        )
    };

    Suggestions {
        circles: circles_for(label.name),
        journal_prompt,
        journal_path: JOURNAL_PATH,
        ask_path: ASK_PATH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_match_themed_circles() {
        let s = suggestions_for("Lonely 🧍‍♂️");
        assert_eq!(s.circles.len(), 1);
        assert_eq!(s.circles[0].id, "lonely-reflective");
        assert!(s.journal_prompt.contains("lonely"));
        assert_eq!(s.ask_path, "/ask");
    }

    #[test]
    fn test_suggestions_fall_back_to_first_three_circles() {
        let s = suggestions_for("Proud 🏆");
        assert_eq!(s.circles.len(), 3);
        assert_eq!(s.circles[0].id, "lonely-reflective");
    }

    #[test]
    fn test_unsure_gets_open_prompt() {
        let s = suggestions_for("I'm not sure 🤔");
        assert!(s.journal_prompt.starts_with("Not sure"));
        assert_eq!(s.circles.len(), 3);
    }
}
