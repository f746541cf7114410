//! Emotion labels as shown to users: emoji-suffixed display text plus a color token.
//!
//! Lookup is an exact match on the normalized plain name, display text, or
//! classifier label. Anything else resolves to the "I'm not sure" sentinel.

use serde::Serialize;

use crate::classify::labels::{normalize_label, Emotion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UiLabel {
    /// Plain name, e.g. "Joyful".
    pub name: &'static str,
    /// Display text, e.g. "Joyful 😊".
    pub display: &'static str,
    /// Presentation token consumed by the client theme.
    pub color: &'static str,
    /// Classifier label this entry stands for; `None` for manual-only entries.
    #[serde(skip)]
    pub emotion: Option<Emotion>,
}

const fn label(
    name: &'static str,
    display: &'static str,
    color: &'static str,
    emotion: Option<Emotion>,
) -> UiLabel {
    UiLabel {
        name,
        display,
        color,
        emotion,
    }
}

pub static UI_LABELS: [UiLabel; 19] = [
    label("Joyful", "Joyful 😊", "joy", Some(Emotion::Joyful)),
    label("Excited", "Excited 🤩", "excited", Some(Emotion::Excited)),
    label("Grateful", "Grateful 🙏", "grateful", Some(Emotion::Grateful)),
    label("Proud", "Proud 🏆", "proud", Some(Emotion::Proud)),
    label("Calm", "Calm 🌿", "calm", Some(Emotion::Calm)),
    label("Hopeful", "Hopeful 🌤️", "hopeful", Some(Emotion::Hopeful)),
    label("Curious", "Curious 🤔", "curious", Some(Emotion::Curious)),
    label("Lonely", "Lonely 🧍‍♂️", "lonely", Some(Emotion::Lonely)),
    label("Sad", "Sad 😔", "sad", Some(Emotion::Sad)),
    label("Anxious", "Anxious 😰", "anxious", Some(Emotion::Anxious)),
    label("Angry", "Angry 😠", "angry", Some(Emotion::Angry)),
    label("Grieving", "Grieving 🖤", "grieving", Some(Emotion::Grieving)),
    label("Drained", "Drained 🥱", "drained", Some(Emotion::Drained)),
    label("Confused", "Confused 😕", "confused", Some(Emotion::Confused)),
    label("Insecure", "Insecure 😟", "insecure", Some(Emotion::Insecure)),
    label("Healing", "Healing 💖", "healing", Some(Emotion::Healing)),
    label("Vulnerable", "Vulnerable 🫥", "vulnerable", Some(Emotion::Vulnerable)),
    label("I'm not sure", "I'm not sure 🤔", "muted", Some(Emotion::Unsure)),
    label("Just Browsing", "Just Browsing 😌", "secondary", None),
];

const NOT_SURE_INDEX: usize = 17;

pub const TRENDING: [&str; 5] = ["Joyful", "Sad", "Anxious", "Grateful", "Lonely"];

/// The "I'm not sure 🤔" sentinel.
pub fn not_sure() -> &'static UiLabel {
    &UI_LABELS[NOT_SURE_INDEX]
}

pub fn ui_label_for_emotion(emotion: Emotion) -> &'static UiLabel {
    UI_LABELS
        .iter()
        .find(|l| l.emotion == Some(emotion))
        .unwrap_or_else(not_sure)
}

/// Exact normalized lookup by plain name, display text, or classifier label.
pub fn find_ui_label(raw: &str) -> Option<&'static UiLabel> {
    let wanted = normalize_label(raw);
    if wanted.is_empty() {
        return None;
    }
    UI_LABELS.iter().find(|l| {
        normalize_label(l.name) == wanted
            || normalize_label(l.display) == wanted
            || l.emotion.is_some_and(|e| normalize_label(e.as_str()) == wanted)
    })
}

/// Maps classifier output to a UI label, falling back to the sentinel.
pub fn ui_label_for(raw: &str) -> &'static UiLabel {
    find_ui_label(raw).unwrap_or_else(not_sure)
}

pub fn trending() -> Vec<&'static UiLabel> {
    TRENDING.iter().filter_map(|name| find_ui_label(name)).collect()
}
