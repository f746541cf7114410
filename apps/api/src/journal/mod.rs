// Journal: entry persistence, the save/classify/persist pipeline, derived
// statistics, and JSON export.

pub mod export;
pub mod handlers;
pub mod pipeline;
pub mod stats;
pub mod store;

pub const TITLE_MAX_CHARS: usize = 50;

/// First 50 characters of the trimmed content, with "..." appended only when cut.
/// Content of 50 characters or fewer becomes the title verbatim, with no ellipsis.
pub fn derive_title(content: &str) -> String {
    let trimmed = content.trim();
    let mut chars = trimmed.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
