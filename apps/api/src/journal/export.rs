//! Journal export: a JSON array of `{ title, content, date, emotion, isPrivate }`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::classify::labels::Sentiment;
use crate::models::journal::JournalEntry;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedEntry {
    pub title: String,
    pub content: String,
    /// Creation time, ISO-8601 with millisecond precision.
    pub date: String,
    pub emotion: Option<Sentiment>,
    pub is_private: bool,
}

impl From<&JournalEntry> for ExportedEntry {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            title: entry.title.clone(),
            content: entry.content.clone(),
            date: entry.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            emotion: entry.emotion,
            is_private: entry.is_private,
        }
    }
}

pub fn export_entries(entries: &[JournalEntry]) -> Vec<ExportedEntry> {
    entries.iter().map(ExportedEntry::from).collect()
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("mindbridge-journal-{}.json", now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn test_export_shape() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let entry = JournalEntry {
            id: Uuid::new_v4(),
            author_id: "u1".to_string(),
            title: "Rainy day".to_string(),
            content: "Rainy day, stayed in and read.".to_string(),
            emotion: Some(Sentiment::VeryPositive),
            is_private: false,
            created_at: at,
            updated_at: at,
        };

        let json = serde_json::to_value(export_entries(&[entry])).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "title": "Rainy day",
                "content": "Rainy day, stayed in and read.",
                "date": "2025-03-01T10:00:00.000Z",
                "emotion": "Very Positive",
                "isPrivate": false
            }])
        );
    }

    #[test]
    fn test_export_filename_uses_date() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(export_filename(at), "mindbridge-journal-2025-12-31.json");
    }
}
