//! Statistics derived from a user's journal.
//!
//! Computed by a full scan of the entry list on every request. Days are UTC calendar
//! days and weeks start on Sunday. `now` is passed in so the numbers are reproducible.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::classify::labels::Sentiment;
use crate::models::journal::JournalEntry;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalStats {
    pub total: usize,
    pub private: usize,
    pub public: usize,
    pub last_7_days: usize,
    pub last_30_days: usize,
    /// Mean content length in characters; 0 for an empty journal.
    pub average_length: f64,
    pub emotions: BTreeMap<Sentiment, usize>,
    pub unlabeled: usize,
    /// Entries per weekday of the current week, Sunday first.
    pub this_week: [usize; 7],
    pub current_streak: u32,
    pub longest_streak: u32,
}

pub fn compute_stats(entries: &[JournalEntry], now: DateTime<Utc>) -> JournalStats {
    let week_ago = now - Duration::days(7);
    let month_ago = now - Duration::days(30);
    let today = now.date_naive();
    let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));

    let mut stats = JournalStats {
        total: entries.len(),
        private: 0,
        public: 0,
        last_7_days: 0,
        last_30_days: 0,
        average_length: 0.0,
        emotions: BTreeMap::new(),
        unlabeled: 0,
        this_week: [0; 7],
        current_streak: 0,
        longest_streak: 0,
    };
    let mut total_chars = 0usize;
    let mut days = BTreeSet::new();

    for entry in entries {
        if entry.is_private {
            stats.private += 1;
        } else {
            stats.public += 1;
        }
        if entry.created_at >= week_ago {
            stats.last_7_days += 1;
        }
        if entry.created_at >= month_ago {
            stats.last_30_days += 1;
        }
        total_chars += entry.content.chars().count();

        match entry.emotion {
            Some(sentiment) => *stats.emotions.entry(sentiment).or_default() += 1,
            None => stats.unlabeled += 1,
        }

        let day = entry.created_at.date_naive();
        if day >= week_start && day < week_start + Duration::days(7) {
            stats.this_week[day.weekday().num_days_from_sunday() as usize] += 1;
        }
        days.insert(day);
    }

    if !entries.is_empty() {
        stats.average_length = total_chars as f64 / entries.len() as f64;
    }
    stats.longest_streak = longest_streak(&days);
    stats.current_streak = current_streak(&days, today);
    stats
}

fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for &day in days {
        run = match previous {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }
    longest
}

/// Consecutive days with an entry ending today. A streak that ended yesterday is
/// still current until today is over.
fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };
    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    // Wednesday 2025-03-12 15:00 UTC; the week started Sunday 2025-03-09.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 12, 15, 0, 0).unwrap()
    }

    fn entry(days_ago: i64, chars: usize, private: bool, emotion: Option<Sentiment>) -> JournalEntry {
        let at = now() - Duration::days(days_ago);
        JournalEntry {
            id: Uuid::new_v4(),
            author_id: "u1".to_string(),
            title: String::new(),
            content: "a".repeat(chars),
            emotion,
            is_private: private,
            created_at: at,
            updated_at: at,
        }
    }

    fn sample() -> Vec<JournalEntry> {
        vec![
            entry(0, 10, true, Some(Sentiment::Positive)),   // Wed
            entry(1, 20, false, Some(Sentiment::Positive)),  // Tue
            entry(2, 30, true, Some(Sentiment::Negative)),   // Mon
            entry(3, 40, true, None),                        // Sun
            entry(6, 50, false, Some(Sentiment::Neutral)),   // previous Thu
            entry(10, 60, true, Some(Sentiment::Mixed)),
            entry(45, 70, false, Some(Sentiment::VeryNegative)),
        ]
    }

    #[test]
    fn test_counts_match_hand_computed_values() {
        let stats = compute_stats(&sample(), now());
        assert_eq!(stats.total, 7);
        assert_eq!(stats.private, 4);
        assert_eq!(stats.public, 3);
        assert_eq!(stats.last_7_days, 5);
        assert_eq!(stats.last_30_days, 6);
        assert_eq!(stats.average_length, 40.0);
    }

    #[test]
    fn test_emotion_histogram() {
        let stats = compute_stats(&sample(), now());
        assert_eq!(stats.emotions.get(&Sentiment::Positive), Some(&2));
        assert_eq!(stats.emotions.get(&Sentiment::Negative), Some(&1));
        assert_eq!(stats.emotions.get(&Sentiment::Neutral), Some(&1));
        assert_eq!(stats.emotions.get(&Sentiment::Mixed), Some(&1));
        assert_eq!(stats.emotions.get(&Sentiment::VeryNegative), Some(&1));
        assert_eq!(stats.emotions.get(&Sentiment::VeryPositive), None);
        assert_eq!(stats.unlabeled, 1);
    }

    #[test]
    fn test_current_week_by_day() {
        let stats = compute_stats(&sample(), now());
        assert_eq!(stats.this_week, [1, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_streaks() {
        let stats = compute_stats(&sample(), now());
        assert_eq!(stats.current_streak, 4);
        assert_eq!(stats.longest_streak, 4);
    }

    #[test]
    fn test_streak_survives_until_end_of_day() {
        let entries = vec![entry(1, 5, true, None), entry(2, 5, true, None)];
        assert_eq!(compute_stats(&entries, now()).current_streak, 2);

        let stale = vec![entry(2, 5, true, None)];
        assert_eq!(compute_stats(&stale, now()).current_streak, 0);
    }

    #[test]
    fn test_multiple_entries_same_day_count_once_for_streaks() {
        let entries = vec![entry(0, 5, true, None), entry(0, 5, true, None)];
        let stats = compute_stats(&entries, now());
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.this_week[3], 2);
    }

    #[test]
    fn test_empty_journal() {
        let stats = compute_stats(&[], now());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_length, 0.0);
        assert_eq!(stats.longest_streak, 0);
        assert!(stats.emotions.is_empty());
    }

    #[test]
    fn test_histogram_serializes_with_label_keys() {
        let stats = compute_stats(&sample(), now());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["emotions"]["Very Negative"], 1);
    }
}
