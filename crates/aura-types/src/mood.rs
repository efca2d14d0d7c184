//! Mood check-in types for Aura.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted mood score.
pub const MIN_MOOD_SCORE: u8 = 1;
/// Highest accepted mood score.
pub const MAX_MOOD_SCORE: u8 = 10;

/// A self-reported mood check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub user_id: String,
    /// 1 (lowest) to 10 (highest).
    pub mood_score: u8,
    #[serde(default)]
    pub mood_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    pub fn score_in_range(&self) -> bool {
        (MIN_MOOD_SCORE..=MAX_MOOD_SCORE).contains(&self.mood_score)
    }
}

/// Direction a user's mood has been moving over the requested window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Improving,
    Stable,
    Declining,
}

impl fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoodTrend::Improving => write!(f, "improving"),
            MoodTrend::Stable => write!(f, "stable"),
            MoodTrend::Declining => write!(f, "declining"),
        }
    }
}

/// Mood history summary returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodHistory {
    pub entries: Vec<MoodEntry>,
    pub average_score: f64,
    pub trend: MoodTrend,
}

impl MoodHistory {
    /// Summarize a set of entries. An empty set averages to zero and reads
    /// as stable.
    pub fn from_entries(entries: Vec<MoodEntry>) -> Self {
        let average_score = if entries.is_empty() {
            0.0
        } else {
            let total: u32 = entries.iter().map(|e| u32::from(e.mood_score)).sum();
            f64::from(total) / entries.len() as f64
        };
        Self {
            entries,
            average_score,
            trend: MoodTrend::Stable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u8) -> MoodEntry {
        MoodEntry {
            user_id: "u1".to_string(),
            mood_score: score,
            mood_tags: vec![],
            notes: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_score_in_range() {
        assert!(entry(1).score_in_range());
        assert!(entry(10).score_in_range());
        assert!(!entry(0).score_in_range());
        assert!(!entry(11).score_in_range());
    }

    #[test]
    fn test_mood_entry_defaults_on_deserialize() {
        let json = r#"{"user_id": "u1", "mood_score": 7}"#;
        let entry: MoodEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.mood_score, 7);
        assert!(entry.mood_tags.is_empty());
        assert!(entry.notes.is_none());
    }

    #[test]
    fn test_mood_history_average() {
        let history = MoodHistory::from_entries(vec![entry(7), entry(5)]);
        assert!((history.average_score - 6.0).abs() < f64::EPSILON);
        assert_eq!(history.trend, MoodTrend::Stable);
    }

    #[test]
    fn test_mood_history_empty() {
        let history = MoodHistory::from_entries(vec![]);
        assert!((history.average_score - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mood_trend_serializes_lowercase() {
        let json = serde_json::to_string(&MoodTrend::Stable).unwrap();
        assert_eq!(json, "\"stable\"");
    }
}
