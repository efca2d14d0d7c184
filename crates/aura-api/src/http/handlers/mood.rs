//! Mood tracking endpoints.
//!
//! Demo scope: mood entries are validated and acknowledged but not
//! persisted, and the history endpoint serves representative sample data
//! so the frontend chart has something to draw.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use aura_types::mood::{MAX_MOOD_SCORE, MIN_MOOD_SCORE, MoodEntry, MoodHistory};

use crate::http::error::AppError;

/// Query string for `GET /api/mood/{user_id}`.
#[derive(Debug, Deserialize)]
pub struct MoodHistoryQuery {
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    30
}

/// POST /api/mood - validate and acknowledge a mood check-in.
pub async fn log_mood(
    payload: Result<Json<MoodEntry>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(entry) = payload?;
    if entry.user_id.is_empty() {
        return Err(AppError::Validation("user_id must not be empty".into()));
    }
    if !entry.score_in_range() {
        return Err(AppError::Validation(format!(
            "mood_score must be between {MIN_MOOD_SCORE} and {MAX_MOOD_SCORE}"
        )));
    }

    tracing::info!(user_id = %entry.user_id, mood_score = entry.mood_score, "mood entry logged");

    Ok(Json(json!({
        "status": "success",
        "message": "Mood logged successfully",
        "entry_id": Uuid::now_v7().to_string(),
    })))
}

/// GET /api/mood/{user_id} - sample mood history for the requested window.
pub async fn mood_history(
    Path(user_id): Path<String>,
    Query(query): Query<MoodHistoryQuery>,
) -> Json<MoodHistory> {
    let cutoff = Utc::now() - Duration::days(query.days.max(0));
    let entries = sample_entries(&user_id)
        .into_iter()
        .filter(|entry| entry.timestamp >= cutoff)
        .collect();
    Json(MoodHistory::from_entries(entries))
}

fn sample_entries(user_id: &str) -> Vec<MoodEntry> {
    vec![
        MoodEntry {
            user_id: user_id.to_string(),
            mood_score: 7,
            mood_tags: vec!["calm".to_string(), "focused".to_string()],
            notes: None,
            timestamp: Utc::now() - Duration::days(1),
        },
        MoodEntry {
            user_id: user_id.to_string(),
            mood_score: 5,
            mood_tags: vec!["anxious".to_string(), "tired".to_string()],
            notes: None,
            timestamp: Utc::now() - Duration::days(2),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_entries_average_to_six() {
        let history = MoodHistory::from_entries(sample_entries("u1"));
        assert_eq!(history.entries.len(), 2);
        assert!((history.average_score - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_window_is_thirty_days() {
        let query: MoodHistoryQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.days, 30);
    }
}
