use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::Result;
use crate::models::question::QuizPayload;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Quiz {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub date_generated: DateTime<Utc>,
    pub scraped_content: Option<String>,
    pub full_quiz_data: Option<String>,
}

impl Quiz {
    pub fn quiz_data(&self) -> Result<QuizPayload> {
        QuizPayload::from_stored(self.full_quiz_data.as_deref())
    }
}

/// Input for inserting a freshly generated quiz.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub url: String,
    pub title: String,
    pub scraped_content: String,
    pub payload: QuizPayload,
}

/// One line of the quiz history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizHistoryEntry {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub date_generated: DateTime<Utc>,
    pub attempts_count: i64,
    pub best_score: Option<f64>,
}
