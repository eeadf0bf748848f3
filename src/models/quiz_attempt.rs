use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub score: f64,
    pub correct_answers: i32,
    pub total_questions: i32,
    /// JSON array of the submitted letters.
    pub user_answers: String,
    pub time_taken: i32,
    pub date_attempted: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn answers(&self) -> Result<Vec<String>> {
        serde_json::from_str(&self.user_answers)
            .map_err(|e| Error::Internal(format!("Stored attempt answers are corrupt: {}", e)))
    }
}

#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub quiz_id: i64,
    pub score: f64,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub user_answers: Vec<String>,
    pub time_taken: i32,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AttemptStats {
    pub quiz_id: i64,
    pub attempts_count: i64,
    pub best_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(user_answers: &str) -> QuizAttempt {
        QuizAttempt {
            id: 1,
            quiz_id: 1,
            score: 0.0,
            correct_answers: 0,
            total_questions: 1,
            user_answers: user_answers.to_string(),
            time_taken: 0,
            date_attempted: Utc::now(),
        }
    }

    #[test]
    fn stored_answers_are_decoded() {
        assert_eq!(attempt(r#"["A","C"]"#).answers().unwrap(), vec!["A", "C"]);
    }

    #[test]
    fn corrupt_answers_are_an_error() {
        assert!(matches!(attempt("[\"A\"").answers(), Err(Error::Internal(_))));
    }
}
