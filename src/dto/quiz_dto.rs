use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::question::QuizPayload;
use crate::models::quiz::Quiz;
use crate::models::quiz_attempt::QuizAttempt;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1))]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    pub answers: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "time_taken cannot be negative"))]
    pub time_taken: i32,
}

/// Body of the generate and fetch endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub id: i64,
    pub url: String,
    pub title: String,
    #[serde(flatten)]
    pub payload: QuizPayload,
}

impl QuizResponse {
    pub fn new(quiz: &Quiz, payload: QuizPayload) -> Self {
        Self {
            id: quiz.id,
            url: quiz.url.clone(),
            title: quiz.title.clone(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResponse {
    pub id: i64,
    pub score: f64,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub time_taken: i32,
    pub date_attempted: DateTime<Utc>,
    pub answers: Vec<String>,
}

impl TryFrom<QuizAttempt> for AttemptResponse {
    type Error = Error;

    fn try_from(attempt: QuizAttempt) -> Result<Self> {
        let answers = attempt.answers()?;
        Ok(Self {
            id: attempt.id,
            score: attempt.score,
            correct_answers: attempt.correct_answers,
            total_questions: attempt.total_questions,
            time_taken: attempt.time_taken,
            date_attempted: attempt.date_attempted,
            answers,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
