use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ANSWER_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// One multiple-choice question, embedded in a quiz payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    /// Labeled choices, e.g. `"A) Paris"`.
    pub options: Vec<String>,
    /// Always a single uppercase letter in `A..=D` once stored.
    pub answer: String,
    pub difficulty: String,
    pub explanation: String,
}

/// Everything the model produced for one article.
///
/// Persisted as a single serialized text column on the quiz row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizPayload {
    pub summary: String,
    pub key_entities: BTreeMap<String, Vec<String>>,
    pub sections: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
    pub related_topics: Vec<String>,
}

impl QuizPayload {
    pub fn to_stored(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Absent or blank stored data yields an empty payload.
    pub fn from_stored(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(text) => serde_json::from_str(text)
                .map_err(|e| Error::Internal(format!("Stored quiz data is corrupt: {}", e))),
        }
    }
}
