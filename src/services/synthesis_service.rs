use crate::error::Result;
use crate::models::question::{QuizPayload, QuizQuestion, ANSWER_LETTERS};
use crate::services::llm_service::LlmClient;
use crate::utils::text::truncate_chars;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const MAX_PROMPT_ARTICLE_CHARS: usize = 8_000;

static OPENING_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```json\s*").expect("fence pattern"));
static CLOSING_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*```").expect("fence pattern"));
static LEADING_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-D])").expect("letter pattern"));

const SCHEMA_EXAMPLE: &str = r#"{
    "summary": "Concise summary of the article",
    "key_entities": {
        "people": ["list", "of", "people"],
        "organizations": ["list", "of", "organizations"],
        "locations": ["list", "of", "locations"]
    },
    "sections": ["list", "of", "main", "sections"],
    "quiz": [
        {
            "question": "Question text?",
            "options": [
                "A) Option A text",
                "B) Option B text",
                "C) Option C text",
                "D) Option D text"
            ],
            "answer": "A",
            "difficulty": "easy",
            "explanation": "Brief explanation of why this is correct"
        }
    ],
    "related_topics": ["topic1", "topic2", "topic3"]
}"#;

/// Result of one synthesis run. Both arms carry a well-formed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Synthesis {
    Generated(QuizPayload),
    Fallback { payload: QuizPayload, reason: String },
}

impl Synthesis {
    pub fn payload(&self) -> &QuizPayload {
        match self {
            Synthesis::Generated(payload) => payload,
            Synthesis::Fallback { payload, .. } => payload,
        }
    }

    pub fn into_payload(self) -> QuizPayload {
        match self {
            Synthesis::Generated(payload) => payload,
            Synthesis::Fallback { payload, .. } => payload,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Synthesis::Fallback { .. })
    }
}

#[derive(Clone)]
pub struct SynthesisService {
    llm: Arc<dyn LlmClient>,
}

impl SynthesisService {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Turns article text into a quiz. Never fails: any model or parsing
    /// problem yields [`fallback_payload`] with the reason attached.
    pub async fn synthesize(&self, article_text: &str) -> Synthesis {
        let prompt = build_prompt(article_text);

        let raw = match self.llm.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Quiz generation request failed");
                return Synthesis::Fallback {
                    payload: fallback_payload(),
                    reason: e.to_string(),
                };
            }
        };

        match parse_quiz_response(&raw) {
            Ok(payload) => {
                tracing::info!(questions = payload.quiz.len(), "Quiz generated");
                Synthesis::Generated(payload)
            }
            Err(e) => {
                tracing::error!(error = %e, "Quiz generation returned unusable output");
                Synthesis::Fallback {
                    payload: fallback_payload(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

pub fn build_prompt(article_text: &str) -> String {
    let article = truncate_chars(article_text, MAX_PROMPT_ARTICLE_CHARS);
    format!(
        r#"You are an expert educational content creator. Create a comprehensive quiz based on the following Wikipedia article content.

ARTICLE CONTENT:
{article}

IMPORTANT INSTRUCTIONS:
1. Generate 5-8 high-quality quiz questions that test understanding of key concepts
2. Questions should be factual and directly based on the provided content
3. Each question must have exactly 4 options labeled A, B, C, D
4. Provide the correct answer as JUST THE LETTER (A, B, C, or D) - NOT the full text
5. Assign appropriate difficulty levels (easy, medium, hard)
6. Provide a brief explanation for each answer
7. Extract key entities (people, organizations, locations)
8. Identify main sections of the article
9. Suggest 3-5 related Wikipedia topics for further reading

CRITICAL: The "answer" field must contain ONLY the letter (A, B, C, or D), not the full option text.

Return the response in this exact JSON format:
{SCHEMA_EXAMPLE}

Make sure the response is valid JSON that can be parsed directly."#
    )
}

/// Removes Markdown code fences the model sometimes wraps around its JSON.
pub fn strip_code_fences(raw: &str) -> String {
    let without_open = OPENING_FENCE.replace_all(raw, "");
    CLOSING_FENCE.replace_all(&without_open, "").trim().to_string()
}

/// Coerces a model-supplied answer to a single letter in `A..=D`.
///
/// `"b"` becomes `"B"`, `"c) the option"` becomes `"C"`, anything
/// without a usable leading letter becomes `"A"`.
pub fn normalize_answer(raw: &str) -> String {
    let answer = raw.trim().to_uppercase();
    let mut chars = answer.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        if ANSWER_LETTERS.contains(&letter) {
            return letter.to_string();
        }
    }
    LEADING_LETTER
        .captures(&answer)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "A".to_string())
}

/// Parses raw model output into a payload, repairing answer fields first.
pub fn parse_quiz_response(raw: &str) -> Result<QuizPayload> {
    let cleaned = strip_code_fences(raw);
    let mut value: JsonValue = serde_json::from_str(&cleaned)?;

    if let Some(questions) = value.get_mut("quiz").and_then(|q| q.as_array_mut()) {
        for question in questions.iter_mut() {
            let Some(answer) = question.get_mut("answer") else {
                continue;
            };
            // Non-string answers (null, numbers) fall through to the "A" default.
            let text = match &*answer {
                JsonValue::String(s) => s.clone(),
                JsonValue::Null => String::new(),
                other => other.to_string(),
            };
            *answer = JsonValue::String(normalize_answer(&text));
        }
    }

    Ok(serde_json::from_value(value)?)
}

pub fn fallback_payload() -> QuizPayload {
    let key_entities: BTreeMap<String, Vec<String>> = ["people", "organizations", "locations"]
        .into_iter()
        .map(|k| (k.to_string(), Vec::new()))
        .collect();

    QuizPayload {
        summary: "Failed to generate summary due to API error".to_string(),
        key_entities,
        sections: vec![],
        quiz: vec![QuizQuestion {
            question: "What is the main topic of this article?".to_string(),
            options: vec![
                "A) The content is not available".to_string(),
                "B) Please try generating the quiz again".to_string(),
                "C) There was an error processing the article".to_string(),
                "D) The AI service is temporarily unavailable".to_string(),
            ],
            answer: "B".to_string(),
            difficulty: "easy".to_string(),
            explanation: "There was an issue generating the quiz. Please try again.".to_string(),
        }],
        related_topics: vec![],
    }
}
