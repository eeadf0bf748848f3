use crate::error::{Error, Result};
use crate::models::question::QuizPayload;
use crate::models::quiz::{NewQuiz, Quiz, QuizHistoryEntry};
use crate::models::quiz_attempt::{NewAttempt, QuizAttempt};
use crate::services::scoring_service::ScoringService;
use crate::services::scraper_service::ArticleSource;
use crate::services::store_service::QuizRepository;
use crate::services::synthesis_service::{Synthesis, SynthesisService};
use crate::utils::validation::is_valid_wikipedia_url;
use std::collections::HashMap;
use std::sync::Arc;

pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// A stored quiz together with its materialized payload.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDetail {
    pub quiz: Quiz,
    pub payload: QuizPayload,
}

impl QuizDetail {
    fn load(quiz: Quiz) -> Result<Self> {
        let payload = quiz.quiz_data()?;
        Ok(Self { quiz, payload })
    }
}

/// Composes validation, caching, scraping, synthesis, storage and scoring.
#[derive(Clone)]
pub struct QuizService {
    store: Arc<dyn QuizRepository>,
    scraper: Arc<dyn ArticleSource>,
    synthesizer: SynthesisService,
}

impl QuizService {
    pub fn new(
        store: Arc<dyn QuizRepository>,
        scraper: Arc<dyn ArticleSource>,
        synthesizer: SynthesisService,
    ) -> Self {
        Self {
            store,
            scraper,
            synthesizer,
        }
    }

    /// Returns the quiz for `url`, generating and storing it on first request.
    /// The scraper and model run at most once per stored URL.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&self, url: &str) -> Result<QuizDetail> {
        if !is_valid_wikipedia_url(url) {
            return Err(Error::BadRequest("Invalid Wikipedia URL".to_string()));
        }

        if let Some(existing) = self.store.find_by_url(url).await? {
            tracing::info!(quiz_id = existing.id, "Quiz cache hit");
            return QuizDetail::load(existing);
        }

        tracing::info!("Quiz cache miss, generating");
        let article = self.scraper.scrape(url).await;
        let Some(text) = article.text else {
            return Err(Error::BadRequest("Failed to scrape article".to_string()));
        };

        let synthesis = self.synthesizer.synthesize(&text).await;
        if let Synthesis::Fallback { reason, .. } = &synthesis {
            tracing::warn!(%reason, "Storing fallback quiz");
        }
        let payload = synthesis.into_payload();
        if payload.quiz.is_empty() {
            return Err(Error::Internal("Quiz generation failed".to_string()));
        }

        let new_quiz = NewQuiz {
            url: url.to_string(),
            title: article.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            scraped_content: text,
            payload: payload.clone(),
        };

        match self.store.create(new_quiz).await {
            Ok(quiz) => {
                tracing::info!(quiz_id = quiz.id, "Quiz stored");
                Ok(QuizDetail { quiz, payload })
            }
            Err(Error::Duplicate(_)) => {
                tracing::warn!("Quiz for this URL was stored concurrently, re-reading");
                let existing = self.store.find_by_url(url).await?.ok_or_else(|| {
                    Error::Internal("Quiz vanished after a duplicate insert".to_string())
                })?;
                QuizDetail::load(existing)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get_quiz(&self, id: i64) -> Result<QuizDetail> {
        let quiz = self.require_quiz(id).await?;
        QuizDetail::load(quiz)
    }

    pub async fn history(&self) -> Result<Vec<QuizHistoryEntry>> {
        let quizzes = self.store.list_all().await?;
        let stats: HashMap<i64, _> = self
            .store
            .attempt_stats()
            .await?
            .into_iter()
            .map(|s| (s.quiz_id, s))
            .collect();

        Ok(quizzes
            .into_iter()
            .map(|q| {
                let stat = stats.get(&q.id);
                QuizHistoryEntry {
                    id: q.id,
                    url: q.url,
                    title: q.title,
                    date_generated: q.date_generated,
                    attempts_count: stat.map(|s| s.attempts_count).unwrap_or(0),
                    best_score: stat.and_then(|s| s.best_score),
                }
            })
            .collect())
    }

    #[tracing::instrument(skip(self, answers))]
    pub async fn submit_attempt(
        &self,
        quiz_id: i64,
        answers: Vec<String>,
        time_taken: i32,
    ) -> Result<QuizAttempt> {
        let quiz = self.require_quiz(quiz_id).await?;
        let payload = quiz.quiz_data()?;
        let card = ScoringService::score(&payload.quiz, &answers);

        let attempt = self
            .store
            .record_attempt(NewAttempt {
                quiz_id,
                score: card.score,
                correct_answers: card.correct,
                total_questions: card.total,
                user_answers: answers,
                time_taken,
            })
            .await?;

        tracing::info!(attempt_id = attempt.id, score = attempt.score, "Attempt recorded");
        Ok(attempt)
    }

    pub async fn attempts(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>> {
        self.require_quiz(quiz_id).await?;
        self.store.attempts_for(quiz_id).await
    }

    pub async fn delete_quiz(&self, id: i64) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(Error::NotFound("Quiz not found".to_string()));
        }
        tracing::info!(quiz_id = id, "Quiz deleted");
        Ok(())
    }

    pub async fn health(&self) -> Result<()> {
        self.store.ping().await
    }

    async fn require_quiz(&self, id: i64) -> Result<Quiz> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))
    }
}
