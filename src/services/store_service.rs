use crate::error::Result;
use crate::models::quiz::{NewQuiz, Quiz};
use crate::models::quiz_attempt::{AttemptStats, NewAttempt, QuizAttempt};
use async_trait::async_trait;
use sqlx::PgPool;

/// Persistence for quizzes and their attempts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Trivial round-trip used by the health probe.
    async fn ping(&self) -> Result<()>;

    async fn find_by_url(&self, url: &str) -> Result<Option<Quiz>>;

    /// Fails with `Error::Duplicate` when a quiz for the URL already exists.
    async fn create(&self, quiz: NewQuiz) -> Result<Quiz>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Quiz>>;

    /// Most recently generated first.
    async fn list_all(&self) -> Result<Vec<Quiz>>;

    /// Attempt count and best score per quiz that has attempts.
    async fn attempt_stats(&self) -> Result<Vec<AttemptStats>>;

    /// Fails with `Error::NotFound` when the quiz does not exist.
    async fn record_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt>;

    async fn attempts_for(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>>;

    /// Removes the quiz and its attempts. Returns false if nothing was deleted.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[derive(Clone)]
pub struct QuizStore {
    pool: PgPool,
}

impl QuizStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizRepository for QuizStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(r#"SELECT * FROM quizzes WHERE url = $1"#)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quiz)
    }

    async fn create(&self, quiz: NewQuiz) -> Result<Quiz> {
        let full_quiz_data = quiz.payload.to_stored()?;

        let created = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (url, title, scraped_content, full_quiz_data)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&quiz.url)
        .bind(&quiz.title)
        .bind(&quiz.scraped_content)
        .bind(full_quiz_data)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(r#"SELECT * FROM quizzes WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quiz)
    }

    async fn list_all(&self) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            r#"SELECT * FROM quizzes ORDER BY date_generated DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(quizzes)
    }

    async fn attempt_stats(&self) -> Result<Vec<AttemptStats>> {
        let stats = sqlx::query_as::<_, AttemptStats>(
            r#"
            SELECT
                quiz_id,
                COUNT(*) AS attempts_count,
                MAX(score) AS best_score
            FROM quiz_attempts
            GROUP BY quiz_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn record_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt> {
        let user_answers = serde_json::to_string(&attempt.user_answers)?;

        let recorded = sqlx::query_as::<_, QuizAttempt>(
            r#"
            INSERT INTO quiz_attempts (
                quiz_id, score, correct_answers, total_questions, user_answers, time_taken
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(attempt.quiz_id)
        .bind(attempt.score)
        .bind(attempt.correct_answers)
        .bind(attempt.total_questions)
        .bind(user_answers)
        .bind(attempt.time_taken)
        .fetch_one(&self.pool)
        .await?;

        Ok(recorded)
    }

    async fn attempts_for(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>> {
        let attempts = sqlx::query_as::<_, QuizAttempt>(
            r#"SELECT * FROM quiz_attempts WHERE quiz_id = $1 ORDER BY date_attempted DESC, id DESC"#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(attempts)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
