//! Runs against the database in `DATABASE_URL`:
//! `cargo test --test store_test -- --ignored`

use std::env;

use chrono::Utc;
use wiki_quiz_backend::error::Error;
use wiki_quiz_backend::models::quiz::NewQuiz;
use wiki_quiz_backend::models::quiz_attempt::NewAttempt;
use wiki_quiz_backend::services::store_service::{QuizRepository, QuizStore};
use wiki_quiz_backend::services::synthesis_service::fallback_payload;

async fn store() -> QuizStore {
    dotenvy::dotenv().ok();
    env::set_var("GEMINI_API_KEY", "test-key");
    // Several tests share one process; only the first initialization wins.
    let _ = wiki_quiz_backend::config::init_config();

    let pool = wiki_quiz_backend::database::pool::create_pool()
        .await
        .expect("pool");
    wiki_quiz_backend::database::pool::run_migrations(&pool)
        .await
        .expect("migrations");
    QuizStore::new(pool)
}

fn new_quiz(tag: &str) -> NewQuiz {
    let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    NewQuiz {
        url: format!("https://en.wikipedia.org/wiki/{}_{}", tag, stamp),
        title: tag.to_string(),
        scraped_content: "Some article text.".to_string(),
        payload: fallback_payload(),
    }
}

fn attempt(quiz_id: i64, score: f64) -> NewAttempt {
    NewAttempt {
        quiz_id,
        score,
        correct_answers: 1,
        total_questions: 1,
        user_answers: vec!["B".to_string()],
        time_taken: 12,
    }
}

#[tokio::test]
#[ignore]
async fn quiz_round_trips_through_store() {
    let store = store().await;
    store.ping().await.expect("ping");

    let created = store.create(new_quiz("RoundTrip")).await.expect("create");
    let by_url = store.find_by_url(&created.url).await.expect("find").expect("row");
    assert_eq!(by_url, created);
    assert_eq!(created.quiz_data().expect("payload"), fallback_payload());

    let by_id = store.find_by_id(created.id).await.expect("find").expect("row");
    assert_eq!(by_id.title, "RoundTrip");

    let listed = store.list_all().await.expect("list");
    assert!(listed.iter().any(|q| q.id == created.id));
}

#[tokio::test]
#[ignore]
async fn duplicate_url_is_rejected() {
    let store = store().await;
    let quiz = new_quiz("Duplicate");
    store.create(quiz.clone()).await.expect("first insert");
    let err = store.create(quiz).await.unwrap_err();
    assert!(matches!(err, Error::Duplicate(_)), "got {:?}", err);
}

#[tokio::test]
#[ignore]
async fn attempts_are_recorded_and_aggregated() {
    let store = store().await;
    let quiz = store.create(new_quiz("Attempts")).await.expect("create");

    store.record_attempt(attempt(quiz.id, 40.0)).await.expect("attempt");
    let latest = store.record_attempt(attempt(quiz.id, 90.0)).await.expect("attempt");
    assert_eq!(latest.answers().unwrap(), vec!["B"]);
    assert_eq!(latest.time_taken, 12);

    let attempts = store.attempts_for(quiz.id).await.expect("attempts");
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].id, latest.id);

    let stats = store.attempt_stats().await.expect("stats");
    let stat = stats.iter().find(|s| s.quiz_id == quiz.id).expect("stat");
    assert_eq!(stat.attempts_count, 2);
    assert_eq!(stat.best_score, Some(90.0));
}

#[tokio::test]
#[ignore]
async fn attempt_for_missing_quiz_is_not_found() {
    let store = store().await;
    let err = store.record_attempt(attempt(i64::MAX, 10.0)).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
#[ignore]
async fn delete_cascades_to_attempts() {
    let store = store().await;
    let quiz = store.create(new_quiz("Delete")).await.expect("create");
    store.record_attempt(attempt(quiz.id, 70.0)).await.expect("attempt");

    assert!(store.delete(quiz.id).await.expect("delete"));
    assert!(store.find_by_id(quiz.id).await.expect("find").is_none());
    assert!(store.attempts_for(quiz.id).await.expect("attempts").is_empty());
    assert!(!store.delete(quiz.id).await.expect("second delete"));
}
