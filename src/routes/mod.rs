pub mod health;
pub mod quiz;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/generate-quiz", post(quiz::generate_quiz))
        .route("/quizzes", get(quiz::list_quizzes))
        .route("/quizzes/:id", get(quiz::get_quiz).delete(quiz::delete_quiz))
        .route("/quizzes/:id/attempt", post(quiz::submit_attempt))
        .route("/quizzes/:id/attempts", get(quiz::list_attempts))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
