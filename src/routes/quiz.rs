use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::quiz_dto::{AttemptResponse, GenerateQuizRequest, QuizResponse, SubmitAttemptRequest},
    error::Result,
    utils::validation::validate,
    AppState,
};

#[axum::debug_handler]
pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse> {
    validate(&payload)?;
    let detail = state.quiz_service.generate(&payload.url).await?;
    Ok(Json(QuizResponse::new(&detail.quiz, detail.payload)))
}

#[axum::debug_handler]
pub async fn submit_attempt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse> {
    validate(&payload)?;
    let attempt = state
        .quiz_service
        .submit_attempt(id, payload.answers, payload.time_taken)
        .await?;
    Ok(Json(AttemptResponse::try_from(attempt)?))
}

#[axum::debug_handler]
pub async fn list_quizzes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let history = state.quiz_service.history().await?;
    Ok(Json(history))
}

#[axum::debug_handler]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let detail = state.quiz_service.get_quiz(id).await?;
    Ok(Json(QuizResponse::new(&detail.quiz, detail.payload)))
}

#[axum::debug_handler]
pub async fn list_attempts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let attempts: Vec<AttemptResponse> = state
        .quiz_service
        .attempts(id)
        .await?
        .into_iter()
        .map(AttemptResponse::try_from)
        .collect::<Result<_>>()?;
    Ok(Json(attempts))
}

#[axum::debug_handler]
pub async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.quiz_service.delete_quiz(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
