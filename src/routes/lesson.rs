//! The two callers of the scheduling core: a read-only queue preview and a
//! persisting outcome recording. The write path holds the per-learner lock
//! across its whole load-modify-store cycle.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::srs::service;
use crate::state::AppState;
use crate::validation::validate_learner_id;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/queue", get(get_queue))
        .route("/review", post(record_review))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LearnerQuery {
    learner_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueueResponse {
    words: Vec<String>,
    due_words: Vec<String>,
    new_words: Vec<String>,
}

async fn get_queue(
    State(state): State<AppState>,
    Query(query): Query<LearnerQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    validate_learner_id(&query.learner_id)
        .map_err(|msg| AppError::bad_request("INVALID_LEARNER_ID", msg))?;

    let now = state.clock().now();
    let vocabulary = state.store().active_vocabulary(&query.learner_id)?;
    let ranks = service::goal_ranks(&vocabulary);
    let collection = state
        .store()
        .get_review_collection(&query.learner_id, now)?;

    let queue = service::build_due_queue(
        &vocabulary,
        &ranks,
        &collection,
        now,
        state.config().lesson.new_word_limit,
    );

    Ok(ok(QueueResponse {
        words: queue.words(),
        due_words: queue.due_words,
        new_words: queue.new_words,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewRequest {
    learner_id: String,
    word: String,
    quality: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewResponse {
    word: String,
    next_review: DateTime<Utc>,
}

async fn record_review(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ReviewRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    validate_learner_id(&req.learner_id)
        .map_err(|msg| AppError::bad_request("INVALID_LEARNER_ID", msg))?;
    let word = req.word.trim();
    if word.is_empty() {
        return Err(AppError::bad_request("INVALID_WORD", "word must not be empty"));
    }
    let quality = u8::try_from(req.quality).map_err(|_| {
        AppError::bad_request("INVALID_QUALITY", "quality must be between 0 and 5")
    })?;

    // Serialize the load-modify-store cycle per learner; a concurrent
    // recording for the same learner would otherwise overwrite this one.
    let lock = state.learner_lock(&req.learner_id).await;
    let _guard = lock.lock().await;

    let now = state.clock().now();
    let vocabulary = state.store().active_vocabulary(&req.learner_id)?;
    let ranks = service::goal_ranks(&vocabulary);
    let collection = state.store().get_review_collection(&req.learner_id, now)?;

    let (updated, next_review) = service::record_outcome(collection, &ranks, word, quality, now)?;
    state
        .store()
        .set_review_collection(&req.learner_id, &updated)?;

    tracing::debug!(
        learner_id = %req.learner_id,
        word,
        quality,
        next_review = %next_review,
        "review recorded"
    );

    Ok(ok(ReviewResponse {
        word: word.to_string(),
        next_review,
    }))
}
