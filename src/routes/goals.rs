use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::store::operations::goal_lists::GoalList;
use crate::validation::{normalize_goal_words, validate_learner_id};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_goals).put(put_goals))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LearnerQuery {
    learner_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalsResponse {
    words: Vec<String>,
    /// True when the learner has no stored list and the starter vocabulary
    /// is being served.
    is_starter: bool,
}

async fn get_goals(
    State(state): State<AppState>,
    Query(query): Query<LearnerQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    validate_learner_id(&query.learner_id)
        .map_err(|msg| AppError::bad_request("INVALID_LEARNER_ID", msg))?;

    let stored = state.store().get_goal_list(&query.learner_id)?;
    let is_starter = stored.is_none();
    let words = match stored {
        Some(goal_list) => goal_list.words,
        None => state.store().active_vocabulary(&query.learner_id)?,
    };

    Ok(ok(GoalsResponse { words, is_starter }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PutGoalsRequest {
    learner_id: String,
    words: Vec<String>,
}

async fn put_goals(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PutGoalsRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    validate_learner_id(&req.learner_id)
        .map_err(|msg| AppError::bad_request("INVALID_LEARNER_ID", msg))?;
    let words = normalize_goal_words(&req.words)
        .map_err(|msg| AppError::bad_request("INVALID_GOAL_WORDS", msg))?;

    let goal_list = GoalList {
        learner_id: req.learner_id.clone(),
        words: words.clone(),
        updated_at: state.clock().now(),
    };
    state.store().set_goal_list(&goal_list)?;

    tracing::info!(learner_id = %req.learner_id, count = words.len(), "goal list updated");

    Ok(ok(GoalsResponse {
        words,
        is_starter: false,
    }))
}
