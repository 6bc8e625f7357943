use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

use super::repo::{Feedback, FeedbackWithAuthor};

#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub session_id: Uuid,
    pub to_user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/feedback", post(submit_feedback))
        .route("/feedback/:user_id", get(get_user_feedback))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[instrument(skip(state, current, payload))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<SubmitFeedbackRequest>,
) -> Result<Json<Feedback>, ApiError> {
    if !(1..=5).contains(&payload.rating) {
        return Err(ApiError::BadRequest("Rating must be between 1 and 5".into()));
    }

    let feedback = Feedback::create(
        &state.db,
        payload.session_id,
        current.id,
        payload.to_user_id,
        payload.rating,
        payload.comment.as_deref(),
    )
    .await
    .map_err(ApiError::Internal)?;

    // Recompute the recipient's average over all of their feedback and
    // persist it. Re-reads every row on each submission; fine at this
    // scale, revisit if feedback volume grows.
    if let Some(avg) = Feedback::average_rating(&state.db, payload.to_user_id)
        .await
        .map_err(ApiError::Internal)?
    {
        User::update_rating(&state.db, payload.to_user_id, round1(avg))
            .await
            .map_err(ApiError::Internal)?;
    }

    info!(feedback_id = %feedback.id, to = %payload.to_user_id, rating = payload.rating, "feedback submitted");
    Ok(Json(feedback))
}

#[instrument(skip(state))]
pub async fn get_user_feedback(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<FeedbackWithAuthor>>, ApiError> {
    let feedback = Feedback::list_for_user(&state.db, user_id)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(feedback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_rounds_to_one_decimal() {
        assert_eq!(round1(4.666666), 4.7);
        assert_eq!(round1(4.04), 4.0);
        assert_eq!(round1(5.0), 5.0);
        assert_eq!(round1(4.25), 4.3);
    }
}
