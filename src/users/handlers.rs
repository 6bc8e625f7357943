use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{MentorQuery, ProfileUpdate, PublicUser};
use super::repo::User;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id", get(get_user))
        .route("/users/profile", put(update_profile))
        .route("/mentors", get(list_mentors))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, current, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<PublicUser>, ApiError> {
    let updated = User::update_profile(&state.db, current.id, &payload)
        .await
        .map_err(ApiError::Internal)?;
    info!(user_id = %updated.id, "profile updated");
    Ok(Json(updated.into()))
}

#[instrument(skip(state))]
pub async fn list_mentors(
    State(state): State<AppState>,
    Query(q): Query<MentorQuery>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let mentors = User::search_mentors(&state.db, q.search.as_deref(), q.expertise.as_deref())
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(mentors.into_iter().map(PublicUser::from).collect()))
}
