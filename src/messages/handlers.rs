use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

use super::repo::{Message, MessageWithNames};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub to_user_id: Uuid,
    pub content: String,
}

pub fn message_routes() -> Router<AppState> {
    Router::new().route("/messages", post(send_message).get(list_messages))
}

#[instrument(skip(state, current, payload))]
pub async fn send_message(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<Message>, ApiError> {
    User::find_by_id(&state.db, payload.to_user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::NotFound("Recipient not found"))?;

    let message = Message::create(&state.db, current.id, payload.to_user_id, &payload.content)
        .await
        .map_err(ApiError::Internal)?;

    info!(message_id = %message.id, from = %current.id, to = %payload.to_user_id, "message sent");
    Ok(Json(message))
}

#[instrument(skip(state, current))]
pub async fn list_messages(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<Vec<MessageWithNames>>, ApiError> {
    let messages = Message::list_for_user(&state.db, current.id)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(messages))
}
