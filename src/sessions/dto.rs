use serde::Deserialize;
use uuid::Uuid;

use super::repo::SessionStatus;

/// Request body for booking a session.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub mentor_id: Uuid,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: SessionStatus,
}
