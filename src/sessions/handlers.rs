use axum::{
    extract::{Path, Query, State},
    routing::{post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::{Role, User};

use super::dto::{CreateSessionRequest, StatusQuery};
use super::repo::{Session, SessionWithNames};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session).get(list_sessions))
        .route("/sessions/:id/status", put(update_session_status))
}

/// Only the mentor the session was booked with, or an admin, may move it
/// through its lifecycle.
fn can_update_status(user: &User, session: &Session) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Mentor => session.mentor_id == user.id,
        Role::Student => false,
    }
}

#[instrument(skip(state, current, payload))]
pub async fn create_session(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<Session>, ApiError> {
    if current.role != Role::Student {
        warn!(user_id = %current.id, role = %current.role.as_str(), "session booking denied");
        return Err(ApiError::Forbidden("Only students can book sessions"));
    }

    let mentor = User::find_by_id(&state.db, payload.mentor_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::NotFound("Mentor not found"))?;

    let session = Session::create(
        &state.db,
        current.id,
        mentor.id,
        &payload.date,
        &payload.time,
        payload.notes.as_deref(),
    )
    .await
    .map_err(ApiError::Internal)?;

    info!(session_id = %session.id, student_id = %current.id, mentor_id = %mentor.id, "session booked");
    Ok(Json(session))
}

#[instrument(skip(state, current))]
pub async fn list_sessions(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<Vec<SessionWithNames>>, ApiError> {
    let sessions = match current.role {
        Role::Student => Session::list_by_student(&state.db, current.id).await,
        Role::Mentor => Session::list_by_mentor(&state.db, current.id).await,
        Role::Admin => Session::list_all(&state.db).await,
    }
    .map_err(ApiError::Internal)?;
    Ok(Json(sessions))
}

#[instrument(skip(state, current))]
pub async fn update_session_status(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(session_id): Path<Uuid>,
    Query(q): Query<StatusQuery>,
) -> Result<Json<Value>, ApiError> {
    let session = Session::find_by_id(&state.db, session_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::NotFound("Session not found"))?;

    if !can_update_status(&current, &session) {
        warn!(user_id = %current.id, session_id = %session.id, "status update denied");
        return Err(ApiError::Forbidden("Not authorized"));
    }

    Session::update_status(&state.db, session.id, q.status)
        .await
        .map_err(ApiError::Internal)?;

    info!(session_id = %session.id, status = %q.status.as_str(), "session status updated");
    Ok(Json(json!({ "message": "Session status updated" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::repo::SessionStatus;
    use time::OffsetDateTime;

    fn make_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", role.as_str()),
            name: role.as_str().to_string(),
            password_hash: "hash".into(),
            role,
            college: None,
            bio: None,
            skills: vec![],
            expertise: vec![],
            years_experience: None,
            photo: None,
            rating: 0.0,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn make_session(student_id: Uuid, mentor_id: Uuid) -> Session {
        Session {
            id: Uuid::new_v4(),
            student_id,
            mentor_id,
            date: "2026-09-01".into(),
            time: "10:00".into(),
            status: SessionStatus::Pending,
            notes: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn owning_mentor_can_update_status() {
        let mentor = make_user(Role::Mentor);
        let session = make_session(Uuid::new_v4(), mentor.id);
        assert!(can_update_status(&mentor, &session));
    }

    #[test]
    fn other_mentor_cannot_update_status() {
        let mentor = make_user(Role::Mentor);
        let session = make_session(Uuid::new_v4(), Uuid::new_v4());
        assert!(!can_update_status(&mentor, &session));
    }

    #[test]
    fn student_cannot_update_status() {
        let student = make_user(Role::Student);
        // Even the student who booked the session.
        let session = make_session(student.id, Uuid::new_v4());
        assert!(!can_update_status(&student, &session));
    }

    #[test]
    fn admin_can_update_any_status() {
        let admin = make_user(Role::Admin);
        let session = make_session(Uuid::new_v4(), Uuid::new_v4());
        assert!(can_update_status(&admin, &session));
    }
}
