use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::Role;

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/stats", get(stats))
        .route("/analytics/chart-data", get(chart_data))
}

async fn count(db: &PgPool, sql: &str, bind: Option<Uuid>) -> anyhow::Result<i64> {
    let q = sqlx::query_scalar::<_, i64>(sql);
    let q = match bind {
        Some(id) => q.bind(id),
        None => q,
    };
    Ok(q.fetch_one(db).await?)
}

fn progress_pct(completed: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((completed as f64 / total as f64) * 1000.0).round() / 10.0
}

#[instrument(skip(state, current))]
pub async fn stats(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let db = &state.db;
    let body = match current.role {
        Role::Student => {
            let total = count(db, "SELECT COUNT(*) FROM sessions WHERE student_id = $1", Some(current.id)).await?;
            let completed = count(db, "SELECT COUNT(*) FROM sessions WHERE student_id = $1 AND status = 'completed'", Some(current.id)).await?;
            let pending = count(db, "SELECT COUNT(*) FROM sessions WHERE student_id = $1 AND status = 'pending'", Some(current.id)).await?;
            json!({
                "total_sessions": total,
                "completed_sessions": completed,
                "pending_sessions": pending,
                "progress": progress_pct(completed, total),
            })
        }
        Role::Mentor => {
            let total = count(db, "SELECT COUNT(*) FROM sessions WHERE mentor_id = $1", Some(current.id)).await?;
            let completed = count(db, "SELECT COUNT(*) FROM sessions WHERE mentor_id = $1 AND status = 'completed'", Some(current.id)).await?;
            let pending = count(db, "SELECT COUNT(*) FROM sessions WHERE mentor_id = $1 AND status = 'pending'", Some(current.id)).await?;
            let feedback_count = count(db, "SELECT COUNT(*) FROM feedback WHERE to_user_id = $1", Some(current.id)).await?;
            json!({
                "total_sessions": total,
                "completed_sessions": completed,
                "pending_sessions": pending,
                "feedback_count": feedback_count,
                "rating": current.rating,
            })
        }
        Role::Admin => {
            let total_users = count(db, "SELECT COUNT(*) FROM users", None).await?;
            let total_students = count(db, "SELECT COUNT(*) FROM users WHERE role = 'student'", None).await?;
            let total_mentors = count(db, "SELECT COUNT(*) FROM users WHERE role = 'mentor'", None).await?;
            let total_sessions = count(db, "SELECT COUNT(*) FROM sessions", None).await?;
            let completed_sessions = count(db, "SELECT COUNT(*) FROM sessions WHERE status = 'completed'", None).await?;
            json!({
                "total_users": total_users,
                "total_students": total_students,
                "total_mentors": total_mentors,
                "total_sessions": total_sessions,
                "completed_sessions": completed_sessions,
            })
        }
    };
    Ok(Json(body))
}

#[instrument(skip(state, current))]
pub async fn chart_data(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let statuses = ["pending", "confirmed", "completed", "cancelled"];
    let mut data = Vec::with_capacity(statuses.len());
    for status in statuses {
        let n = match current.role {
            Role::Student => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM sessions WHERE student_id = $1 AND status = $2",
                )
                .bind(current.id)
                .bind(status)
                .fetch_one(&state.db)
                .await
            }
            Role::Mentor => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM sessions WHERE mentor_id = $1 AND status = $2",
                )
                .bind(current.id)
                .bind(status)
                .fetch_one(&state.db)
                .await
            }
            Role::Admin => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sessions WHERE status = $1")
                    .bind(status)
                    .fetch_one(&state.db)
                    .await
            }
        }
        .map_err(|e| ApiError::Internal(e.into()))?;
        data.push(n);
    }

    Ok(Json(json!({ "labels": statuses, "data": data })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_handles_zero_sessions() {
        assert_eq!(progress_pct(0, 0), 0.0);
    }

    #[test]
    fn progress_rounds_to_one_decimal() {
        assert_eq!(progress_pct(1, 3), 33.3);
        assert_eq!(progress_pct(2, 3), 66.7);
        assert_eq!(progress_pct(3, 3), 100.0);
    }
}
