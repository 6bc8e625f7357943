use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle of a booking session. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown session status: {0}")]
pub struct ParseStatusError(String);

impl TryFrom<String> for SessionStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(SessionStatus::Pending),
            "confirmed" => Ok(SessionStatus::Confirmed),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            _ => Err(ParseStatusError(value)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    pub date: String,
    pub time: String,
    #[sqlx(try_from = "String")]
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Session row joined with the participant names, as listings return it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SessionWithNames {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    pub date: String,
    pub time: String,
    #[sqlx(try_from = "String")]
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub student_name: String,
    pub mentor_name: String,
}

const SESSION_COLUMNS: &str = "id, student_id, mentor_id, date, time, status, notes, created_at";

const JOINED_SELECT: &str = r#"
    SELECT s.id, s.student_id, s.mentor_id, s.date, s.time, s.status, s.notes, s.created_at,
           st.name AS student_name, m.name AS mentor_name
    FROM sessions s
    JOIN users st ON st.id = s.student_id
    JOIN users m ON m.id = s.mentor_id
"#;

impl Session {
    pub async fn create(
        db: &PgPool,
        student_id: Uuid,
        mentor_id: Uuid,
        date: &str,
        time: &str,
        notes: Option<&str>,
    ) -> anyhow::Result<Session> {
        let session = sqlx::query_as::<_, Session>(&format!(
            r#"
            INSERT INTO sessions (id, student_id, mentor_id, date, time, status, notes)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6)
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(mentor_id)
        .bind(date)
        .bind(time)
        .bind(notes)
        .fetch_one(db)
        .await?;
        Ok(session)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(session)
    }

    pub async fn list_by_student(db: &PgPool, student_id: Uuid) -> anyhow::Result<Vec<SessionWithNames>> {
        let rows = sqlx::query_as::<_, SessionWithNames>(&format!(
            "{JOINED_SELECT} WHERE s.student_id = $1 ORDER BY s.created_at DESC LIMIT 1000"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_mentor(db: &PgPool, mentor_id: Uuid) -> anyhow::Result<Vec<SessionWithNames>> {
        let rows = sqlx::query_as::<_, SessionWithNames>(&format!(
            "{JOINED_SELECT} WHERE s.mentor_id = $1 ORDER BY s.created_at DESC LIMIT 1000"
        ))
        .bind(mentor_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<SessionWithNames>> {
        let rows = sqlx::query_as::<_, SessionWithNames>(&format!(
            "{JOINED_SELECT} ORDER BY s.created_at DESC LIMIT 1000"
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn update_status(
        db: &PgPool,
        id: Uuid,
        status: SessionStatus,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE sessions SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_closed_set() {
        assert_eq!(
            SessionStatus::try_from("pending".to_string()).unwrap(),
            SessionStatus::Pending
        );
        assert_eq!(
            SessionStatus::try_from("cancelled".to_string()).unwrap(),
            SessionStatus::Cancelled
        );
        assert!(SessionStatus::try_from("done".to_string()).is_err());
    }
}
