use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub content: String,
    pub read: bool,
    pub created_at: OffsetDateTime,
}

/// Message joined with sender and recipient names for listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MessageWithNames {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub content: String,
    pub read: bool,
    pub created_at: OffsetDateTime,
    pub from_user_name: String,
    pub to_user_name: String,
}

impl Message {
    pub async fn create(
        db: &PgPool,
        from_user_id: Uuid,
        to_user_id: Uuid,
        content: &str,
    ) -> anyhow::Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, from_user_id, to_user_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, from_user_id, to_user_id, content, read, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(content)
        .fetch_one(db)
        .await?;
        Ok(message)
    }

    /// Both directions for one user, newest first.
    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<MessageWithNames>> {
        let rows = sqlx::query_as::<_, MessageWithNames>(
            r#"
            SELECT m.id, m.from_user_id, m.to_user_id, m.content, m.read, m.created_at,
                   f.name AS from_user_name, t.name AS to_user_name
            FROM messages m
            JOIN users f ON f.id = m.from_user_id
            JOIN users t ON t.id = m.to_user_id
            WHERE m.from_user_id = $1 OR m.to_user_id = $1
            ORDER BY m.created_at DESC
            LIMIT 1000
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
