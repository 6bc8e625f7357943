use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub session_id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedbackWithAuthor {
    pub id: Uuid,
    pub session_id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: OffsetDateTime,
    pub from_user_name: String,
}

impl Feedback {
    pub async fn create(
        db: &PgPool,
        session_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> anyhow::Result<Feedback> {
        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (id, session_id, from_user_id, to_user_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, session_id, from_user_id, to_user_id, rating, comment, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session_id)
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(db)
        .await?;
        Ok(feedback)
    }

    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<FeedbackWithAuthor>> {
        let rows = sqlx::query_as::<_, FeedbackWithAuthor>(
            r#"
            SELECT fb.id, fb.session_id, fb.from_user_id, fb.to_user_id, fb.rating,
                   fb.comment, fb.created_at, u.name AS from_user_name
            FROM feedback fb
            JOIN users u ON u.id = fb.from_user_id
            WHERE fb.to_user_id = $1
            ORDER BY fb.created_at DESC
            LIMIT 1000
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn average_rating(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<f64>> {
        let avg: Option<f64> =
            sqlx::query_scalar("SELECT AVG(rating)::float8 FROM feedback WHERE to_user_id = $1")
                .bind(user_id)
                .fetch_one(db)
                .await?;
        Ok(avg)
    }
}
