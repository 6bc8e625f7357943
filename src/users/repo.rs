use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::ProfileUpdate;

/// Closed role set. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Mentor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Mentor => "mentor",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

impl TryFrom<String> for Role {
    type Error = ParseRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "student" => Ok(Role::Student),
            "mentor" => Ok(Role::Mentor),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseRoleError(value)),
        }
    }
}

/// User record in the database. The password hash never serializes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub college: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub expertise: Vec<String>,
    pub years_experience: Option<i32>,
    pub photo: Option<String>,
    pub rating: f64,
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, email, name, password_hash, role, college, bio, skills, \
     expertise, years_experience, photo, rating, created_at";

pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub college: Option<&'a str>,
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a new user. Email uniqueness is enforced by the store's UNIQUE
    /// constraint, so a racing duplicate registration fails here instead of
    /// overwriting; the caller maps that violation to a conflict.
    pub async fn create(db: &PgPool, new: NewUser<'_>) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, email, name, password_hash, role, college)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.email)
        .bind(new.name)
        .bind(new.password_hash)
        .bind(new.role.as_str())
        .bind(new.college)
        .fetch_one(db)
        .await
    }

    /// Partial profile update. Identity fields (id, email, role, hash,
    /// rating) are not touchable from here.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                college = COALESCE($4, college),
                skills = COALESCE($5, skills),
                expertise = COALESCE($6, expertise),
                years_experience = COALESCE($7, years_experience),
                photo = COALESCE($8, photo)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.college.as_deref())
        .bind(update.skills.as_deref())
        .bind(update.expertise.as_deref())
        .bind(update.years_experience)
        .bind(update.photo.as_deref())
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Case-insensitive mentor search on name and expertise.
    pub async fn search_mentors(
        db: &PgPool,
        search: Option<&str>,
        expertise: Option<&str>,
    ) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE role = 'mentor'
              AND ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR array_to_string(expertise, ' ') ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL
                   OR array_to_string(expertise, ' ') ILIKE '%' || $2 || '%')
            ORDER BY rating DESC
            LIMIT 1000
            "#
        ))
        .bind(search)
        .bind(expertise)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn update_rating(db: &PgPool, id: Uuid, rating: f64) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET rating = $2 WHERE id = $1")
            .bind(id)
            .bind(rating)
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_closed_set() {
        assert_eq!(Role::try_from("student".to_string()).unwrap(), Role::Student);
        assert_eq!(Role::try_from("mentor".to_string()).unwrap(), Role::Mentor);
        assert_eq!(Role::try_from("admin".to_string()).unwrap(), Role::Admin);
        assert!(Role::try_from("superuser".to_string()).is_err());
        assert!(Role::try_from("Student".to_string()).is_err());
    }

    #[test]
    fn role_roundtrips_through_text() {
        for role in [Role::Student, Role::Mentor, Role::Admin] {
            assert_eq!(Role::try_from(role.as_str().to_string()).unwrap(), role);
        }
    }

    #[test]
    fn user_json_never_contains_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            name: "Alice".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            role: Role::Student,
            college: None,
            bio: None,
            skills: vec![],
            expertise: vec![],
            years_experience: None,
            photo: None,
            rating: 0.0,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }
}
