use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::{Role, User};

/// Public projection of a user. This struct has no hash field at all, so no
/// serialization path can leak the credential.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub college: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub expertise: Vec<String>,
    pub years_experience: Option<i32>,
    pub photo: Option<String>,
    pub rating: f64,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            college: u.college,
            bio: u.bio,
            skills: u.skills,
            expertise: u.expertise,
            years_experience: u.years_experience,
            photo: u.photo,
            rating: u.rating,
        }
    }
}

/// Request body for profile updates. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub college: Option<String>,
    pub skills: Option<Vec<String>>,
    pub expertise: Option<Vec<String>>,
    pub years_experience: Option<i32>,
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MentorQuery {
    pub search: Option<String>,
    pub expertise: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn public_user_serializes_role_lowercase() {
        let user = User {
            id: Uuid::new_v4(),
            email: "mentor@example.com".into(),
            name: "Mentor".into(),
            password_hash: "hash".into(),
            role: Role::Mentor,
            college: Some("Some College".into()),
            bio: None,
            skills: vec![],
            expertise: vec!["AI".into()],
            years_experience: Some(10),
            photo: None,
            rating: 4.8,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains(r#""role":"mentor""#));
        assert!(!json.contains("password"));
        assert!(!json.contains("created_at"));
    }
}
