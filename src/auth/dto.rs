use serde::{Deserialize, Serialize};

use crate::users::dto::PublicUser;
use crate::users::repo::Role;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
    pub college: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_role_is_a_closed_set() {
        let ok: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@b.co","name":"A","password":"longenough","role":"student"}"#,
        )
        .unwrap();
        assert_eq!(ok.role, Role::Student);

        let bad = serde_json::from_str::<RegisterRequest>(
            r#"{"email":"a@b.co","name":"A","password":"longenough","role":"root"}"#,
        );
        assert!(bad.is_err());
    }
}
