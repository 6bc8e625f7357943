use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

/// Extracts the Bearer token, verifies it and resolves the user record.
///
/// Every failure path (missing header, malformed token, bad signature,
/// expiry, vanished user) is logged with its real cause and rejected with
/// the same `Unauthenticated` error.
pub struct CurrentUser(pub User);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let auth = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            warn!("missing or malformed Authorization header");
            ApiError::Unauthenticated
        })?;

        let claims = state.jwt.verify(token).map_err(|e| {
            warn!(reason = %e, "token rejected");
            ApiError::Unauthenticated
        })?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token subject no longer resolves");
                ApiError::Unauthenticated
            })?;

        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let req = Request::builder()
            .header(axum::http::header::AUTHORIZATION, value)
            .body(())
            .unwrap();
        req.into_parts().0
    }

    #[test]
    fn bearer_token_strips_scheme() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
        let parts = parts_with_auth("bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&parts), None);

        let req = Request::builder().body(()).unwrap();
        let (parts, _) = req.into_parts();
        assert_eq!(bearer_token(&parts), None);
    }
}
