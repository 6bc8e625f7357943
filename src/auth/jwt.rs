use std::time::Duration;

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::claims::Claims;
use crate::config::JwtConfig;

/// Why a token failed verification. Kept for logging only; callers at the
/// HTTP boundary collapse every variant to a uniform 401.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("bad signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        }
    }
}

/// Holds JWT signing and verification keys with config data.
/// Built once at startup; rotating the secret invalidates all
/// outstanding tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::from_secs((cfg.ttl_hours.max(0) as u64) * 3600),
        }
    }

    fn sign_with_ttl(&self, user_id: Uuid, ttl: TimeDuration) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: (now + ttl).unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    /// Issue a bearer token for a user. Single token kind, 72h by default.
    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.sign_with_ttl(user_id, TimeDuration::seconds(self.ttl.as_secs() as i64))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: secret.into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_hours: 72,
        })
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_other_key() {
        let good = make_keys("secret-a");
        let other = make_keys("secret-b");
        let token = good.sign(Uuid::new_v4()).expect("sign");
        let err = other.verify(&token).unwrap_err();
        assert_eq!(err, TokenError::BadSignature);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys("dev-secret");
        // Well past the default 60s validation leeway.
        let token = keys
            .sign_with_ttl(Uuid::new_v4(), TimeDuration::minutes(-10))
            .expect("sign");
        let err = keys.verify(&token).unwrap_err();
        assert_eq!(err, TokenError::Expired);
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys("dev-secret");
        assert_eq!(keys.verify("not-a-jwt").unwrap_err(), TokenError::Malformed);
        assert_eq!(keys.verify("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let keys = make_keys("dev-secret");
        let token = keys.sign(Uuid::new_v4()).expect("sign");

        // Re-encode the payload with a different subject but keep the
        // original signature: forged subject must not verify.
        let forged_claims = Claims {
            sub: Uuid::new_v4(),
            iat: OffsetDateTime::now_utc().unix_timestamp() as usize,
            exp: (OffsetDateTime::now_utc() + TimeDuration::hours(1)).unix_timestamp() as usize,
            iss: "test-issuer".into(),
            aud: "test-aud".into(),
        };
        let forged = encode(
            &Header::default(),
            &forged_claims,
            &EncodingKey::from_secret(b"attacker-key"),
        )
        .expect("encode");
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert!(keys.verify(&spliced).is_err());
    }
}
