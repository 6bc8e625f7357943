use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub seed_sample_data: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "mentorbridge".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "mentorbridge-users".into()),
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(72),
        };
        let seed_sample_data = std::env::var("SEED_SAMPLE_DATA")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        Ok(Self {
            database_url,
            jwt,
            seed_sample_data,
        })
    }
}
