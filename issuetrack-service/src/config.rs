//! Configuration loaded from environment variables.
//!
//! A `.env` file is honored in development. `DATABASE_URL` and `JWT_SECRET`
//! are required; everything else has defaults.
//!
//! # Environment variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool upper bound (default: 10)
//! - `JWT_SECRET`: credential signing secret, at least 32 bytes (required)
//! - `LIMITER_RPS` / `LIMITER_BURST` / `LIMITER_ENABLED`: rate limiter knobs
//! - `ROLES_FILE`: path to the permission table document (default: roles.json)
//! - `OP_TIMEOUT_SECONDS`: per-operation store deadline (default: 5)

use std::env;
use std::time::Duration;

use issuetrack_shared::db::pool::DatabaseConfig;

use crate::rate_limit::RateLimitConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub limiter: RateLimitConfig,
    /// Path to the declarative permission table document.
    pub roles_file: String,
    pub op_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Credential signing secret; must be at least 32 bytes.
    pub secret: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let limiter_rps = env::var("LIMITER_RPS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<f64>()?;
        let limiter_burst = env::var("LIMITER_BURST")
            .unwrap_or_else(|_| "4".to_string())
            .parse::<u32>()?;
        let limiter_enabled = env::var("LIMITER_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()?;

        let roles_file = env::var("ROLES_FILE").unwrap_or_else(|_| "roles.json".to_string());
        let op_timeout_seconds = env::var("OP_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()?;

        Ok(Self {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                ..DatabaseConfig::default()
            },
            jwt: JwtConfig { secret: jwt_secret },
            limiter: RateLimitConfig {
                rps: limiter_rps,
                burst: limiter_burst,
                enabled: limiter_enabled,
            },
            roles_file,
            op_timeout_seconds,
        })
    }

    /// The per-operation store deadline as a `Duration`.
    pub fn op_timeout(&self) -> Duration {
        Duration::from_secs(self.op_timeout_seconds)
    }
}
