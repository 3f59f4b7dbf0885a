use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use rand::RngCore;
use serde::Deserialize;

const DEFAULT_SESSION_TTL_MINUTES: i64 = 60 * 24 * 31;
/// One year; anything longer is a misconfiguration.
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Signed session cookie settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
    pub pages_dir: PathBuf,
    pub static_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://songs.db".into());

        let secret = match std::env::var("SESSION_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                tracing::warn!("SESSION_SECRET not set; sessions will not survive a restart");
                random_secret()
            }
        };

        let session = SessionConfig {
            secret,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "moodtunes".into()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "moodtunes-web".into()),
            ttl_minutes: session_ttl_minutes(std::env::var("SESSION_TTL_MINUTES").ok().as_deref())?,
            cookie_secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };

        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => 5000,
        };

        Ok(Self {
            database_url,
            session,
            pages_dir: std::env::var("PAGES_DIR")
                .unwrap_or_else(|_| "templates".into())
                .into(),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "static".into())
                .into(),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
        })
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn session_ttl_minutes(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_SESSION_TTL_MINUTES);
    };
    let minutes = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("SESSION_TTL_MINUTES must be a whole number, got {raw:?}"))?;
    anyhow::ensure!(
        (1..=MAX_SESSION_TTL_MINUTES).contains(&minutes),
        "SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {minutes}"
    );
    Ok(minutes)
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
