use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub cookie_secure: bool,
    pub cors_allowed_origins: Vec<String>,
    pub seed_demo_data: bool,
}

impl Config {
    /// Read configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let session_secret = lookup("SESSION_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| anyhow!("SESSION_SECRET not set"))?;

        let session_ttl_hours = parse_var(&lookup, "SESSION_TTL_HOURS", 24)?;
        if session_ttl_hours <= 0 {
            bail!("SESSION_TTL_HOURS must be positive");
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| String::from("127.0.0.1")),
            port: parse_var(&lookup, "PORT", 8080)?,
            session_secret,
            session_ttl_hours,
            bcrypt_cost: parse_var(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cookie_secure: parse_var(&lookup, "COOKIE_SECURE", false)?,
            cors_allowed_origins,
            seed_demo_data: parse_var(&lookup, "SEED_DEMO_DATA", false)?,
        })
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid value {:?} for {}: {}", raw, key, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 0,
            session_secret: String::from("test-session-secret"),
            session_ttl_hours: 1,
            bcrypt_cost: 4,
            cookie_secure: false,
            cors_allowed_origins: Vec::new(),
            seed_demo_data: false,
        }
    }
}
