use chrono::{DateTime, Utc};
use std::env;

use crate::date_utils::parse_instant;
use crate::models::BucketMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Locale for bucket labels and money, e.g. `en-US` or `de-DE`.
    pub locale: String,
    pub bucket_mode: BucketMode,
    /// Freezes the clock when set; yearly buckets are anchored on it.
    pub fixed_now: Option<DateTime<Utc>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 7070,
            locale: "en-US".into(),
            bucket_mode: BucketMode::Overwrite,
            fixed_now: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let bucket_mode = match env::var("HOST_REPORTS_BUCKET_MODE") {
            Ok(mode) => mode.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to overwrite", e);
                defaults.bucket_mode
            }),
            Err(_) => defaults.bucket_mode,
        };

        let fixed_now = env::var("HOST_REPORTS_FIXED_NOW")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .and_then(|v| match parse_instant(&v) {
                Ok(now) => Some(now),
                Err(e) => {
                    tracing::warn!("Ignoring HOST_REPORTS_FIXED_NOW: {}", e);
                    None
                }
            });

        Self {
            host: env::var("HOST_REPORTS_HOST").unwrap_or(defaults.host),
            port: port_from(env::var("HOST_REPORTS_PORT").ok(), defaults.port),
            locale: env::var("HOST_REPORTS_LOCALE")
                .ok()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(defaults.locale),
            bucket_mode,
            fixed_now,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn port_from(raw: Option<String>, default: u16) -> u16 {
    match raw {
        Some(p) => p.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid HOST_REPORTS_PORT '{}', falling back to {}", p, default);
            default
        }),
        None => default,
    }
}
