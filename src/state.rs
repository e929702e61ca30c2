use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::Config;

/// Source of "now" for reports. Yearly buckets depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(now) => *now,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub clock: Clock,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let clock = match config.fixed_now {
            Some(now) => {
                tracing::info!("Clock frozen at {}", now);
                Clock::Fixed(now)
            }
            None => Clock::System,
        };
        Self {
            config: Arc::new(config),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
