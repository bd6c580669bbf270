use std::time::Duration;

use crate::backoff::BackoffConfig;

/// Default deadline for a transcript fetch.
const DEFAULT_TRANSCRIPT_TIMEOUT_SECS: u64 = 60;
/// Default deadline for content generation.
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 180;
/// Default age after which a pending article counts as stalled.
const DEFAULT_STALL_AFTER_SECS: i64 = 300;
/// Default number of attempts for a completion write.
const DEFAULT_PERSIST_ATTEMPTS: u32 = 3;

/// Timeouts and retry policy for lifecycle tasks.
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    pub transcript_timeout: Duration,
    pub generation_timeout: Duration,
    /// Pending articles whose `updated_at` is older than this are stalled.
    pub stall_after: chrono::Duration,
    /// Attempts (including the first) for a task's completion write.
    pub persist_attempts: u32,
    pub persist_backoff: BackoffConfig,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            transcript_timeout: Duration::from_secs(DEFAULT_TRANSCRIPT_TIMEOUT_SECS),
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
            stall_after: chrono::Duration::seconds(DEFAULT_STALL_AFTER_SECS),
            persist_attempts: DEFAULT_PERSIST_ATTEMPTS,
            persist_backoff: BackoffConfig::default(),
        }
    }
}

impl LifecycleConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `TRANSCRIPT_TIMEOUT_SECS` | `60`    |
    /// | `GENERATION_TIMEOUT_SECS` | `180`   |
    /// | `STALL_AFTER_SECS`        | `300`   |
    /// | `PERSIST_ATTEMPTS`        | `3`     |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but does not parse.
    pub fn from_env() -> Self {
        let transcript_timeout_secs: u64 = std::env::var("TRANSCRIPT_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TRANSCRIPT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("TRANSCRIPT_TIMEOUT_SECS must be a valid u64");

        let generation_timeout_secs: u64 = std::env::var("GENERATION_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_GENERATION_TIMEOUT_SECS.to_string())
            .parse()
            .expect("GENERATION_TIMEOUT_SECS must be a valid u64");

        let stall_after_secs: i64 = std::env::var("STALL_AFTER_SECS")
            .unwrap_or_else(|_| DEFAULT_STALL_AFTER_SECS.to_string())
            .parse()
            .expect("STALL_AFTER_SECS must be a valid i64");

        let persist_attempts: u32 = std::env::var("PERSIST_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_PERSIST_ATTEMPTS.to_string())
            .parse()
            .expect("PERSIST_ATTEMPTS must be a valid u32");
        assert!(persist_attempts > 0, "PERSIST_ATTEMPTS must be at least 1");

        Self {
            transcript_timeout: Duration::from_secs(transcript_timeout_secs),
            generation_timeout: Duration::from_secs(generation_timeout_secs),
            stall_after: chrono::Duration::seconds(stall_after_secs),
            persist_attempts,
            persist_backoff: BackoffConfig::default(),
        }
    }
}
