//! Transcript and content-generation adapters.
//!
//! - [`simulated`] -- fixed-delay adapters returning canned text.
//! - [`http`] -- clients for the standalone transcription and generation services.
//!
//! [`CollaboratorConfig::build`] picks one pair based on `COLLABORATOR_MODE`.

pub mod http;
pub mod simulated;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use vidscribe_core::generation::{ContentGenerator, TranscriptSource};

use self::http::{HttpContentGenerator, HttpTranscriptSource};
use self::simulated::{SimulatedContentGenerator, SimulatedTranscriptSource};

/// Which adapter pair to wire into the lifecycle manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorMode {
    Simulated,
    Http,
}

impl CollaboratorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Http => "http",
        }
    }
}

impl FromStr for CollaboratorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "http" => Ok(Self::Http),
            other => Err(format!(
                "Unknown collaborator mode '{other}' (expected 'simulated' or 'http')"
            )),
        }
    }
}

/// Adapter selection and per-adapter settings.
#[derive(Debug, Clone)]
pub struct CollaboratorConfig {
    pub mode: CollaboratorMode,
    pub transcribe_service_url: String,
    pub generation_service_url: String,
    pub simulated_transcript_delay: Duration,
    pub simulated_generation_delay: Duration,
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            mode: CollaboratorMode::Simulated,
            transcribe_service_url: "http://localhost:5000".into(),
            generation_service_url: "http://localhost:5001".into(),
            simulated_transcript_delay: simulated::DEFAULT_TRANSCRIPT_DELAY,
            simulated_generation_delay: simulated::DEFAULT_GENERATION_DELAY,
        }
    }
}

impl CollaboratorConfig {
    /// Load adapter configuration from environment variables.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `COLLABORATOR_MODE`             | `simulated`             |
    /// | `TRANSCRIBE_SERVICE_URL`        | `http://localhost:5000` |
    /// | `GENERATION_SERVICE_URL`        | `http://localhost:5001` |
    /// | `SIMULATED_TRANSCRIPT_DELAY_MS` | `2000`                  |
    /// | `SIMULATED_GENERATION_DELAY_MS` | `3000`                  |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but does not parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let mode = std::env::var("COLLABORATOR_MODE")
            .map(|v| v.parse::<CollaboratorMode>().unwrap_or_else(|e| panic!("{e}")))
            .unwrap_or(defaults.mode);

        let transcribe_service_url = std::env::var("TRANSCRIBE_SERVICE_URL")
            .unwrap_or(defaults.transcribe_service_url);
        let generation_service_url = std::env::var("GENERATION_SERVICE_URL")
            .unwrap_or(defaults.generation_service_url);

        let transcript_delay_ms: u64 = std::env::var("SIMULATED_TRANSCRIPT_DELAY_MS")
            .unwrap_or_else(|_| defaults.simulated_transcript_delay.as_millis().to_string())
            .parse()
            .expect("SIMULATED_TRANSCRIPT_DELAY_MS must be a valid u64");
        let generation_delay_ms: u64 = std::env::var("SIMULATED_GENERATION_DELAY_MS")
            .unwrap_or_else(|_| defaults.simulated_generation_delay.as_millis().to_string())
            .parse()
            .expect("SIMULATED_GENERATION_DELAY_MS must be a valid u64");

        Self {
            mode,
            transcribe_service_url,
            generation_service_url,
            simulated_transcript_delay: Duration::from_millis(transcript_delay_ms),
            simulated_generation_delay: Duration::from_millis(generation_delay_ms),
        }
    }

    /// Construct the configured adapter pair.
    pub fn build(&self) -> (Arc<dyn TranscriptSource>, Arc<dyn ContentGenerator>) {
        match self.mode {
            CollaboratorMode::Simulated => (
                Arc::new(SimulatedTranscriptSource::new(self.simulated_transcript_delay)),
                Arc::new(SimulatedContentGenerator::new(self.simulated_generation_delay)),
            ),
            CollaboratorMode::Http => {
                let client = reqwest::Client::new();
                (
                    Arc::new(HttpTranscriptSource::with_client(
                        client.clone(),
                        self.transcribe_service_url.clone(),
                    )),
                    Arc::new(HttpContentGenerator::with_client(
                        client,
                        self.generation_service_url.clone(),
                    )),
                )
            }
        }
    }
}
