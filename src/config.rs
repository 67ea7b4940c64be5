//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section has defaults, so a partial file (or none of a section)
//! still yields a runnable configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::types::SimulationError;

/// Default user list endpoint.
pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub rounds: u32,
    /// Fixed RNG seed; a fresh one is drawn per run when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { rounds: 5, seed: None }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Http,
    File,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub url: String,
    /// JSON file of users, read when `kind = "file"`.
    pub path: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            url: DEFAULT_USERS_URL.to_string(),
            path: None,
            timeout_secs: 30,
        }
    }
}

/// Narration pauses, in milliseconds.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PacingConfig {
    /// Actually sleep on waits. Off for fast, non-interactive runs.
    pub realtime: bool,
    /// Time the "X vs Y" line stays up.
    pub match_intro_ms: u64,
    /// Time for the matchup line to clear.
    pub match_exit_ms: u64,
    /// Pause between the chooser prompt and their call.
    pub chooser_ms: u64,
    /// Pause before the coin is revealed.
    pub reveal_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            realtime: true,
            match_intro_ms: 2000,
            match_exit_ms: 1000,
            chooser_ms: 1000,
            reveal_ms: 1500,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { enabled: false, port: 8080 }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.simulation.rounds == 0 {
            return Err(SimulationError::Config(
                "simulation.rounds must be at least 1".into(),
            ));
        }
        if self.source.kind == SourceKind::File && self.source.path.is_none() {
            return Err(SimulationError::Config(
                "source.path is required when source.kind = \"file\"".into(),
            ));
        }
        if self.source.timeout_secs == 0 {
            return Err(SimulationError::Config(
                "source.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
