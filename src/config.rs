//! Environment-backed defaults (`.env` supported via `dotenvy`).
//!
//! CLI flags override these; see [`Settings::engine_config`].

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{DEFAULT_TOP_GROWTH, EngineConfig};
use crate::error::{AppError, EXIT_USAGE};

pub const ENV_TOP_GROWTH: &str = "MSME_TOP_GROWTH";
pub const ENV_THINK_DELAY_MS: &str = "MSME_THINK_DELAY_MS";
pub const ENV_LOG_FILE: &str = "MSME_LOG_FILE";

/// Settings gathered from the environment before CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub top_growth: usize,
    pub think_delay: Duration,
    /// Where to send logs while the TUI owns the terminal.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_growth: DEFAULT_TOP_GROWTH,
            think_delay: Duration::ZERO,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Settings::default();

        if let Some(raw) = get(ENV_TOP_GROWTH) {
            settings.top_growth = raw
                .parse()
                .map_err(|e| AppError::new(EXIT_USAGE, format!("Invalid {ENV_TOP_GROWTH} '{raw}': {e}")))?;
        }
        if let Some(raw) = get(ENV_THINK_DELAY_MS) {
            let ms: u64 = raw
                .parse()
                .map_err(|e| AppError::new(EXIT_USAGE, format!("Invalid {ENV_THINK_DELAY_MS} '{raw}': {e}")))?;
            settings.think_delay = Duration::from_millis(ms);
        }
        settings.log_file = get(ENV_LOG_FILE).map(PathBuf::from);

        Ok(settings)
    }

    /// Engine config with optional CLI overrides applied.
    pub fn engine_config(&self, top: Option<usize>, delay_ms: Option<u64>) -> EngineConfig {
        EngineConfig {
            top_growth: top.unwrap_or(self.top_growth),
            think_delay: delay_ms.map(Duration::from_millis).unwrap_or(self.think_delay),
        }
    }
}
