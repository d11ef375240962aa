//! Settlement configuration with TOML file support.

use exit_format_utils::{init_logging, LogFormat};
use serde::{Deserialize, Serialize};

use crate::claim::ClaimIndexing;
use crate::SettlementError;

/// Configuration for a [`SettlementEngine`](crate::SettlementEngine).
///
/// Can be loaded from a TOML file via [`SettlementConfig::from_toml_file`]
/// or built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// What claim request indices refer to: "target_allocation" or
    /// "guarantee_destination".
    #[serde(default)]
    pub claim_indexing: ClaimIndexing,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SettlementConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, SettlementError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettlementError::Config(format!("{path}: {e}")))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SettlementError> {
        toml::from_str(s).map_err(|e| SettlementError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("SettlementConfig is always serializable to TOML")
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), SettlementError> {
        init_logging(self.log_format, &self.log_level)
            .map_err(|e| SettlementError::Config(format!("logging: {e}")))
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            claim_indexing: ClaimIndexing::default(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
