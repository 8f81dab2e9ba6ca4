//! Startup configuration: fee defaults, shipping preset labels, scanner
//! backend and scan pacing.

use std::{env, fs, io, path::Path, sync::OnceLock, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    domain::{default_labels, scheduler::DISPLAY_FRAME, PresetLabel},
    infra::host::ScannerBackend,
};

/// Path of an optional JSON config document.
pub const CONFIG_PATH_ENV: &str = "SOURCING_CONFIG";
pub const FRAME_INTERVAL_ENV: &str = "SOURCING_FRAME_INTERVAL_MS";
pub const SCANNER_BACKEND_ENV: &str = "SOURCING_SCANNER";

static CONFIG: OnceLock<SourcingConfig> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourcingConfig {
    pub marketplace_fee_percent: f64,
    pub marketplace_fee_fixed: f64,
    pub ad_fee_percent: f64,
    pub shipping_presets: Vec<PresetLabel>,
    pub scanner_backend: ScannerBackend,
    pub frame_interval_ms: u64,
}

impl Default for SourcingConfig {
    fn default() -> Self {
        Self {
            marketplace_fee_percent: 12.9,
            marketplace_fee_fixed: 0.30,
            ad_fee_percent: 2.0,
            shipping_presets: default_labels(),
            scanner_backend: ScannerBackend::default(),
            frame_interval_ms: DISPLAY_FRAME.as_millis() as u64,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{name} has an invalid value {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

impl SourcingConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Applies single-value overrides looked up by variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(FRAME_INTERVAL_ENV) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidEnv {
                    name: FRAME_INTERVAL_ENV,
                    value: raw.clone(),
                })?;
            self.frame_interval_ms = millis;
        }
        if let Some(raw) = lookup(SCANNER_BACKEND_ENV) {
            self.scanner_backend =
                ScannerBackend::from_key(&raw).ok_or(ConfigError::InvalidEnv {
                    name: SCANNER_BACKEND_ENV,
                    value: raw.clone(),
                })?;
        }
        Ok(())
    }

    /// Reads the environment. Anything malformed is logged and skipped.
    pub fn load() -> Self {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_path(Path::new(&path)).unwrap_or_else(|err| {
                warn!(error = %err, "falling back to default sourcing config");
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        if let Err(err) = config.apply_overrides(|name| env::var(name).ok()) {
            warn!(error = %err, "ignoring config override");
        }

        info!(
            fee_percent = config.marketplace_fee_percent,
            fee_fixed = config.marketplace_fee_fixed,
            ad_percent = config.ad_fee_percent,
            frame_interval_ms = config.frame_interval_ms,
            scanner = config.scanner_backend.key(),
            "sourcing config loaded"
        );
        config
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

/// Process-wide config, loaded on first use.
pub fn config() -> &'static SourcingConfig {
    CONFIG.get_or_init(SourcingConfig::load)
}
