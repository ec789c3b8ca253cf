//! Settings for the transaction submission core.
//!
//! Settings are loaded in the following order, with later sources taking
//! precedence:
//!
//! 1. Built-in defaults.
//! 2. The JSON files listed, comma separated, in the `CONFIG_FILES`
//!    environment variable.
//! 3. Environment variables prefixed with `TXSUB_`. Nested fields are
//!    separated by a double underscore, e.g. `TXSUB_TRACING__LEVEL=debug`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use eyre::{eyre, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::{SequenceGate, DEFAULT_MAX_SIZE};

pub use trace::{Level, Style, TracingConfig};

mod trace;

const ENV_PREFIX: &str = "TXSUB";
const DEFAULT_TICK_INTERVAL_MS: u64 = 5_000;

/// Settings for the sequence gate and the updater feeding it
#[derive(Debug, Clone, Deserialize)]
pub struct TxSubSettings {
    /// Capacity of the sequence gate
    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: usize,
    /// How often current account sequences are fetched, in milliseconds.
    /// Defaults to one average ledger close.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub tracing: TracingConfig,
}

fn default_max_queue_size() -> usize {
    DEFAULT_MAX_SIZE
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

impl Default for TxSubSettings {
    fn default() -> Self {
        Self {
            max_queue_size: default_max_queue_size(),
            tick_interval_ms: default_tick_interval_ms(),
            tracing: TracingConfig::default(),
        }
    }
}

impl TxSubSettings {
    /// Load settings from `CONFIG_FILES` and the `TXSUB_` environment.
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        let config_file_paths: Vec<String> = env::var("CONFIG_FILES")
            .map(|s| s.split(',').map(|s| s.trim().to_owned()).collect())
            .unwrap_or_default();

        for path in config_file_paths.iter().filter(|p| !p.is_empty()) {
            let p = PathBuf::from(path);
            if !p.is_file() {
                return Err(eyre!(
                    "Provided config path via CONFIG_FILES is not a file ({p:?})"
                ));
            }
            builder = builder.add_source(File::from(p).format(FileFormat::Json));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load config sources")?;

        let settings = Self::from_config(config)?;
        debug!(?settings, "Loaded txsub settings");
        Ok(settings)
    }

    /// Deserialize and validate settings from an already assembled config.
    pub fn from_config(config: Config) -> Result<Self> {
        let settings: Self = config
            .try_deserialize()
            .context("Failed to deserialize txsub settings")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.max_queue_size == 0 {
            return Err(eyre!("max_queue_size must be greater than zero"));
        }
        if self.tick_interval_ms == 0 {
            return Err(eyre!("tick_interval_ms must be greater than zero"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// A fresh gate sized according to these settings.
    pub fn build_gate(&self) -> SequenceGate {
        SequenceGate::new(Some(self.max_queue_size))
    }
}

#[cfg(test)]
mod tests;
