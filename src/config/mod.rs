//! Configuration for stream consumption.
//!
//! Loading priority, lowest to highest:
//! 1. Default values (hardcoded)
//! 2. Optional config file
//! 3. Environment variables (`CHIRP` prefix)

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Dispatch lane behavior
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Prometheus endpoint settings
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Queue depth at which the dispatch worker starts logging
    /// falling-behind warnings. The queue itself is unbounded; the server
    /// sends stall warnings long before memory becomes a concern.
    #[serde(default = "default_warn_queue_depth")]
    pub warn_queue_depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether the caller intends to expose `/metrics`; purely advisory,
    /// the endpoint only runs when `serve_metrics` is spawned
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

fn default_warn_queue_depth() -> usize {
    512
}

fn default_metrics_port() -> u16 {
    9600
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            warn_queue_depth: default_warn_queue_depth(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

impl StreamConfig {
    /// Load configuration from an optional file with environment variable
    /// overrides (e.g. `CHIRP__DISPATCH__WARN_QUEUE_DEPTH=64`).
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("CHIRP")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let config: StreamConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dispatch.warn_queue_depth == 0 {
            return Err(Error::Config(ConfigError::Message(
                "dispatch.warn_queue_depth must be greater than 0".into(),
            )));
        }

        if self.metrics.enabled && self.metrics.port == 0 {
            return Err(Error::Config(ConfigError::Message(
                "metrics.port must be set when metrics are enabled".into(),
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod config_test;
