/*!
 * Application configuration.
 *
 * This module handles the application configuration including loading,
 * validating and resolving configuration settings.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::ConfigError;
use crate::pipeline::default_workers;
use crate::symmetrization::SymmetrizationStrategy;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Postprocessing config
    #[serde(default)]
    pub postprocess: PostprocessConfig,

    /// Symmetrization strategy name, when directional alignments are merged
    #[serde(default)]
    pub symmetrization: Option<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Postprocessing pipeline settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostprocessConfig {
    /// Whether the detokenization stage is part of the pipeline
    #[serde(default = "default_detokenize")]
    pub detokenize: bool,

    /// Worker thread count; absent means the hardware parallelism
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

fn default_detokenize() -> bool {
    true
}

impl Default for PostprocessConfig {
    fn default() -> Self {
        PostprocessConfig {
            detokenize: true,
            worker_threads: None,
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Normal operation
    #[default]
    Info,
    /// Debugging detail
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// The corresponding `log` crate filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "it".to_string(),
            postprocess: PostprocessConfig::default(),
            symmetrization: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every resolvable setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(workers) = self.postprocess.worker_threads {
            if workers == 0 {
                return Err(ConfigError::InvalidWorkerCount(workers));
            }
        }
        self.symmetrization_strategy()?;
        Ok(())
    }

    /// Resolved worker thread count
    pub fn worker_threads(&self) -> usize {
        self.postprocess.worker_threads.unwrap_or_else(default_workers)
    }

    /// Resolved symmetrization strategy, if one is configured
    pub fn symmetrization_strategy(
        &self,
    ) -> Result<Option<SymmetrizationStrategy>, ConfigError> {
        self.symmetrization
            .as_deref()
            .map(str::parse)
            .transpose()
    }
}
