//! Configuration management for stackprobe
//!
//! Settings are loaded from environment variables with defaults and can be
//! overridden by CLI flags. [`StackprobeConfig`] is the user-facing layer;
//! [`DetectorConfig`] is the plain value the detector actually consumes.
//!
//! # Environment Variables
//!
//! - `STACKPROBE_LOG_LEVEL`: Logging level - default: "warn"
//! - `STACKPROBE_MAX_DEPTH`: Maximum walk depth below the project root - default: "10"
//! - `STACKPROBE_MAX_FILES`: Maximum files walked per detection - default: "10000"
//! - `STACKPROBE_FILE_LIMIT`: Maximum matches returned per glob query - default: "100"
//! - `STACKPROBE_SAMPLE_SIZE`: Files read per content scan - default: "3"
//! - `STACKPROBE_WORKERS`: Concurrent detectors per category - default: "8"
//! - `STACKPROBE_CONFLICT_STRATEGY`: highest-confidence|declaration-order - default: "highest-confidence"
//!
//! # Example
//!
//! ```no_run
//! use stackprobe::StackprobeConfig;
//!
//! let config = StackprobeConfig::default();
//! config.validate().expect("Invalid configuration");
//! let detector_config = config.detector_config();
//! assert_eq!(detector_config.sample_size, 3);
//! ```

use crate::evidence::patterns::EXCLUDED_DIRS;
use crate::stack::{ConflictStrategy, ACCEPTANCE_THRESHOLD};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_MAX_DEPTH: usize = 10;
const DEFAULT_MAX_FILES: usize = 10_000;
const DEFAULT_FILE_LIMIT: usize = 100;
const DEFAULT_SAMPLE_SIZE: usize = 3;
const DEFAULT_WORKERS: usize = 8;

const MAX_DEPTH_LIMIT: usize = 64;
const FILE_LIMIT_LIMIT: usize = 10_000;
const SAMPLE_SIZE_LIMIT: usize = 50;
const WORKERS_LIMIT: usize = 256;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Bounds and strategy used by a single detection run
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    pub max_depth: usize,
    pub max_files: usize,
    pub file_limit: usize,
    /// Files read per content scan
    pub sample_size: usize,
    /// Concurrent detectors per category
    pub workers: usize,
    pub conflict_strategy: ConflictStrategy,
    pub excluded_dirs: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_files: DEFAULT_MAX_FILES,
            file_limit: DEFAULT_FILE_LIMIT,
            sample_size: DEFAULT_SAMPLE_SIZE,
            workers: DEFAULT_WORKERS,
            conflict_strategy: ConflictStrategy::default(),
            excluded_dirs: EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Main configuration structure for stackprobe
#[derive(Debug, Clone, PartialEq)]
pub struct StackprobeConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
    pub max_depth: usize,
    pub max_files: usize,
    pub file_limit: usize,
    pub sample_size: usize,
    pub workers: usize,
    pub conflict_strategy: ConflictStrategy,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn env_strict<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(value) => value.trim().parse::<T>().map_err(|e| ConfigError::ParseError {
            field: key.to_string(),
            error: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

impl Default for StackprobeConfig {
    /// Loads from `STACKPROBE_*` environment variables, falling back to the
    /// defaults for anything missing or unparsable.
    fn default() -> Self {
        let log_level = env::var("STACKPROBE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            log_level,
            max_depth: env_or("STACKPROBE_MAX_DEPTH", DEFAULT_MAX_DEPTH),
            max_files: env_or("STACKPROBE_MAX_FILES", DEFAULT_MAX_FILES),
            file_limit: env_or("STACKPROBE_FILE_LIMIT", DEFAULT_FILE_LIMIT),
            sample_size: env_or("STACKPROBE_SAMPLE_SIZE", DEFAULT_SAMPLE_SIZE),
            workers: env_or("STACKPROBE_WORKERS", DEFAULT_WORKERS),
            conflict_strategy: env_or("STACKPROBE_CONFLICT_STRATEGY", ConflictStrategy::default()),
        }
    }
}

impl StackprobeConfig {
    /// Like [`Default::default`] but rejects unparsable environment values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_level = env::var("STACKPROBE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Ok(Self {
            log_level,
            max_depth: env_strict("STACKPROBE_MAX_DEPTH", DEFAULT_MAX_DEPTH)?,
            max_files: env_strict("STACKPROBE_MAX_FILES", DEFAULT_MAX_FILES)?,
            file_limit: env_strict("STACKPROBE_FILE_LIMIT", DEFAULT_FILE_LIMIT)?,
            sample_size: env_strict("STACKPROBE_SAMPLE_SIZE", DEFAULT_SAMPLE_SIZE)?,
            workers: env_strict("STACKPROBE_WORKERS", DEFAULT_WORKERS)?,
            conflict_strategy: env_strict(
                "STACKPROBE_CONFLICT_STRATEGY",
                ConflictStrategy::default(),
            )?,
        })
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` naming the first value out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("max depth", self.max_depth, 1, MAX_DEPTH_LIMIT)?;
        check_range("file limit", self.file_limit, 1, FILE_LIMIT_LIMIT)?;
        check_range("sample size", self.sample_size, 1, SAMPLE_SIZE_LIMIT)?;
        check_range("workers", self.workers, 1, WORKERS_LIMIT)?;

        if self.max_files < self.file_limit {
            return Err(ConfigError::ValidationFailed(format!(
                "Max files ({}) must be at least the file limit ({})",
                self.max_files, self.file_limit
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            max_depth: self.max_depth,
            max_files: self.max_files,
            file_limit: self.file_limit,
            sample_size: self.sample_size,
            workers: self.workers,
            conflict_strategy: self.conflict_strategy,
            ..DetectorConfig::default()
        }
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();

        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("max_depth".to_string(), self.max_depth.to_string());
        map.insert("max_files".to_string(), self.max_files.to_string());
        map.insert("file_limit".to_string(), self.file_limit.to_string());
        map.insert("sample_size".to_string(), self.sample_size.to_string());
        map.insert("workers".to_string(), self.workers.to_string());
        map.insert(
            "conflict_strategy".to_string(),
            self.conflict_strategy.to_string(),
        );
        map.insert("threshold".to_string(), ACCEPTANCE_THRESHOLD.to_string());

        map
    }
}

fn check_range(name: &str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::ValidationFailed(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

impl fmt::Display for StackprobeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stackprobe Configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Max Depth: {}", self.max_depth)?;
        writeln!(f, "  Max Files: {}", self.max_files)?;
        writeln!(f, "  File Limit: {}", self.file_limit)?;
        writeln!(f, "  Sample Size: {}", self.sample_size)?;
        writeln!(f, "  Workers: {}", self.workers)?;
        writeln!(f, "  Conflict Strategy: {}", self.conflict_strategy)?;
        writeln!(f, "  Threshold: {}", ACCEPTANCE_THRESHOLD)?;
        Ok(())
    }
}
