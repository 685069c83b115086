//! Command handlers. Each returns the process exit code.

use super::commands::{ConfigArgs, DetectArgs, DetectorsArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::StackprobeConfig;
use crate::detection::StackDetector;
use crate::stack::{Category, DetectorRegistry, DetectorSpec};
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, error, info};

fn write_output(content: &str, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!(path = %path.display(), "Output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n").context("Failed to write to stdout")?;
            }
        }
    }
    Ok(())
}

/// Applies CLI overrides on top of the environment-derived configuration
pub fn apply_overrides(mut config: StackprobeConfig, args: &DetectArgs) -> StackprobeConfig {
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(file_limit) = args.file_limit {
        config.file_limit = file_limit;
    }
    if let Some(sample_size) = args.sample_size {
        config.sample_size = sample_size;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(strategy) = args.strategy {
        config.conflict_strategy = strategy;
    }
    config
}

pub async fn handle_detect(args: &DetectArgs) -> i32 {
    let project_path = match &args.project_path {
        Some(path) => path.clone(),
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Failed to get current directory: {}", e);
                return 1;
            }
        },
    };
    debug!(path = %project_path.display(), "Project path");

    let config = match StackprobeConfig::from_env() {
        Ok(config) => apply_overrides(config, args),
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("\nPlease check your STACKPROBE_* environment variables.");
            return 1;
        }
    };
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your STACKPROBE_* environment variables and command-line arguments.");
        return 1;
    }

    let detector = StackDetector::new(config.detector_config());
    let result = match detector.try_detect(&project_path).await {
        Ok(result) => result,
        Err(e) => {
            error!("Detection failed: {}", e);
            eprintln!("\n{}", e.help_message());
            return 1;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    let rendered = match formatter.format(&result) {
        Ok(rendered) => rendered,
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            return 1;
        }
    };

    match write_output(&rendered, args.output.as_deref()) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

pub fn handle_detectors(args: &DetectorsArgs) -> i32 {
    let registry = DetectorRegistry::with_defaults();
    let specs: Vec<&DetectorSpec> = match args.category {
        Some(category) => registry.specs(Category::from(category)),
        None => registry.all().iter().collect(),
    };
    debug!(count = specs.len(), "Listing detectors");

    let formatter = OutputFormatter::new(args.format.into());
    match formatter
        .format_detectors(&specs)
        .and_then(|rendered| write_output(&rendered, None))
    {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let config = match StackprobeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return 1;
        }
    };

    let validation = config.validate();
    let formatter = OutputFormatter::new(args.format.into());
    if let Err(e) = formatter
        .format_config(&config)
        .and_then(|rendered| write_output(&rendered, None))
    {
        error!("{:#}", e);
        return 1;
    }

    match validation {
        Ok(()) => 0,
        Err(e) => {
            if OutputFormat::from(args.format) == OutputFormat::Human {
                eprintln!("\n\u{26A0} {}", e);
            } else {
                error!("{}", e);
            }
            1
        }
    }
}
