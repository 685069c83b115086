//! Output formatting for multiple formats
//!
//! JSON and YAML render the serde form of each value unchanged, so they are
//! stable for scripts. The human format is a compact summary.

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::config::StackprobeConfig;
use crate::stack::{Category, Detection, DetectorSpec, StackResult, TechId};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\
\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\
\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\
\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, result: &StackResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .context("Failed to serialize stack result to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(result).context("Failed to serialize stack result to YAML")
            }
            OutputFormat::Human => Ok(format_human(result)),
        }
    }

    pub fn format_detectors(&self, specs: &[&DetectorSpec]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(specs)
                .context("Failed to serialize detectors to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(specs).context("Failed to serialize detectors to YAML")
            }
            OutputFormat::Human => Ok(format_detectors_human(specs)),
        }
    }

    pub fn format_config(&self, config: &StackprobeConfig) -> Result<String> {
        let map = config.to_display_map();
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&map).context("Failed to serialize config to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&map).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => Ok(config.to_string()),
        }
    }
}

fn join(ids: &[TechId]) -> String {
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.iter().map(TechId::name).collect::<Vec<_>>().join(", ")
    }
}

fn confidence_bar(confidence: f64) -> String {
    let filled = (confidence.clamp(0.0, 1.0) * 10.0).round() as usize;
    "\u{2588}".repeat(filled) + &"\u{2591}".repeat(10 - filled)
}

fn push_detections(out: &mut String, title: &str, detections: &[Detection]) {
    if detections.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", title);
    for (i, detection) in detections.iter().enumerate() {
        let connector = if i + 1 == detections.len() {
            "\u{2514}\u{2500}"
        } else {
            "\u{251C}\u{2500}"
        };
        let _ = writeln!(
            out,
            "{} {:<16} {} {:>3}%",
            connector,
            detection.name.name(),
            confidence_bar(detection.confidence),
            (detection.confidence * 100.0).round() as u32
        );
    }
    out.push('\n');
}

fn format_human(result: &StackResult) -> String {
    let mut out = String::new();

    out.push_str("Stack Detection Result\n");
    out.push_str(RULE);
    out.push_str("\n\n");

    let _ = writeln!(out, "Type:            {}", result.project_type);
    if !result.primary.is_empty() {
        let _ = writeln!(out, "Primary:         {}", result.primary);
    }
    let _ = writeln!(out, "Architecture:    {:?}", result.architecture.architecture_type);
    let _ = writeln!(out, "Languages:       {}", join(&result.languages));
    let _ = writeln!(out, "Frameworks:      {}", join(&result.frameworks));
    let _ = writeln!(out, "Databases:       {}", join(&result.databases));
    let _ = writeln!(out, "Test Frameworks: {}", join(&result.test_frameworks));
    let _ = writeln!(out, "Build Tools:     {}", join(&result.build_tools));
    let _ = writeln!(out, "Deployment:      {}", join(&result.deployment));
    if !result.package_managers.is_empty() {
        let managers: Vec<&str> = result.package_managers.iter().map(|m| m.name()).collect();
        let _ = writeln!(out, "Package Managers: {}", managers.join(", "));
    }
    out.push('\n');

    for category in Category::ALL {
        push_detections(&mut out, category.as_str(), result.detections.get(category));
    }

    if result.patterns.is_empty() {
        out.push_str("No technologies detected.\n");
    }
    out
}

fn format_detectors_human(specs: &[&DetectorSpec]) -> String {
    let mut out = String::new();
    let mut current: Option<Category> = None;

    for spec in specs {
        if current != Some(spec.category) {
            if current.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{}", spec.category);
            out.push_str(RULE);
            out.push('\n');
            current = Some(spec.category);
        }

        let req = &spec.requirements;
        let _ = writeln!(out, "{} ({})", spec.id.name(), spec.id);
        for (label, values) in [
            ("files", req.file_patterns),
            ("deps", req.dependencies),
            ("related", req.related_packages),
            ("config", req.config_files),
            ("dirs", req.directories),
            ("docker", req.docker_services),
            ("env", req.env_vars),
        ] {
            if !values.is_empty() {
                let _ = writeln!(out, "  {:<8} {}", label, values.join(", "));
            }
        }
        if let Some(scan) = &req.content {
            let _ = writeln!(out, "  {:<8} {}", "content", scan.patterns.join("  "));
        }
        if !spec.exclusions.is_empty() {
            let _ = writeln!(out, "  {:<8} {}", "excludes", join(spec.exclusions));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::Evidence;
    use crate::stack::{CategoryDetections, DetectorRegistry, PackageManagerId};

    fn create_test_result() -> StackResult {
        let mut detections = CategoryDetections::default();
        detections.set(
            Category::Language,
            vec![Detection::new(TechId::Python, 1.0, Evidence::default())],
        );
        detections.set(
            Category::BackendFramework,
            vec![Detection::new(TechId::FastApi, 0.85, Evidence::default())],
        );

        StackResult {
            languages: vec![TechId::Python],
            frameworks: vec![TechId::FastApi],
            patterns: vec![TechId::Python, TechId::FastApi],
            package_managers: vec![PackageManagerId::Poetry],
            primary: "fastapi".to_string(),
            is_backend_only: true,
            detections,
            ..StackResult::empty()
        }
    }

    #[test]
    fn test_json_format() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format(&create_test_result())
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["languages"], serde_json::json!(["python"]));
        assert_eq!(parsed["frameworks"], serde_json::json!(["fastapi"]));
        assert_eq!(parsed["packageManagers"], serde_json::json!(["poetry"]));
        assert_eq!(parsed["isBackendOnly"], true);
        assert_eq!(parsed["detections"]["backendFrameworks"][0]["confidence"], 0.85);
    }

    #[test]
    fn test_yaml_format() {
        let output = OutputFormatter::new(OutputFormat::Yaml)
            .format(&create_test_result())
            .unwrap();

        let parsed: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed["primary"], serde_yaml::Value::from("fastapi"));
        assert!(output.contains("testFrameworks"));
    }

    #[test]
    fn test_human_format() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format(&create_test_result())
            .unwrap();

        assert!(output.contains("Stack Detection Result"));
        assert!(output.contains("Languages:       Python"));
        assert!(output.contains("Frameworks:      FastAPI"));
        assert!(output.contains("Databases:       (none)"));
        assert!(output.contains("Package Managers: Poetry"));
        assert!(output.contains("85%"));
    }

    #[test]
    fn test_human_format_empty() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format(&StackResult::empty())
            .unwrap();
        assert!(output.contains("No technologies detected."));
    }

    #[test]
    fn test_detectors_human_groups_by_category() {
        let registry = DetectorRegistry::with_defaults();
        let specs = registry.specs(Category::FrontendFramework);
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_detectors(&specs)
            .unwrap();

        assert!(output.starts_with("frontend-framework\n"));
        assert!(output.contains("Next.js (nextjs)"));
        assert!(output.contains("excludes"));
    }

    #[test]
    fn test_detectors_json_is_an_array() {
        let registry = DetectorRegistry::with_defaults();
        let specs = registry.specs(Category::Database);
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_detectors(&specs)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), specs.len());
        assert_eq!(array[0]["category"], "database");
    }
}
