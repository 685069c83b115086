//! Detector specifications and detections
//!
//! A [`DetectorSpec`] is pure data: which category it belongs to, which
//! evidence it needs, and which technologies it cannot coexist with. The
//! scoring logic lives in [`crate::stack::scoring`], keyed by [`TechId`], so
//! the requirement tables can be inspected (and printed) without running any
//! detector.

use super::{Category, TechId};
use crate::evidence::Evidence;
use serde::Serialize;

fn is_empty<T>(items: &&[T]) -> bool {
    items.is_empty()
}

/// A narrow content scan: sample files matching any of the `files` globs and
/// test them against the `patterns` regexes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ContentScan {
    pub files: &'static [&'static str],
    pub patterns: &'static [&'static str],
}

/// Evidence a detector asks the collector for. Empty fields are never probed.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Requirements {
    #[serde(skip_serializing_if = "is_empty")]
    pub file_patterns: &'static [&'static str],
    #[serde(skip_serializing_if = "is_empty")]
    pub dependencies: &'static [&'static str],
    #[serde(skip_serializing_if = "is_empty")]
    pub related_packages: &'static [&'static str],
    #[serde(skip_serializing_if = "is_empty")]
    pub config_files: &'static [&'static str],
    #[serde(skip_serializing_if = "is_empty")]
    pub directories: &'static [&'static str],
    #[serde(skip_serializing_if = "is_empty")]
    pub docker_services: &'static [&'static str],
    #[serde(skip_serializing_if = "is_empty")]
    pub env_vars: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentScan>,
}

impl Requirements {
    pub const EMPTY: Requirements = Requirements {
        file_patterns: &[],
        dependencies: &[],
        related_packages: &[],
        config_files: &[],
        directories: &[],
        docker_services: &[],
        env_vars: &[],
        content: None,
    };
}

/// Immutable definition of one detector
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DetectorSpec {
    pub category: Category,
    pub id: TechId,
    pub requirements: Requirements,
    #[serde(skip_serializing_if = "is_empty")]
    pub exclusions: &'static [TechId],
}

impl DetectorSpec {
    pub const fn new(category: Category, id: TechId, requirements: Requirements) -> Self {
        Self {
            category,
            id,
            requirements,
            exclusions: &[],
        }
    }

    pub const fn excluding(self, exclusions: &'static [TechId]) -> Self {
        Self { exclusions, ..self }
    }

    pub fn excludes(&self, other: TechId) -> bool {
        self.exclusions.contains(&other)
    }
}

/// An accepted (or candidate) detection for one technology
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub name: TechId,
    pub confidence: f64,
    pub evidence: Evidence,
}

impl Detection {
    pub fn new(name: TechId, confidence: f64, evidence: Evidence) -> Self {
        Self {
            name,
            confidence,
            evidence,
        }
    }

    pub fn validate(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: DetectorSpec = DetectorSpec::new(
        Category::FrontendFramework,
        TechId::React,
        Requirements {
            dependencies: &["react"],
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Vue, TechId::Angular]);

    #[test]
    fn test_spec_exclusions() {
        assert!(SPEC.excludes(TechId::Vue));
        assert!(SPEC.excludes(TechId::Angular));
        assert!(!SPEC.excludes(TechId::NextJs));
    }

    #[test]
    fn test_spec_serializes_only_declared_requirements() {
        let json = serde_json::to_value(SPEC).unwrap();

        assert_eq!(json["id"], "react");
        assert_eq!(json["category"], "frontend-framework");
        assert_eq!(json["requirements"]["dependencies"][0], "react");
        assert!(json["requirements"].get("file_patterns").is_none());
        assert_eq!(json["exclusions"][1], "angular");
    }

    #[test]
    fn test_detection_validation() {
        let valid = Detection::new(TechId::Redis, 0.75, Evidence::default());
        assert!(valid.validate());

        let invalid = Detection::new(TechId::Redis, 1.5, Evidence::default());
        assert!(!invalid.validate());
    }
}
