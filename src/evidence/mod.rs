//! Evidence gathering
//!
//! The collector turns a project root into per-detector [`Evidence`] bags.
//! It knows nothing about technologies beyond the literal files, names and
//! patterns a detector spec asks for.

mod collector;
mod compose;
pub mod parsers;
pub mod patterns;

pub use collector::{EvidenceCollector, PackageManifest};
pub use compose::{ComposeScanner, SubstringComposeScanner};
pub use parsers::{DependencyParser, DependencySet, ParseError};

use serde::Serialize;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Project-type gates inherited by every evidence bag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gates {
    pub is_backend_only: bool,
    pub is_frontend_only: bool,
}

/// Signals observed for one detector. Built once, never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub config_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_packages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub docker_services: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env_vars: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content_matches: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_backend_only: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_frontend_only: bool,
}

impl Evidence {
    pub fn with_gates(gates: Gates) -> Self {
        Self {
            is_backend_only: gates.is_backend_only,
            is_frontend_only: gates.is_frontend_only,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
            && self.config_files.is_empty()
            && self.dependencies.is_empty()
            && self.related_packages.is_empty()
            && self.docker_services.is_empty()
            && self.env_vars.is_empty()
            && self.content_matches.is_empty()
            && self.directories.is_empty()
    }

    pub fn has_dependency(&self) -> bool {
        !self.dependencies.is_empty()
    }

    pub fn has_config(&self) -> bool {
        !self.config_files.is_empty()
    }

    pub fn has_related(&self) -> bool {
        !self.related_packages.is_empty()
    }

    pub fn has_content(&self) -> bool {
        !self.content_matches.is_empty()
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn has_directory(&self) -> bool {
        !self.directories.is_empty()
    }

    pub fn has_docker_service(&self) -> bool {
        !self.docker_services.is_empty()
    }

    pub fn has_env_var(&self) -> bool {
        !self.env_vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_evidence_is_empty() {
        let evidence = Evidence::default();
        assert!(evidence.is_empty());
        assert!(!evidence.has_dependency());
        assert!(!evidence.is_backend_only);
    }

    #[test]
    fn test_gates_do_not_count_as_signals() {
        let evidence = Evidence::with_gates(Gates {
            is_backend_only: true,
            is_frontend_only: false,
        });
        assert!(evidence.is_empty());
        assert!(evidence.is_backend_only);
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let evidence = Evidence {
            dependencies: vec!["express".to_string()],
            ..Default::default()
        };

        let json = serde_json::to_value(&evidence).unwrap();
        assert_eq!(json, serde_json::json!({"dependencies": ["express"]}));
    }
}
