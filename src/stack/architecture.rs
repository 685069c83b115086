//! Repository architecture detection

use crate::evidence::patterns::{is_dockerfile, is_manifest_file};
use crate::evidence::EvidenceCollector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Workspace configuration files that mark a monorepo root
const WORKSPACE_FILES: &[&str] = &[
    "pnpm-workspace.yaml",
    "lerna.json",
    "nx.json",
    "turbo.json",
    "rush.json",
    "go.work",
];

/// Nested manifests tolerated before a repository counts as a monorepo
const NESTED_MANIFEST_LIMIT: usize = 2;

const MIN_SERVICES: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchitectureType {
    #[default]
    Standard,
    Monorepo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchitecturePattern {
    Monorepo,
    Microservices,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Architecture {
    #[serde(rename = "type")]
    pub architecture_type: ArchitectureType,
    pub patterns: Vec<ArchitecturePattern>,
}

fn cargo_declares_workspace(collector: &EvidenceCollector) -> bool {
    let Some(content) = collector.read_file("Cargo.toml") else {
        return false;
    };
    match toml::from_str::<toml::Value>(&content) {
        Ok(parsed) => parsed.get("workspace").is_some(),
        Err(_) => content.contains("[workspace]"),
    }
}

fn nested_manifests(collector: &EvidenceCollector) -> usize {
    collector
        .snapshot()
        .iter()
        .filter_map(|path| path.rsplit_once('/'))
        .filter(|(_, name)| is_manifest_file(name))
        .count()
}

fn dockerfile_dirs(collector: &EvidenceCollector) -> usize {
    collector
        .snapshot()
        .iter()
        .filter_map(|path| {
            let (dir, name) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
            is_dockerfile(name).then_some(dir)
        })
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn is_monorepo(collector: &EvidenceCollector) -> bool {
    if let Some(file) = WORKSPACE_FILES.iter().find(|f| collector.file_exists(f)) {
        debug!(file, "Workspace configuration found");
        return true;
    }

    collector.read_package_manifest().declares_workspaces
        || cargo_declares_workspace(collector)
        || nested_manifests(collector) > NESTED_MANIFEST_LIMIT
}

pub fn is_microservices(collector: &EvidenceCollector) -> bool {
    dockerfile_dirs(collector) >= MIN_SERVICES || collector.compose_build_services() >= MIN_SERVICES
}

pub fn detect_architecture(collector: &EvidenceCollector) -> Architecture {
    let mut patterns = Vec::new();
    if is_monorepo(collector) {
        patterns.push(ArchitecturePattern::Monorepo);
    }
    if is_microservices(collector) {
        patterns.push(ArchitecturePattern::Microservices);
    }

    let architecture_type = if patterns.contains(&ArchitecturePattern::Monorepo) {
        ArchitectureType::Monorepo
    } else {
        ArchitectureType::Standard
    };

    debug!(architecture = ?architecture_type, patterns = ?patterns, "Architecture detected");
    Architecture {
        architecture_type,
        patterns,
    }
}
