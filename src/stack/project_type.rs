//! Project type classification
//!
//! Structural and manifest evidence is folded into four integer indicators.
//! The derived type, primary framework and the two gates are computed from
//! those totals only.

use crate::evidence::{DependencySet, EvidenceCollector, Gates};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

const BACKEND_DIRS: &[&str] = &["api", "controllers", "routes", "models"];
const FRONTEND_DIRS: &[&str] = &["components", "pages", "views"];

const BACKEND_NODE_PACKAGES: &[&str] = &[
    "express",
    "fastify",
    "koa",
    "@nestjs/core",
    "@hapi/hapi",
    "hapi",
];
const FRONTEND_NODE_PACKAGES: &[&str] = &["react", "vue", "@angular/core", "svelte", "next", "nuxt"];
const BACKEND_PYTHON_PACKAGES: &[&str] = &["django", "flask", "fastapi"];

const DIRECTORY_WEIGHT: u32 = 3;
const NODE_PACKAGE_WEIGHT: u32 = 2;
const PYTHON_PACKAGE_WEIGHT: u32 = 3;
const CLI_ENTRY_WEIGHT: u32 = 5;
const LIBRARY_ENTRY_WEIGHT: u32 = 3;
const CLI_THRESHOLD: u32 = 3;

/// Package name to reported primary framework, in priority order
const BACKEND_PRIMARY: &[(&str, &str)] = &[
    ("@nestjs/core", "nestjs"),
    ("express", "express"),
    ("fastify", "fastify"),
    ("koa", "koa"),
    ("@hapi/hapi", "hapi"),
    ("hapi", "hapi"),
    ("django", "django"),
    ("fastapi", "fastapi"),
    ("flask", "flask"),
];
const FRONTEND_PRIMARY: &[(&str, &str)] = &[
    ("next", "nextjs"),
    ("nuxt", "nuxt"),
    ("react", "react"),
    ("vue", "vue"),
    ("@angular/core", "angular"),
    ("svelte", "svelte"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    #[default]
    Unknown,
    CliTool,
    FullStackApplication,
    BackendApi,
    FrontendApplication,
    Library,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Unknown => "unknown",
            ProjectType::CliTool => "cli-tool",
            ProjectType::FullStackApplication => "full-stack-application",
            ProjectType::BackendApi => "backend-api",
            ProjectType::FrontendApplication => "frontend-application",
            ProjectType::Library => "library",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw indicator totals read off the project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indicators {
    pub backend_only: u32,
    pub frontend_only: u32,
    pub library: u32,
    pub cli: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTypeScore {
    pub backend_only: u32,
    pub frontend_only: u32,
    pub library: u32,
    pub cli: u32,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub primary: String,
}

impl ProjectTypeScore {
    /// Applies the derivation rules in order; the first match wins.
    pub fn derive(indicators: Indicators, dependencies: &DependencySet) -> Self {
        let Indicators {
            backend_only,
            frontend_only,
            library,
            cli,
        } = indicators;

        let (project_type, primary) = if cli > CLI_THRESHOLD {
            (ProjectType::CliTool, None)
        } else if backend_only > 0 && frontend_only > 0 {
            (ProjectType::FullStackApplication, None)
        } else if backend_only > frontend_only {
            (ProjectType::BackendApi, primary_from(BACKEND_PRIMARY, dependencies))
        } else if frontend_only > backend_only {
            (
                ProjectType::FrontendApplication,
                primary_from(FRONTEND_PRIMARY, dependencies),
            )
        } else if library > 0 {
            (ProjectType::Library, None)
        } else {
            (ProjectType::Unknown, None)
        };

        Self {
            backend_only,
            frontend_only,
            library,
            cli,
            project_type,
            primary: primary.unwrap_or_default().to_string(),
        }
    }

    pub fn is_backend_only(&self) -> bool {
        self.backend_only > 0 && self.frontend_only == 0
    }

    pub fn is_frontend_only(&self) -> bool {
        self.frontend_only > 0 && self.backend_only == 0
    }

    pub fn gates(&self) -> Gates {
        Gates {
            is_backend_only: self.is_backend_only(),
            is_frontend_only: self.is_frontend_only(),
        }
    }
}

fn primary_from(
    priority: &'static [(&'static str, &'static str)],
    dependencies: &DependencySet,
) -> Option<&'static str> {
    priority
        .iter()
        .find(|(package, _)| dependencies.contains(*package))
        .map(|(_, name)| *name)
}

fn count_present(names: &[&str], dependencies: &DependencySet) -> u32 {
    names.iter().filter(|n| dependencies.contains(**n)).count() as u32
}

pub struct ProjectTypeClassifier;

impl ProjectTypeClassifier {
    fn has_dir(collector: &EvidenceCollector, name: &str) -> bool {
        collector.dir_exists(name) || collector.dir_exists(&format!("src/{}", name))
    }

    pub fn indicators(collector: &EvidenceCollector) -> (Indicators, DependencySet) {
        let manifest = collector.read_package_manifest();
        let python = collector.read_python_dependencies();

        let backend_dirs = BACKEND_DIRS
            .iter()
            .filter(|d| Self::has_dir(collector, d))
            .count() as u32;
        let frontend_dirs = FRONTEND_DIRS
            .iter()
            .filter(|d| Self::has_dir(collector, d))
            .count() as u32;

        let mut indicators = Indicators {
            backend_only: backend_dirs * DIRECTORY_WEIGHT
                + count_present(BACKEND_NODE_PACKAGES, &manifest.dependencies) * NODE_PACKAGE_WEIGHT
                + count_present(BACKEND_PYTHON_PACKAGES, &python) * PYTHON_PACKAGE_WEIGHT,
            frontend_only: frontend_dirs * DIRECTORY_WEIGHT
                + count_present(FRONTEND_NODE_PACKAGES, &manifest.dependencies)
                    * NODE_PACKAGE_WEIGHT,
            ..Indicators::default()
        };

        if manifest.has_bin {
            indicators.cli += CLI_ENTRY_WEIGHT;
        }
        if collector.python_declares_scripts() {
            indicators.cli += CLI_ENTRY_WEIGHT;
        }
        if manifest.has_library_entry && backend_dirs == 0 && frontend_dirs == 0 {
            indicators.library += LIBRARY_ENTRY_WEIGHT;
        }

        let mut dependencies = manifest.dependencies;
        dependencies.extend(python);
        (indicators, dependencies)
    }

    pub fn classify(collector: &EvidenceCollector) -> ProjectTypeScore {
        let (indicators, dependencies) = Self::indicators(collector);
        let score = ProjectTypeScore::derive(indicators, &dependencies);

        debug!(
            backend_only = score.backend_only,
            frontend_only = score.frontend_only,
            library = score.library,
            cli = score.cli,
            project_type = %score.project_type,
            primary = %score.primary,
            "Project type classified"
        );
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectorConfig;
    use crate::fs::MockFileSystem;
    use std::sync::Arc;
    use yare::parameterized;

    fn classify(fs: MockFileSystem) -> ProjectTypeScore {
        let root = fs.root().to_path_buf();
        let collector = EvidenceCollector::new(Arc::new(fs), root, DetectorConfig::default());
        ProjectTypeClassifier::classify(&collector)
    }

    fn deps(names: &[&str]) -> DependencySet {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[parameterized(
        cli_wins = { 5, 5, 3, 5, ProjectType::CliTool },
        cli_at_threshold_is_not_cli = { 0, 0, 0, 3, ProjectType::Unknown },
        full_stack = { 2, 3, 0, 0, ProjectType::FullStackApplication },
        backend = { 2, 0, 3, 0, ProjectType::BackendApi },
        frontend = { 0, 3, 3, 0, ProjectType::FrontendApplication },
        library = { 0, 0, 3, 0, ProjectType::Library },
        unknown = { 0, 0, 0, 0, ProjectType::Unknown },
    )]
    fn test_derivation_order(backend: u32, frontend: u32, library: u32, cli: u32, expected: ProjectType) {
        let indicators = Indicators {
            backend_only: backend,
            frontend_only: frontend,
            library,
            cli,
        };
        let score = ProjectTypeScore::derive(indicators, &DependencySet::new());
        assert_eq!(score.project_type, expected);
        assert!(!(score.is_backend_only() && score.is_frontend_only()));
    }

    #[test]
    fn test_primary_follows_priority() {
        let indicators = Indicators {
            backend_only: 4,
            ..Indicators::default()
        };
        let score = ProjectTypeScore::derive(indicators, &deps(&["express", "@nestjs/core"]));
        assert_eq!(score.primary, "nestjs");

        let indicators = Indicators {
            frontend_only: 4,
            ..Indicators::default()
        };
        let score = ProjectTypeScore::derive(indicators, &deps(&["react", "next"]));
        assert_eq!(score.primary, "nextjs");
    }

    #[test]
    fn test_backend_manifest() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"dependencies": {"express": "^4.18.2"}}"#);

        let score = classify(fs);
        assert_eq!(score.backend_only, 2);
        assert_eq!(score.project_type, ProjectType::BackendApi);
        assert_eq!(score.primary, "express");
        assert!(score.is_backend_only());
        assert!(!score.is_frontend_only());
    }

    #[test]
    fn test_full_stack_from_dirs_and_manifest() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "package.json",
            r#"{"dependencies": {"react": "^18", "express": "^4"}}"#,
        );
        fs.add_dir("src/components");
        fs.add_dir("controllers");

        let score = classify(fs);
        assert_eq!(score.backend_only, 5);
        assert_eq!(score.frontend_only, 5);
        assert_eq!(score.project_type, ProjectType::FullStackApplication);
        assert_eq!(score.primary, "");
        assert_eq!(score.gates(), Gates::default());
    }

    #[test]
    fn test_cli_from_bin_field() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"name": "tool", "bin": "./cli.js"}"#);

        let score = classify(fs);
        assert_eq!(score.cli, 5);
        assert_eq!(score.project_type, ProjectType::CliTool);
    }

    #[test]
    fn test_cli_from_python_scripts() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pyproject.toml",
            "[project]\nname = \"tool\"\n\n[project.scripts]\ntool = \"tool.main:run\"\n",
        );

        assert_eq!(classify(fs).project_type, ProjectType::CliTool);
    }

    #[test]
    fn test_python_backend_weight() {
        let fs = MockFileSystem::new();
        fs.add_file("requirements.txt", "fastapi==0.104.1\nuvicorn\n");

        let score = classify(fs);
        assert_eq!(score.backend_only, 3);
        assert_eq!(score.primary, "fastapi");
    }

    #[test]
    fn test_library_entry_without_dirs() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"name": "lib", "main": "dist/index.js"}"#);

        let score = classify(fs);
        assert_eq!(score.library, 3);
        assert_eq!(score.project_type, ProjectType::Library);
    }

    #[test]
    fn test_library_entry_ignored_with_structure() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"name": "app", "main": "index.js"}"#);
        fs.add_dir("pages");

        let score = classify(fs);
        assert_eq!(score.library, 0);
        assert_eq!(score.project_type, ProjectType::FrontendApplication);
        assert!(score.is_frontend_only());
    }

    #[test]
    fn test_serialization() {
        let score = ProjectTypeScore::derive(
            Indicators {
                backend_only: 2,
                ..Indicators::default()
            },
            &deps(&["koa"]),
        );
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["type"], "backend-api");
        assert_eq!(json["backendOnly"], 2);
        assert_eq!(json["primary"], "koa");
    }
}
