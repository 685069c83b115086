//! Evidence collector
//!
//! Every probe here is total: missing files, unreadable files, malformed
//! manifests and invalid glob patterns all collapse to "no evidence". The
//! directory tree is walked once per collector and every glob query is
//! answered from that snapshot.

use super::compose::{ComposeScanner, SubstringComposeScanner};
use super::parsers::{
    ecosystem_parsers, node_parser, pipfile_parser, pyproject_declares_scripts,
    requirements_parser, DependencyParser, DependencySet, LenientPyProjectParser, PyProjectParser,
};
use super::patterns::{COMPOSE_FILES, ENV_FILES};
use super::{Evidence, Gates};
use crate::config::DetectorConfig;
use crate::fs::{FileSystem, WalkOptions};
use crate::stack::{ContentScan, DetectorSpec};
use ignore::overrides::OverrideBuilder;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// Entry-point and workspace fields read from `package.json`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    /// `bin` field present
    pub has_bin: bool,
    /// `main`, `module` or `exports` field present
    pub has_library_entry: bool,
    pub declares_workspaces: bool,
    pub dependencies: DependencySet,
}

pub struct EvidenceCollector {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    config: DetectorConfig,
    compose_scanner: Box<dyn ComposeScanner>,
    snapshot: OnceLock<Vec<String>>,
    dependencies: OnceLock<DependencySet>,
    compose_files: OnceLock<Vec<String>>,
    env_names: OnceLock<BTreeSet<String>>,
}

impl EvidenceCollector {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>, config: DetectorConfig) -> Self {
        Self {
            fs,
            root: root.into(),
            config,
            compose_scanner: Box::new(SubstringComposeScanner),
            snapshot: OnceLock::new(),
            dependencies: OnceLock::new(),
            compose_files: OnceLock::new(),
            env_names: OnceLock::new(),
        }
    }

    pub fn with_compose_scanner(mut self, scanner: Box<dyn ComposeScanner>) -> Self {
        self.compose_scanner = scanner;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Every file below the root, relative and `/`-separated, sorted
    pub fn snapshot(&self) -> &[String] {
        self.snapshot.get_or_init(|| {
            let options = WalkOptions {
                max_depth: self.config.max_depth,
                max_files: self.config.max_files,
                excluded_dirs: self.config.excluded_dirs.clone(),
            };

            match self.fs.walk_files(&self.root, &options) {
                Ok(paths) => {
                    let files: Vec<String> = paths
                        .iter()
                        .map(|p| p.to_string_lossy().replace('\\', "/"))
                        .collect();
                    debug!(root = %self.root.display(), files = files.len(), "Project tree walked");
                    files
                }
                Err(e) => {
                    debug!(root = %self.root.display(), error = %e, "Project walk failed");
                    Vec::new()
                }
            }
        })
    }

    /// Files matching a gitignore-style glob, at most `limit` of them.
    /// An invalid pattern matches nothing.
    pub fn find_files(&self, pattern: &str, limit: usize) -> Vec<String> {
        let mut builder = OverrideBuilder::new(&self.root);
        let matcher = match builder.add(pattern).and_then(|b| b.build()) {
            Ok(matcher) => matcher,
            Err(e) => {
                debug!(pattern, error = %e, "Invalid glob pattern");
                return Vec::new();
            }
        };

        let matches: Vec<String> = self
            .snapshot()
            .iter()
            .filter(|path| matcher.matched(Path::new(path.as_str()), false).is_whitelist())
            .take(limit)
            .cloned()
            .collect();

        trace!(pattern, matches = matches.len(), "Glob query");
        matches
    }

    pub fn file_exists(&self, relative: &str) -> bool {
        self.fs.is_file(&self.root.join(relative))
    }

    pub fn dir_exists(&self, relative: &str) -> bool {
        self.fs.is_dir(&self.root.join(relative))
    }

    pub fn read_file(&self, relative: &str) -> Option<String> {
        let path = self.root.join(relative);
        if !self.fs.is_file(&path) {
            return None;
        }
        match self.fs.read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(file = relative, error = %e, "Failed to read file");
                None
            }
        }
    }

    fn parse_with(&self, parser: &dyn DependencyParser) -> DependencySet {
        let mut deps = DependencySet::new();
        for file in parser.files() {
            let Some(content) = self.read_file(file) else {
                continue;
            };
            match parser.parse(&content) {
                Ok(parsed) => deps.extend(parsed),
                Err(e) => debug!(file, error = %e, "Ignoring unparsable manifest"),
            }
        }
        deps
    }

    /// Runtime and development dependencies from `package.json`
    pub fn read_manifest_dependencies(&self) -> DependencySet {
        self.parse_with(&node_parser())
    }

    /// Package names from `pyproject.toml`, requirements lists and `Pipfile`
    pub fn read_python_dependencies(&self) -> DependencySet {
        let mut deps = DependencySet::new();

        if let Some(content) = self.read_file("pyproject.toml") {
            match PyProjectParser.parse(&content) {
                Ok(parsed) => deps.extend(parsed),
                Err(e) => {
                    debug!(error = %e, "pyproject.toml rejected, using lenient extraction");
                    if let Ok(parsed) = LenientPyProjectParser.parse(&content) {
                        deps.extend(parsed);
                    }
                }
            }
        }

        deps.extend(self.parse_with(&requirements_parser()));
        deps.extend(self.parse_with(&pipfile_parser()));
        deps
    }

    /// Union of every ecosystem's declared dependencies, computed once
    pub fn read_all_dependencies(&self) -> &DependencySet {
        self.dependencies.get_or_init(|| {
            let mut deps = self.read_manifest_dependencies();
            deps.extend(self.read_python_dependencies());
            for parser in ecosystem_parsers() {
                deps.extend(self.parse_with(parser.as_ref()));
            }
            debug!(dependencies = deps.len(), "Dependencies collected");
            deps
        })
    }

    pub fn read_package_manifest(&self) -> PackageManifest {
        let Some(content) = self.read_file("package.json") else {
            return PackageManifest::default();
        };
        let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&content) else {
            debug!("Ignoring unparsable package.json");
            return PackageManifest::default();
        };

        PackageManifest {
            has_bin: parsed.get("bin").is_some(),
            has_library_entry: ["main", "module", "exports"]
                .iter()
                .any(|key| parsed.get(key).is_some()),
            declares_workspaces: parsed.get("workspaces").is_some(),
            dependencies: node_parser().parse(&content).unwrap_or_default(),
        }
    }

    /// `pyproject.toml` declares console scripts
    pub fn python_declares_scripts(&self) -> bool {
        self.read_file("pyproject.toml")
            .is_some_and(|content| pyproject_declares_scripts(&content))
    }

    fn compose_contents(&self) -> &[String] {
        self.compose_files.get_or_init(|| {
            COMPOSE_FILES
                .iter()
                .filter_map(|file| self.read_file(file))
                .collect()
        })
    }

    /// Known service names referenced by any compose file
    pub fn scan_docker_compose(&self, services: &[&str]) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for content in self.compose_contents() {
            for service in self.compose_scanner.find_services(content, services) {
                if !found.contains(&service) {
                    found.push(service);
                }
            }
        }
        found
    }

    /// Compose services built from local sources, summed over compose files
    pub fn compose_build_services(&self) -> usize {
        self.compose_contents()
            .iter()
            .map(|content| self.compose_scanner.count_build_services(content))
            .sum()
    }

    /// Contents of at most the first `n` readable files in `files`
    pub fn sample_file_content(&self, files: &[String], n: usize) -> Vec<String> {
        files
            .iter()
            .take(n)
            .filter_map(|file| self.read_file(file))
            .collect()
    }

    /// Patterns of `scan` found in the sampled files
    pub fn scan_content(&self, scan: &ContentScan) -> Vec<String> {
        let mut files: Vec<String> = Vec::new();
        for pattern in scan.files {
            for file in self.find_files(pattern, self.config.file_limit) {
                if !files.contains(&file) {
                    files.push(file);
                }
            }
        }
        if files.is_empty() {
            return Vec::new();
        }
        let samples = self.sample_file_content(&files, self.config.sample_size);

        scan.patterns
            .iter()
            .filter(|pattern| match Regex::new(pattern) {
                Ok(re) => samples.iter().any(|content| re.is_match(content)),
                Err(e) => {
                    debug!(pattern, error = %e, "Invalid content pattern");
                    false
                }
            })
            .map(|pattern| pattern.to_string())
            .collect()
    }

    /// Variable names declared in dotenv files
    pub fn env_var_names(&self) -> &BTreeSet<String> {
        self.env_names.get_or_init(|| {
            ENV_FILES
                .iter()
                .filter_map(|file| self.read_file(file))
                .flat_map(|content| {
                    content
                        .lines()
                        .filter_map(parse_env_name)
                        .collect::<Vec<_>>()
                })
                .collect()
        })
    }

    fn config_file_present(&self, name: &str) -> bool {
        if name.contains(['*', '?', '[']) {
            !self.find_files(&format!("/{}", name), 1).is_empty()
        } else {
            self.file_exists(name)
        }
    }

    /// Builds the evidence bag for one detector
    pub fn gather(&self, spec: &DetectorSpec, gates: Gates) -> Evidence {
        let requirements = &spec.requirements;
        let limit = self.config.file_limit;
        let mut evidence = Evidence::with_gates(gates);

        for pattern in requirements.file_patterns {
            if evidence.files.len() >= limit {
                break;
            }
            for file in self.find_files(pattern, limit) {
                if evidence.files.len() >= limit {
                    break;
                }
                if !evidence.files.contains(&file) {
                    evidence.files.push(file);
                }
            }
        }

        evidence.config_files = requirements
            .config_files
            .iter()
            .filter(|name| self.config_file_present(name))
            .map(|name| name.to_string())
            .collect();

        if !requirements.dependencies.is_empty() || !requirements.related_packages.is_empty() {
            let declared = self.read_all_dependencies();
            evidence.dependencies = matching(requirements.dependencies, declared);
            evidence.related_packages = matching(requirements.related_packages, declared);
        }

        if !requirements.docker_services.is_empty() {
            evidence.docker_services = self.scan_docker_compose(requirements.docker_services);
        }

        if !requirements.env_vars.is_empty() {
            let names = self.env_var_names();
            evidence.env_vars = requirements
                .env_vars
                .iter()
                .filter(|wanted| names.iter().any(|name| env_name_matches(name, wanted)))
                .map(|wanted| wanted.to_string())
                .collect();
        }

        if let Some(scan) = &requirements.content {
            evidence.content_matches = self.scan_content(scan);
        }

        evidence.directories = requirements
            .directories
            .iter()
            .filter(|dir| self.dir_exists(dir))
            .map(|dir| dir.to_string())
            .collect();

        debug!(
            detector = %spec.id,
            category = %spec.category,
            files = evidence.files.len(),
            config_files = evidence.config_files.len(),
            dependencies = evidence.dependencies.len(),
            content_matches = evidence.content_matches.len(),
            "Evidence gathered"
        );
        evidence
    }
}

fn matching(wanted: &[&str], declared: &DependencySet) -> Vec<String> {
    wanted
        .iter()
        .filter(|name| declared.contains(**name))
        .map(|name| name.to_string())
        .collect()
}

/// A trailing `_` in the wanted name makes it a prefix match.
fn env_name_matches(name: &str, wanted: &str) -> bool {
    if wanted.ends_with('_') {
        name.starts_with(wanted)
    } else {
        name == wanted
    }
}

fn parse_env_name(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (name, _) = line.split_once('=')?;
    let name = name.trim();
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then(|| name.to_string())
}
