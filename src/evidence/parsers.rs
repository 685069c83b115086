//! Manifest parsers producing dependency-name sets
//!
//! Every parser sits behind [`DependencyParser`] so the collector can treat
//! Node, Python, Rust, Go, Ruby, PHP and JVM manifests uniformly. Parsers
//! report malformed input as [`ParseError`]; the collector decides whether
//! that degrades to an empty set or to a lenient fallback.

use super::patterns::REQUIREMENTS_FILES;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use thiserror::Error;

pub type DependencySet = BTreeSet<String>;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid XML manifest: {0}")]
    Xml(#[from] roxmltree::Error),
}

pub trait DependencyParser: Send + Sync {
    /// Files this parser reads, relative to the project root
    fn files(&self) -> &'static [&'static str];

    fn parse(&self, content: &str) -> Result<DependencySet, ParseError>;
}

/// Python package names compare case-insensitively with `_`, `.` and `-` equal.
pub fn normalize_python_name(name: &str) -> String {
    name.trim().to_lowercase().replace(['_', '.'], "-")
}

fn requirement_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._-]*)").expect("requirement name pattern is valid")
    })
}

/// Extracts the distribution name from a requirement string such as
/// `uvicorn[standard]>=0.24; python_version > "3.8"`.
pub fn requirement_name(requirement: &str) -> Option<String> {
    requirement_name_regex()
        .captures(requirement)
        .and_then(|caps| caps.get(1))
        .map(|m| normalize_python_name(m.as_str()))
}

/// Reads the keys of one or more JSON objects (`package.json`, `composer.json`)
pub struct JsonDependencyParser {
    pub files: &'static [&'static str],
    pub dependencies_keys: &'static [&'static str],
}

impl DependencyParser for JsonDependencyParser {
    fn files(&self) -> &'static [&'static str] {
        self.files
    }

    fn parse(&self, content: &str) -> Result<DependencySet, ParseError> {
        let parsed: serde_json::Value = serde_json::from_str(content)?;

        let mut deps = DependencySet::new();
        for key in self.dependencies_keys {
            if let Some(table) = parsed.get(key).and_then(|v| v.as_object()) {
                deps.extend(table.keys().cloned());
            }
        }
        Ok(deps)
    }
}

/// Reads the keys of TOML tables addressed by dotted paths
pub struct TomlDependencyParser {
    pub files: &'static [&'static str],
    pub tables: &'static [&'static [&'static str]],
    pub python_names: bool,
}

impl DependencyParser for TomlDependencyParser {
    fn files(&self) -> &'static [&'static str] {
        self.files
    }

    fn parse(&self, content: &str) -> Result<DependencySet, ParseError> {
        let parsed: toml::Value = toml::from_str(content)?;

        let mut deps = DependencySet::new();
        for path in self.tables {
            if let Some(table) = lookup(&parsed, path).and_then(|v| v.as_table()) {
                for name in table.keys() {
                    if self.python_names {
                        deps.insert(normalize_python_name(name));
                    } else {
                        deps.insert(name.clone());
                    }
                }
            }
        }
        Ok(deps)
    }
}

fn lookup<'a>(value: &'a toml::Value, path: &[&str]) -> Option<&'a toml::Value> {
    path.iter().try_fold(value, |current, key| current.get(key))
}

/// Structured `pyproject.toml` reader covering PEP 621 and Poetry layouts
pub struct PyProjectParser;

impl DependencyParser for PyProjectParser {
    fn files(&self) -> &'static [&'static str] {
        &["pyproject.toml"]
    }

    fn parse(&self, content: &str) -> Result<DependencySet, ParseError> {
        let parsed: toml::Value = toml::from_str(content)?;
        let mut deps = DependencySet::new();

        let requirement_arrays = lookup(&parsed, &["project", "dependencies"])
            .and_then(|v| v.as_array())
            .into_iter()
            .chain(
                lookup(&parsed, &["project", "optional-dependencies"])
                    .and_then(|v| v.as_table())
                    .into_iter()
                    .flat_map(|t| t.values())
                    .filter_map(|v| v.as_array()),
            );
        for array in requirement_arrays {
            deps.extend(
                array
                    .iter()
                    .filter_map(|v| v.as_str())
                    .filter_map(requirement_name),
            );
        }

        if let Some(poetry) = lookup(&parsed, &["tool", "poetry"]) {
            let mut tables: Vec<&toml::value::Table> = ["dependencies", "dev-dependencies"]
                .iter()
                .filter_map(|key| poetry.get(key).and_then(|v| v.as_table()))
                .collect();
            if let Some(groups) = poetry.get("group").and_then(|v| v.as_table()) {
                tables.extend(
                    groups
                        .values()
                        .filter_map(|g| g.get("dependencies").and_then(|v| v.as_table())),
                );
            }
            for table in tables {
                deps.extend(
                    table
                        .keys()
                        .filter(|name| name.as_str() != "python")
                        .map(|name| normalize_python_name(name)),
                );
            }
        }

        Ok(deps)
    }
}

/// Degraded-mode `pyproject.toml` reader for files the TOML parser rejects.
///
/// Pulls quoted requirement strings out of any `dependencies = [...]` array
/// without understanding the surrounding document. Brackets inside quoted
/// entries (extras such as `uvicorn[standard]`) do not close the array.
pub struct LenientPyProjectParser;

impl LenientPyProjectParser {
    fn array_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r#"dependencies\s*=\s*\[((?:"[^"]*"|'[^']*'|[^\]"'])*)\]"#)
                .expect("dependency array pattern is valid")
        })
    }

    fn quoted_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r#""([^"]+)"|'([^']+)'"#).expect("quoted string pattern is valid")
        })
    }
}

impl DependencyParser for LenientPyProjectParser {
    fn files(&self) -> &'static [&'static str] {
        &["pyproject.toml"]
    }

    fn parse(&self, content: &str) -> Result<DependencySet, ParseError> {
        let mut deps = DependencySet::new();
        for array in Self::array_regex().captures_iter(content) {
            let body = array.get(1).map(|m| m.as_str()).unwrap_or_default();
            deps.extend(
                Self::quoted_regex()
                    .captures_iter(body)
                    .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
                    .filter_map(|m| requirement_name(m.as_str())),
            );
        }
        Ok(deps)
    }
}

/// Line-oriented reader: the first capture group of `line_pattern` is the name
pub struct RegexDependencyParser {
    pub files: &'static [&'static str],
    pub line_pattern: Regex,
    pub python_names: bool,
}

impl DependencyParser for RegexDependencyParser {
    fn files(&self) -> &'static [&'static str] {
        self.files
    }

    fn parse(&self, content: &str) -> Result<DependencySet, ParseError> {
        let mut deps = DependencySet::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }

            if let Some(name) = self.line_pattern.captures(line).and_then(|caps| caps.get(1)) {
                if self.python_names {
                    deps.insert(normalize_python_name(name.as_str()));
                } else {
                    deps.insert(name.as_str().to_string());
                }
            }
        }

        Ok(deps)
    }
}

/// `pom.xml` reader yielding `groupId:artifactId` coordinates
pub struct MavenParser;

impl DependencyParser for MavenParser {
    fn files(&self) -> &'static [&'static str] {
        &["pom.xml"]
    }

    fn parse(&self, content: &str) -> Result<DependencySet, ParseError> {
        let doc = roxmltree::Document::parse(content)?;

        let deps = doc
            .descendants()
            .filter(|n| matches!(n.tag_name().name(), "dependency" | "parent" | "plugin"))
            .filter_map(|n| {
                let group = child_text(n, "groupId")?;
                let artifact = child_text(n, "artifactId")?;
                Some(format!("{}:{}", group, artifact))
            })
            .collect();

        Ok(deps)
    }
}

fn child_text(node: roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|c| c.tag_name().name() == name)
        .and_then(|c| c.text())
        .map(|t| t.trim().to_string())
}

/// `build.gradle(.kts)` reader yielding `group:artifact` coordinates and plugin ids
pub struct GradleParser;

impl GradleParser {
    fn coordinate_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r#"["']([\w.\-]+):([\w.\-]+)(?::[^"']*)?["']"#)
                .expect("gradle coordinate pattern is valid")
        })
    }

    fn plugin_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r#"\bid\s*\(?\s*["']([\w.\-]+)["']"#).expect("gradle plugin pattern is valid")
        })
    }
}

impl DependencyParser for GradleParser {
    fn files(&self) -> &'static [&'static str] {
        &["build.gradle", "build.gradle.kts"]
    }

    fn parse(&self, content: &str) -> Result<DependencySet, ParseError> {
        let mut deps: DependencySet = Self::coordinate_regex()
            .captures_iter(content)
            .map(|caps| format!("{}:{}", &caps[1], &caps[2]))
            .collect();
        deps.extend(
            Self::plugin_regex()
                .captures_iter(content)
                .map(|caps| caps[1].to_string()),
        );
        Ok(deps)
    }
}

fn line_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in dependency line pattern is valid")
}

/// Parser for the Node manifest alone
pub fn node_parser() -> JsonDependencyParser {
    JsonDependencyParser {
        files: &["package.json"],
        dependencies_keys: &["dependencies", "devDependencies"],
    }
}

pub fn requirements_parser() -> RegexDependencyParser {
    RegexDependencyParser {
        files: REQUIREMENTS_FILES,
        line_pattern: line_regex(r"^([A-Za-z0-9][A-Za-z0-9._-]*)"),
        python_names: true,
    }
}

pub fn pipfile_parser() -> TomlDependencyParser {
    TomlDependencyParser {
        files: &["Pipfile"],
        tables: &[&["packages"], &["dev-packages"]],
        python_names: true,
    }
}

/// Every non-Node, non-Python parser, in the order they are consulted
pub fn ecosystem_parsers() -> Vec<Box<dyn DependencyParser>> {
    vec![
        Box::new(TomlDependencyParser {
            files: &["Cargo.toml"],
            tables: &[
                &["dependencies"],
                &["dev-dependencies"],
                &["workspace", "dependencies"],
            ],
            python_names: false,
        }),
        Box::new(RegexDependencyParser {
            files: &["go.mod"],
            line_pattern: line_regex(r"^(?:require\s+)?([a-z0-9.\-]+\.[a-z]+/\S+)\s+v"),
            python_names: false,
        }),
        Box::new(RegexDependencyParser {
            files: &["Gemfile"],
            line_pattern: line_regex(r#"^gem\s+["']([^"']+)["']"#),
            python_names: false,
        }),
        Box::new(JsonDependencyParser {
            files: &["composer.json"],
            dependencies_keys: &["require", "require-dev"],
        }),
        Box::new(MavenParser),
        Box::new(GradleParser),
    ]
}

/// `[project.scripts]` or `[tool.poetry.scripts]` declares console entry points
pub fn pyproject_declares_scripts(content: &str) -> bool {
    match toml::from_str::<toml::Value>(content) {
        Ok(parsed) => [&["project", "scripts"][..], &["tool", "poetry", "scripts"][..]]
            .iter()
            .any(|path| {
                lookup(&parsed, path)
                    .and_then(|v| v.as_table())
                    .is_some_and(|t| !t.is_empty())
            }),
        Err(_) => content.contains("[project.scripts]") || content.contains("[tool.poetry.scripts]"),
    }
}
