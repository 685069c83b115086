//! File names and exclusion rules used by the evidence collector

/// Directories never descended into while walking a project
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "dist",
    "build",
    ".git",
    "target",
    "__pycache__",
    ".venv",
    "venv",
];

/// Compose file locations probed for service names, in order
pub const COMPOSE_FILES: &[&str] = &[
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
    "docker/docker-compose.yml",
];

/// Dotenv files scanned for variable names
pub const ENV_FILES: &[&str] = &[
    ".env",
    ".env.example",
    ".env.sample",
    ".env.local",
    ".env.development",
];

/// Plain requirements lists read for Python dependencies
pub const REQUIREMENTS_FILES: &[&str] = &[
    "requirements.txt",
    "requirements-dev.txt",
    "requirements_dev.txt",
    "dev-requirements.txt",
    "requirements-test.txt",
];

/// Manifests that mark a package root. Used to spot nested packages.
pub const MANIFEST_FILES: &[&str] = &[
    "package.json",
    "Cargo.toml",
    "go.mod",
    "pyproject.toml",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "composer.json",
    "Gemfile",
];

pub fn is_excluded_dir(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

pub fn is_manifest_file(name: &str) -> bool {
    MANIFEST_FILES.contains(&name)
}

pub fn is_dockerfile(name: &str) -> bool {
    name == "Dockerfile" || name.starts_with("Dockerfile.") || name.ends_with(".Dockerfile")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_dirs() {
        assert!(is_excluded_dir("node_modules"));
        assert!(is_excluded_dir(".git"));
        assert!(is_excluded_dir("__pycache__"));
        assert!(!is_excluded_dir("src"));
    }

    #[test]
    fn test_dockerfile_names() {
        assert!(is_dockerfile("Dockerfile"));
        assert!(is_dockerfile("Dockerfile.prod"));
        assert!(is_dockerfile("api.Dockerfile"));
        assert!(!is_dockerfile("dockerfile.md"));
    }

    #[test]
    fn test_manifest_files() {
        assert!(is_manifest_file("package.json"));
        assert!(is_manifest_file("go.mod"));
        assert!(!is_manifest_file("package-lock.json"));
    }
}
