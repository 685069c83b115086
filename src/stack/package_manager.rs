//! Package manager detection from lock files

use crate::evidence::EvidenceCollector;
use tracing::debug;

crate::define_id_enum! {
    /// Package manager identifier
    PackageManagerId {
        Npm => "npm" : "npm",
        Yarn => "yarn" : "Yarn",
        Pnpm => "pnpm" : "pnpm",
        Bun => "bun" : "Bun",
        Pip => "pip" : "pip",
        Poetry => "poetry" : "Poetry",
        Pipenv => "pipenv" : "Pipenv",
        Uv => "uv" : "uv",
        Cargo => "cargo" : "Cargo",
        Bundler => "bundler" : "Bundler",
        Composer => "composer" : "Composer",
        Go => "go" : "Go modules",
    }
}

impl PackageManagerId {
    /// Files whose presence at the project root proves this manager
    pub fn lock_files(&self) -> &'static [&'static str] {
        match self {
            PackageManagerId::Npm => &["package-lock.json"],
            PackageManagerId::Yarn => &["yarn.lock"],
            PackageManagerId::Pnpm => &["pnpm-lock.yaml"],
            PackageManagerId::Bun => &["bun.lockb", "bun.lock"],
            PackageManagerId::Pip => &["requirements.txt"],
            PackageManagerId::Poetry => &["poetry.lock"],
            PackageManagerId::Pipenv => &["Pipfile.lock"],
            PackageManagerId::Uv => &["uv.lock"],
            PackageManagerId::Cargo => &["Cargo.lock"],
            PackageManagerId::Bundler => &["Gemfile.lock"],
            PackageManagerId::Composer => &["composer.lock"],
            PackageManagerId::Go => &["go.sum"],
        }
    }
}

/// One lock-file probe per manager, in declaration order
pub fn detect_package_managers(collector: &EvidenceCollector) -> Vec<PackageManagerId> {
    let detected: Vec<PackageManagerId> = PackageManagerId::all_variants()
        .iter()
        .copied()
        .filter(|manager| manager.lock_files().iter().any(|f| collector.file_exists(f)))
        .collect();

    debug!(package_managers = ?detected, "Package managers detected");
    detected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectorConfig;
    use crate::fs::MockFileSystem;
    use std::sync::Arc;

    fn detect(fs: MockFileSystem) -> Vec<PackageManagerId> {
        let root = fs.root().to_path_buf();
        let collector = EvidenceCollector::new(Arc::new(fs), root, DetectorConfig::default());
        detect_package_managers(&collector)
    }

    #[test]
    fn test_no_lock_files() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{}");
        assert!(detect(fs).is_empty());
    }

    #[test]
    fn test_declaration_order() {
        let fs = MockFileSystem::new();
        fs.add_file("go.sum", "");
        fs.add_file("yarn.lock", "");
        fs.add_file("package-lock.json", "{}");
        fs.add_file("bun.lock", "");

        assert_eq!(
            detect(fs),
            vec![
                PackageManagerId::Npm,
                PackageManagerId::Yarn,
                PackageManagerId::Bun,
                PackageManagerId::Go
            ]
        );
    }

    #[test]
    fn test_nested_lock_files_are_ignored() {
        let fs = MockFileSystem::new();
        fs.add_file("frontend/yarn.lock", "");
        assert!(detect(fs).is_empty());
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&PackageManagerId::Pnpm).unwrap(),
            "\"pnpm\""
        );
        assert_eq!(PackageManagerId::from_name("Poetry"), Some(PackageManagerId::Poetry));
    }
}
