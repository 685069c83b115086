//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

/// Bounds applied to a recursive walk of a project tree
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Maximum directory depth below the root (root children are depth 1)
    pub max_depth: usize,
    /// Maximum number of files returned
    pub max_files: usize,
    /// Directory names that are never descended into
    pub excluded_dirs: Vec<String>,
}

impl WalkOptions {
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }
}

/// Abstraction over file system operations for testability
///
/// The collector only ever reads through this trait, so a project tree is
/// never modified by detection.
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Canonicalize a path
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// List files below `root`, relative to it, sorted by path.
    fn walk_files(&self, root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_options_exclusion() {
        let options = WalkOptions {
            max_depth: 3,
            max_files: 10,
            excluded_dirs: vec!["node_modules".to_string(), ".git".to_string()],
        };

        assert!(options.is_excluded("node_modules"));
        assert!(options.is_excluded(".git"));
        assert!(!options.is_excluded("src"));
    }
}
