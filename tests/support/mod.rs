use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds a throwaway project tree on disk
pub struct Project {
    dir: TempDir,
}

#[allow(dead_code)]
impl Project {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn file(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        self
    }

    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(relative)).expect("Failed to create directory");
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[allow(dead_code)]
pub fn get_stackprobe_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stackprobe"))
}
