//! Detection orchestration
//!
//! [`StackDetector`] is the only place where the pipeline stages meet:
//!
//! ```text
//! StackDetector
//!   ├── EvidenceCollector (one walk, cached probes)
//!   ├── ProjectTypeClassifier -> Gates
//!   ├── ConfidenceScorer (per category, bounded worker pool)
//!   ├── ConflictResolver
//!   └── StackAssembler -> StackResult
//! ```
//!
//! # Example
//!
//! ```no_run
//! use stackprobe::config::DetectorConfig;
//! use stackprobe::detection::StackDetector;
//!
//! # async fn example() {
//! let detector = StackDetector::new(DetectorConfig::default());
//! let result = detector.detect("/path/to/repo").await;
//!
//! println!("Type: {}", result.project_type);
//! println!("Patterns: {:?}", result.patterns);
//! # }
//! ```

use crate::config::DetectorConfig;
use crate::evidence::{EvidenceCollector, Gates};
use crate::fs::{FileSystem, RealFileSystem};
use crate::stack::{
    detect_architecture, detect_package_managers, Category, CategoryDetections,
    ConfidenceScorer, ConflictResolver, Detection, DetectorRegistry, ProjectTypeClassifier,
    StackAssembler, StackResult,
};
use futures_util::future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

/// Errors that stop a detection before any evidence is gathered
#[derive(Debug, Error)]
pub enum DetectError {
    /// Project path does not exist or is not accessible
    #[error("Project path not found: {0}")]
    PathNotFound(PathBuf),

    /// Project path is not a directory
    #[error("Project path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to canonicalize {path}: {message}")]
    Canonicalize { path: PathBuf, message: String },

    /// A background scoring task panicked or was cancelled
    #[error("Detection task failed: {0}")]
    Task(#[from] JoinError),
}

impl DetectError {
    /// Returns a user-facing message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            DetectError::PathNotFound(path) => format!(
                "Error: Project path not found\nPath: {}\n\n\
                Help: The specified path does not exist. Please check:\n\
                - Is the path correct?\n\
                - Do you have permission to access it?",
                path.display()
            ),
            DetectError::NotADirectory(path) => format!(
                "Error: Project path is not a directory\nPath: {}\n\n\
                Help: Please provide the path to the project root directory.",
                path.display()
            ),
            DetectError::Canonicalize { path, message } => format!(
                "Error: Cannot resolve project path\nPath: {}\n\nDetails: {}",
                path.display(),
                message
            ),
            DetectError::Task(err) => format!(
                "Error: Detection failed\n\n\
                Help: A detector task stopped unexpectedly. Run with --log-level debug \
                for details.\n\nDetails: {}",
                err
            ),
        }
    }
}

/// Runs the full detection pipeline against a project directory
///
/// Cheap to clone state is held behind `Arc`, so one detector can serve many
/// concurrent `detect` calls. Nothing is shared between calls.
pub struct StackDetector {
    registry: Arc<DetectorRegistry>,
    fs: Arc<dyn FileSystem>,
    config: DetectorConfig,
}

impl std::fmt::Debug for StackDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackDetector")
            .field("detectors", &self.registry.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for StackDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl StackDetector {
    /// Detector over the real file system with the built-in catalog
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_fs(Arc::new(RealFileSystem::new()), config)
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>, config: DetectorConfig) -> Self {
        Self {
            registry: Arc::new(DetectorRegistry::with_defaults()),
            fs,
            config,
        }
    }

    pub fn with_registry(mut self, registry: DetectorRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn registry(&self) -> &DetectorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detects the stack, returning the empty result on any failure
    pub async fn detect(&self, path: impl AsRef<Path>) -> StackResult {
        let path = path.as_ref();
        match self.try_detect(path).await {
            Ok(result) => result,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Detection failed, returning empty result");
                StackResult::empty()
            }
        }
    }

    /// Detects the stack, surfacing path and task failures
    pub async fn try_detect(&self, path: impl AsRef<Path>) -> Result<StackResult, DetectError> {
        let path = path.as_ref();
        let start = Instant::now();
        let root = self.validate_root(path)?;
        info!(path = %root.display(), "Starting stack detection");

        let collector = Arc::new(EvidenceCollector::new(
            Arc::clone(&self.fs),
            root.clone(),
            self.config.clone(),
        ));

        let classify = Arc::clone(&collector);
        let project =
            tokio::task::spawn_blocking(move || ProjectTypeClassifier::classify(&classify)).await?;
        let gates = project.gates();

        let scorer = ConfidenceScorer::new(Arc::clone(&self.registry), self.config.workers);
        let categories = future::try_join_all(
            Category::ALL
                .iter()
                .map(|&category| run_category(&scorer, category, Arc::clone(&collector), gates)),
        );

        let layout_collector = Arc::clone(&collector);
        let layout = tokio::task::spawn_blocking(move || {
            (
                detect_architecture(&layout_collector),
                detect_package_managers(&layout_collector),
            )
        });

        let (ranked, layout) = tokio::join!(categories, layout);
        let ranked = ranked?;
        let (architecture, package_managers) = layout?;

        let resolver = ConflictResolver::from_registry(&self.registry, self.config.conflict_strategy);
        let mut detections = CategoryDetections::default();
        for (category, candidates) in Category::ALL.into_iter().zip(ranked) {
            detections.set(category, resolver.resolve(candidates));
        }

        let result = StackAssembler::assemble(&project, detections, architecture, package_managers);

        info!(
            path = %root.display(),
            project_type = %result.project_type,
            technologies = result.patterns.len(),
            files = collector.snapshot().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Stack detection complete"
        );
        Ok(result)
    }

    fn validate_root(&self, path: &Path) -> Result<PathBuf, DetectError> {
        if !self.fs.exists(path) {
            return Err(DetectError::PathNotFound(path.to_path_buf()));
        }
        if !self.fs.is_dir(path) {
            return Err(DetectError::NotADirectory(path.to_path_buf()));
        }
        self.fs
            .canonicalize(path)
            .map_err(|e| DetectError::Canonicalize {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

/// Gated categories are skipped outright when the project type rules them out.
fn gated_out(category: Category, gates: Gates) -> bool {
    match category {
        Category::FrontendFramework => gates.is_backend_only,
        Category::BackendFramework => gates.is_frontend_only,
        _ => false,
    }
}

async fn run_category(
    scorer: &ConfidenceScorer,
    category: Category,
    collector: Arc<EvidenceCollector>,
    gates: Gates,
) -> Result<Vec<Detection>, JoinError> {
    if gated_out(category, gates) {
        debug!(category = %category, "Category skipped by project type");
        return Ok(Vec::new());
    }
    scorer.score_category(category, collector, gates).await
}

/// Detects the stack of the project at `path` with default settings.
///
/// Never fails: any error yields [`StackResult::empty`].
pub async fn detect(path: impl AsRef<Path>) -> StackResult {
    StackDetector::default().detect(path).await
}
