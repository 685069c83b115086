//! stackprobe - static technology stack classifier
//!
//! Point it at a project directory and it reports the languages, frontend and
//! backend frameworks, databases, test frameworks, build tools and deployment
//! targets in use, without executing anything in the project.
//!
//! # Core Concepts
//!
//! - **Evidence**: literal signals found on disk (files, manifest
//!   dependencies, config files, compose services, env var names, content
//!   pattern matches) gathered per detector by the [`evidence`] collector
//! - **Detectors**: declarative [`stack::DetectorSpec`] records whose score is
//!   a pure function of their evidence
//! - **Gates**: the project type (backend-only, frontend-only) decides which
//!   framework categories are evaluated at all
//!
//! # Example Usage
//!
//! ```no_run
//! # async fn example() {
//! let result = stackprobe::detect("/path/to/project").await;
//!
//! println!("Type: {}", result.project_type);
//! for language in &result.languages {
//!     println!("Language: {}", language.name());
//! }
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`fs`]: file system abstraction with real and in-memory implementations
//! - [`evidence`]: evidence collection, manifest parsers
//! - [`stack`]: identifiers, detector catalog, scoring, conflict resolution
//! - [`detection`]: the [`StackDetector`] pipeline and [`detect`] entry point
//! - [`config`]: environment-driven settings

pub mod cli;
pub mod config;
pub mod detection;
pub mod evidence;
pub mod fs;
pub mod stack;
pub mod util;

pub use config::{ConfigError, DetectorConfig, StackprobeConfig};
pub use detection::{detect, DetectError, StackDetector};
pub use evidence::{Evidence, EvidenceCollector};
pub use stack::{
    Category, ConflictStrategy, Detection, DetectorRegistry, ProjectType, StackResult, TechId,
};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
