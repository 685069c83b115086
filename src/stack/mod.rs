//! Technology stack detection.
//!
//! Every detector is a piece of const data ([`DetectorSpec`]) grouped by
//! [`Category`] in the [`catalog`]. Scoring is a pure function of the
//! gathered [`Evidence`](crate::evidence::Evidence), so the whole pipeline is
//! deterministic for a given project tree:
//!
//! 1. the project type is classified first, producing the backend/frontend gates
//! 2. each category's specs are scored concurrently and thresholded at
//!    [`ACCEPTANCE_THRESHOLD`]
//! 3. mutually exclusive detections are dropped by the [`ConflictResolver`]
//! 4. architecture and package managers are probed and everything is folded
//!    into a [`StackResult`]
//!
//! # Example
//!
//! ```no_run
//! use stackprobe::stack::{DetectorRegistry, TechId};
//!
//! let registry = DetectorRegistry::with_defaults();
//! let spec = registry.get(TechId::NextJs).unwrap();
//! assert!(spec.excludes(TechId::Nuxt));
//! ```

#[macro_use]
pub mod id_enum_macro;

pub mod architecture;
pub mod assembler;
pub mod catalog;
pub mod category;
pub mod conflicts;
pub mod detector;
pub mod package_manager;
pub mod project_type;
pub mod registry;
pub mod scorer;
pub mod scoring;
pub mod tech_id;

pub use architecture::{detect_architecture, Architecture, ArchitecturePattern, ArchitectureType};
pub use assembler::{CategoryDetections, StackAssembler, StackResult};
pub use category::Category;
pub use conflicts::{ConflictResolver, ConflictStrategy};
pub use detector::{ContentScan, Detection, DetectorSpec, Requirements};
pub use package_manager::{detect_package_managers, PackageManagerId};
pub use project_type::{Indicators, ProjectType, ProjectTypeClassifier, ProjectTypeScore};
pub use registry::DetectorRegistry;
pub use scorer::{accepts, ConfidenceScorer, ACCEPTANCE_THRESHOLD};
pub use tech_id::TechId;
