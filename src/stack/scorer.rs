//! Confidence scorer
//!
//! Runs every spec of a category against freshly gathered evidence, keeps
//! detections at or above the acceptance threshold and ranks them. Detectors
//! run concurrently on the blocking pool, bounded by `workers`; the ranking
//! is applied after all of them finish, so completion order never leaks into
//! the result.

use super::scoring;
use super::{Category, Detection, DetectorRegistry, DetectorSpec};
use crate::evidence::{EvidenceCollector, Gates};
use futures_util::stream::{self, StreamExt};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::debug;

/// Minimum confidence for a detection to be reported
pub const ACCEPTANCE_THRESHOLD: f64 = 0.7;

/// Whether `confidence` clears the acceptance threshold (inclusive)
pub fn accepts(confidence: f64) -> bool {
    confidence >= ACCEPTANCE_THRESHOLD
}

pub struct ConfidenceScorer {
    registry: Arc<DetectorRegistry>,
    workers: usize,
}

impl ConfidenceScorer {
    pub fn new(registry: Arc<DetectorRegistry>, workers: usize) -> Self {
        Self {
            registry,
            workers: workers.max(1),
        }
    }

    /// Gathers evidence for one spec and scores it, without thresholding
    pub fn evaluate(spec: &DetectorSpec, collector: &EvidenceCollector, gates: Gates) -> Detection {
        let evidence = collector.gather(spec, gates);
        let confidence = scoring::score(spec.id, &evidence);
        debug!(detector = %spec.id, category = %spec.category, confidence, "Detector scored");
        Detection::new(spec.id, confidence, evidence)
    }

    /// Drops detections under the threshold and sorts the rest by
    /// descending confidence, ties by registry declaration order.
    pub fn rank(&self, candidates: Vec<Detection>) -> Vec<Detection> {
        let mut accepted: Vec<Detection> = candidates
            .into_iter()
            .filter(|d| accepts(d.confidence))
            .collect();

        accepted.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    self.registry
                        .position(a.name)
                        .cmp(&self.registry.position(b.name))
                })
        });
        accepted
    }

    /// Scores every spec of `category` and returns the ranked accepted set
    pub async fn score_category(
        &self,
        category: Category,
        collector: Arc<EvidenceCollector>,
        gates: Gates,
    ) -> Result<Vec<Detection>, JoinError> {
        let specs: Vec<DetectorSpec> = self.registry.specs(category).into_iter().copied().collect();

        let results: Vec<Result<Detection, JoinError>> = stream::iter(specs)
            .map(|spec| {
                let collector = Arc::clone(&collector);
                tokio::task::spawn_blocking(move || Self::evaluate(&spec, &collector, gates))
            })
            .buffer_unordered(self.workers)
            .collect()
            .await;

        let candidates = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        let ranked = self.rank(candidates);

        debug!(
            category = %category,
            accepted = ranked.len(),
            "Category scored"
        );
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectorConfig;
    use crate::evidence::Evidence;
    use crate::fs::MockFileSystem;
    use crate::stack::TechId;

    fn scorer() -> ConfidenceScorer {
        ConfidenceScorer::new(Arc::new(DetectorRegistry::with_defaults()), 4)
    }

    fn detection(name: TechId, confidence: f64) -> Detection {
        Detection::new(name, confidence, Evidence::default())
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(accepts(0.7));
        assert!(!accepts(0.69));
        assert!(accepts(1.0));
    }

    #[test]
    fn test_rank_filters_and_sorts() {
        let ranked = scorer().rank(vec![
            detection(TechId::Python, 0.7),
            detection(TechId::Go, 0.69),
            detection(TechId::Rust, 1.0),
            detection(TechId::JavaScript, 0.9),
        ]);

        let names: Vec<_> = ranked.iter().map(|d| d.name).collect();
        assert_eq!(names, vec![TechId::Rust, TechId::JavaScript, TechId::Python]);
    }

    #[test]
    fn test_rank_ties_follow_declaration_order() {
        let ranked = scorer().rank(vec![
            detection(TechId::Go, 1.0),
            detection(TechId::Python, 1.0),
            detection(TechId::TypeScript, 1.0),
        ]);

        let names: Vec<_> = ranked.iter().map(|d| d.name).collect();
        assert_eq!(names, vec![TechId::TypeScript, TechId::Python, TechId::Go]);
    }

    #[tokio::test]
    async fn test_score_category_with_mock_fs() {
        let fs = MockFileSystem::new();
        fs.add_file("Cargo.toml", "[package]\nname = \"svc\"\n\n[dependencies]\naxum = \"0.7\"\n");
        fs.add_file("src/main.rs", "use axum::Router;\nfn main() {}\n");
        let root = fs.root().to_path_buf();
        let collector = Arc::new(EvidenceCollector::new(
            Arc::new(fs),
            root,
            DetectorConfig::default(),
        ));

        let scorer = scorer();
        let languages = scorer
            .score_category(Category::Language, Arc::clone(&collector), Gates::default())
            .await
            .unwrap();
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].name, TechId::Rust);
        assert_eq!(languages[0].confidence, 1.0);

        let backends = scorer
            .score_category(Category::BackendFramework, collector, Gates::default())
            .await
            .unwrap();
        assert_eq!(backends[0].name, TechId::Axum);
        assert_eq!(backends[0].evidence.dependencies, vec!["axum"]);
    }
}
