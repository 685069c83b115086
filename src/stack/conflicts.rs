//! Mutual-exclusion resolution within one category

use super::{Detection, DetectorRegistry, TechId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How the survivor of a mutually exclusive pair is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictStrategy {
    /// Walk detections by descending confidence and drop anything that
    /// conflicts with an already kept detection.
    #[default]
    HighestConfidence,
    /// Every accepted detection, in registry order, removes the names it
    /// declares as exclusions regardless of their confidence.
    DeclarationOrder,
}

impl ConflictStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictStrategy::HighestConfidence => "highest-confidence",
            ConflictStrategy::DeclarationOrder => "declaration-order",
        }
    }
}

impl FromStr for ConflictStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "highest-confidence" => Ok(ConflictStrategy::HighestConfidence),
            "declaration-order" => Ok(ConflictStrategy::DeclarationOrder),
            other => Err(format!(
                "unknown conflict strategy '{}' (expected highest-confidence or declaration-order)",
                other
            )),
        }
    }
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ConflictResolver {
    declared: HashMap<TechId, &'static [TechId]>,
    symmetric: HashMap<TechId, HashSet<TechId>>,
    positions: HashMap<TechId, usize>,
    strategy: ConflictStrategy,
}

impl ConflictResolver {
    pub fn from_registry(registry: &DetectorRegistry, strategy: ConflictStrategy) -> Self {
        let mut declared = HashMap::new();
        let mut symmetric: HashMap<TechId, HashSet<TechId>> = HashMap::new();
        let mut positions = HashMap::new();

        for (position, spec) in registry.all().iter().enumerate() {
            positions.entry(spec.id).or_insert(position);
            if spec.exclusions.is_empty() {
                continue;
            }
            declared.insert(spec.id, spec.exclusions);
            for other in spec.exclusions {
                symmetric.entry(spec.id).or_default().insert(*other);
                symmetric.entry(*other).or_default().insert(spec.id);
            }
        }

        Self {
            declared,
            symmetric,
            positions,
            strategy,
        }
    }

    pub fn strategy(&self) -> ConflictStrategy {
        self.strategy
    }

    pub fn conflicts(&self, a: TechId, b: TechId) -> bool {
        self.symmetric
            .get(&a)
            .is_some_and(|others| others.contains(&b))
    }

    /// Strips losing detections. `detections` must already be ranked; the
    /// survivors keep that order.
    pub fn resolve(&self, detections: Vec<Detection>) -> Vec<Detection> {
        match self.strategy {
            ConflictStrategy::HighestConfidence => self.resolve_by_confidence(detections),
            ConflictStrategy::DeclarationOrder => self.resolve_by_declaration(detections),
        }
    }

    fn resolve_by_confidence(&self, detections: Vec<Detection>) -> Vec<Detection> {
        let mut kept: Vec<Detection> = Vec::with_capacity(detections.len());
        for detection in detections {
            if let Some(winner) = kept.iter().find(|k| self.conflicts(k.name, detection.name)) {
                debug!(
                    dropped = %detection.name,
                    kept = %winner.name,
                    confidence = detection.confidence,
                    "Conflicting detection removed"
                );
                continue;
            }
            kept.push(detection);
        }
        kept
    }

    fn resolve_by_declaration(&self, mut detections: Vec<Detection>) -> Vec<Detection> {
        let mut order: Vec<TechId> = detections.iter().map(|d| d.name).collect();
        order.sort_by_key(|id| self.positions.get(id).copied().unwrap_or(usize::MAX));

        let mut removed: HashSet<TechId> = HashSet::new();
        for id in order {
            if removed.contains(&id) {
                continue;
            }
            if let Some(exclusions) = self.declared.get(&id) {
                removed.extend(exclusions.iter().copied());
            }
        }

        detections.retain(|d| {
            let keep = !removed.contains(&d.name);
            if !keep {
                debug!(dropped = %d.name, "Excluded detection removed");
            }
            keep
        });
        detections
    }
}
