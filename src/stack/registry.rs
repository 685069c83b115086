use super::catalog;
use super::{Category, DetectorSpec, TechId};
use std::collections::HashMap;

/// Immutable table of detector specs, built once and shared by reference
#[derive(Debug, Clone)]
pub struct DetectorRegistry {
    specs: Vec<DetectorSpec>,
    index: HashMap<TechId, usize>,
}

impl DetectorRegistry {
    pub fn new(specs: Vec<DetectorSpec>) -> Self {
        let mut index = HashMap::new();
        for (position, spec) in specs.iter().enumerate() {
            index.entry(spec.id).or_insert(position);
        }
        Self { specs, index }
    }

    pub fn with_defaults() -> Self {
        let specs = Category::ALL
            .iter()
            .flat_map(|category| catalog::specs_for(*category).iter().copied())
            .collect();
        Self::new(specs)
    }

    /// Specs of one category, in declaration order
    pub fn specs(&self, category: Category) -> Vec<&DetectorSpec> {
        self.specs
            .iter()
            .filter(|spec| spec.category == category)
            .collect()
    }

    pub fn get(&self, id: TechId) -> Option<&DetectorSpec> {
        self.index.get(&id).map(|position| &self.specs[*position])
    }

    pub fn all(&self) -> &[DetectorSpec] {
        &self.specs
    }

    /// Declaration position of `id`; unknown ids sort last.
    pub fn position(&self, id: TechId) -> usize {
        self.index.get(&id).copied().unwrap_or(usize::MAX)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Requirements;

    #[test]
    fn test_registry_with_defaults() {
        let registry = DetectorRegistry::with_defaults();

        assert_eq!(registry.len(), TechId::all_variants().len());
        assert_eq!(registry.specs(Category::Language).len(), 12);
        assert_eq!(registry.specs(Category::Deployment).len(), 8);
    }

    #[test]
    fn test_specs_keep_declaration_order() {
        let registry = DetectorRegistry::with_defaults();
        let languages: Vec<_> = registry
            .specs(Category::Language)
            .iter()
            .map(|s| s.id)
            .collect();

        assert_eq!(languages[0], TechId::JavaScript);
        assert_eq!(languages[1], TechId::TypeScript);
        assert!(registry.position(TechId::JavaScript) < registry.position(TechId::Python));
    }

    #[test]
    fn test_get_by_id() {
        let registry = DetectorRegistry::with_defaults();

        let redis = registry.get(TechId::Redis).unwrap();
        assert_eq!(redis.category, Category::Database);
        assert!(redis.requirements.docker_services.contains(&"redis"));
    }

    #[test]
    fn test_custom_registry() {
        let registry = DetectorRegistry::new(vec![DetectorSpec::new(
            Category::Database,
            TechId::Sqlite,
            Requirements::EMPTY,
        )]);

        assert_eq!(registry.len(), 1);
        assert!(registry.get(TechId::Redis).is_none());
        assert_eq!(registry.position(TechId::Redis), usize::MAX);
        assert!(registry.specs(Category::Language).is_empty());
    }
}
