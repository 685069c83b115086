//! Final result assembly

use super::{
    Architecture, Category, Detection, PackageManagerId, ProjectType, ProjectTypeScore, TechId,
};
use serde::Serialize;

/// Accepted, conflict-free detections per category, ranked
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetections {
    pub languages: Vec<Detection>,
    pub frontend_frameworks: Vec<Detection>,
    pub backend_frameworks: Vec<Detection>,
    pub databases: Vec<Detection>,
    pub test_frameworks: Vec<Detection>,
    pub build_tools: Vec<Detection>,
    pub deployment: Vec<Detection>,
}

impl CategoryDetections {
    pub fn get(&self, category: Category) -> &[Detection] {
        match category {
            Category::Language => &self.languages,
            Category::FrontendFramework => &self.frontend_frameworks,
            Category::BackendFramework => &self.backend_frameworks,
            Category::Database => &self.databases,
            Category::TestFramework => &self.test_frameworks,
            Category::BuildTool => &self.build_tools,
            Category::Deployment => &self.deployment,
        }
    }

    pub fn set(&mut self, category: Category, detections: Vec<Detection>) {
        let slot = match category {
            Category::Language => &mut self.languages,
            Category::FrontendFramework => &mut self.frontend_frameworks,
            Category::BackendFramework => &mut self.backend_frameworks,
            Category::Database => &mut self.databases,
            Category::TestFramework => &mut self.test_frameworks,
            Category::BuildTool => &mut self.build_tools,
            Category::Deployment => &mut self.deployment,
        };
        *slot = detections;
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }
}

/// Everything known about a project's stack
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackResult {
    pub languages: Vec<TechId>,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub primary: String,
    pub frameworks: Vec<TechId>,
    pub databases: Vec<TechId>,
    pub test_frameworks: Vec<TechId>,
    pub build_tools: Vec<TechId>,
    pub deployment: Vec<TechId>,
    /// Union of every list above, first occurrence wins
    pub patterns: Vec<TechId>,
    pub architecture: Architecture,
    pub package_managers: Vec<PackageManagerId>,
    pub is_backend_only: bool,
    pub is_frontend_only: bool,
    pub detections: CategoryDetections,
}

impl StackResult {
    /// The well-formed result returned when detection fails
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.package_managers.is_empty()
    }

    pub fn contains(&self, id: TechId) -> bool {
        self.patterns.contains(&id)
    }
}

fn names(detections: &[Detection]) -> Vec<TechId> {
    detections.iter().map(|d| d.name).collect()
}

pub struct StackAssembler;

impl StackAssembler {
    pub fn assemble(
        project: &ProjectTypeScore,
        detections: CategoryDetections,
        architecture: Architecture,
        package_managers: Vec<PackageManagerId>,
    ) -> StackResult {
        let languages = names(&detections.languages);
        let frameworks: Vec<TechId> = detections
            .frontend_frameworks
            .iter()
            .chain(&detections.backend_frameworks)
            .map(|d| d.name)
            .collect();
        let databases = names(&detections.databases);
        let test_frameworks = names(&detections.test_frameworks);
        let build_tools = names(&detections.build_tools);
        let deployment = names(&detections.deployment);

        let mut patterns: Vec<TechId> = Vec::new();
        for id in languages
            .iter()
            .chain(&frameworks)
            .chain(&databases)
            .chain(&test_frameworks)
            .chain(&build_tools)
            .chain(&deployment)
        {
            if !patterns.contains(id) {
                patterns.push(*id);
            }
        }

        StackResult {
            languages,
            project_type: project.project_type,
            primary: project.primary.clone(),
            frameworks,
            databases,
            test_frameworks,
            build_tools,
            deployment,
            patterns,
            architecture,
            package_managers,
            is_backend_only: project.is_backend_only(),
            is_frontend_only: project.is_frontend_only(),
            detections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::Evidence;
    use crate::stack::project_type::Indicators;

    fn detection(name: TechId, confidence: f64) -> Detection {
        Detection::new(name, confidence, Evidence::default())
    }

    #[test]
    fn test_empty_result_shape() {
        let json = serde_json::to_value(StackResult::empty()).unwrap();

        assert_eq!(json["type"], "unknown");
        assert_eq!(json["primary"], "");
        assert_eq!(json["languages"], serde_json::json!([]));
        assert_eq!(json["testFrameworks"], serde_json::json!([]));
        assert_eq!(json["architecture"]["type"], "standard");
        assert_eq!(json["isBackendOnly"], false);
        assert!(StackResult::empty().is_empty());
    }

    #[test]
    fn test_assemble_concatenates_frameworks_and_builds_patterns() {
        let mut detections = CategoryDetections::default();
        detections.set(Category::Language, vec![detection(TechId::TypeScript, 1.0)]);
        detections.set(Category::FrontendFramework, vec![detection(TechId::React, 1.0)]);
        detections.set(Category::BackendFramework, vec![detection(TechId::Express, 0.85)]);
        detections.set(Category::Database, vec![detection(TechId::Redis, 0.75)]);
        detections.set(Category::BuildTool, vec![detection(TechId::Vite, 1.0)]);

        let project = ProjectTypeScore::derive(
            Indicators {
                backend_only: 2,
                frontend_only: 2,
                ..Indicators::default()
            },
            &Default::default(),
        );

        let result = StackAssembler::assemble(
            &project,
            detections,
            Architecture::default(),
            vec![PackageManagerId::Pnpm],
        );

        assert_eq!(result.frameworks, vec![TechId::React, TechId::Express]);
        assert_eq!(
            result.patterns,
            vec![
                TechId::TypeScript,
                TechId::React,
                TechId::Express,
                TechId::Redis,
                TechId::Vite
            ]
        );
        assert_eq!(result.project_type, ProjectType::FullStackApplication);
        assert!(!result.is_backend_only && !result.is_frontend_only);
        assert_eq!(result.detections.total(), 5);
        assert!(result.contains(TechId::Redis));
    }
}
