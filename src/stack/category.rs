use serde::{Deserialize, Serialize};
use std::fmt;

/// Detector category. Each category owns its own table of detector specs and
/// its own conflict set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Language,
    FrontendFramework,
    BackendFramework,
    Database,
    TestFramework,
    BuildTool,
    Deployment,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Language,
        Category::FrontendFramework,
        Category::BackendFramework,
        Category::Database,
        Category::TestFramework,
        Category::BuildTool,
        Category::Deployment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Language => "language",
            Category::FrontendFramework => "frontend-framework",
            Category::BackendFramework => "backend-framework",
            Category::Database => "database",
            Category::TestFramework => "test-framework",
            Category::BuildTool => "build-tool",
            Category::Deployment => "deployment",
        }
    }

    /// Categories that only run when the project type allows them.
    pub fn is_gated(&self) -> bool {
        matches!(
            self,
            Category::FrontendFramework | Category::BackendFramework
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_framework_categories_are_gated() {
        let gated: Vec<_> = Category::ALL.iter().filter(|c| c.is_gated()).collect();
        assert_eq!(
            gated,
            vec![&Category::FrontendFramework, &Category::BackendFramework]
        );
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&Category::TestFramework).unwrap(),
            "\"test-framework\""
        );
        for category in Category::ALL {
            assert_eq!(
                serde_json::to_string(&category).unwrap(),
                format!("\"{}\"", category.as_str())
            );
        }
    }
}
