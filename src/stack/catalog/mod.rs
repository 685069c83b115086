//! Built-in detector tables, one per category, in declaration order

mod backend;
mod build_tools;
mod databases;
mod deployment;
mod frontend;
mod languages;
mod testing;

pub use backend::BACKEND_FRAMEWORKS;
pub use build_tools::BUILD_TOOLS;
pub use databases::DATABASES;
pub use deployment::DEPLOYMENT_TARGETS;
pub use frontend::FRONTEND_FRAMEWORKS;
pub use languages::LANGUAGES;
pub use testing::TEST_FRAMEWORKS;

use super::{Category, DetectorSpec};

/// The built-in table for `category`
pub fn specs_for(category: Category) -> &'static [DetectorSpec] {
    match category {
        Category::Language => LANGUAGES,
        Category::FrontendFramework => FRONTEND_FRAMEWORKS,
        Category::BackendFramework => BACKEND_FRAMEWORKS,
        Category::Database => DATABASES,
        Category::TestFramework => TEST_FRAMEWORKS,
        Category::BuildTool => BUILD_TOOLS,
        Category::Deployment => DEPLOYMENT_TARGETS,
    }
}
