//! Detection against the checked-in fixture projects

use stackprobe::stack::{PackageManagerId, ProjectType, TechId};
use stackprobe::{detect, StackResult};
use std::path::PathBuf;
use yare::parameterized;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run_detection(name: &str) -> StackResult {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");
    runtime.block_on(detect(fixture_path(name)))
}

#[parameterized(
    node_express_api = { "node-express-api", ProjectType::BackendApi, "express" },
    react_vite_app = { "react-vite-app", ProjectType::FrontendApplication, "react" },
    django_service = { "django-service", ProjectType::BackendApi, "django" },
    go_gin_service = { "go-gin-service", ProjectType::Unknown, "" },
)]
fn test_project_type(fixture: &str, expected: ProjectType, primary: &str) {
    let result = run_detection(fixture);
    assert_eq!(result.project_type, expected);
    assert_eq!(result.primary, primary);
}

#[parameterized(
    node_express_api = { "node-express-api", &[TechId::JavaScript], &[TechId::Express] },
    react_vite_app = { "react-vite-app", &[TechId::TypeScript], &[TechId::React] },
    django_service = { "django-service", &[TechId::Python], &[TechId::Django] },
    go_gin_service = { "go-gin-service", &[TechId::Go], &[TechId::Gin] },
)]
fn test_languages_and_frameworks(fixture: &str, languages: &[TechId], frameworks: &[TechId]) {
    let result = run_detection(fixture);
    assert_eq!(result.languages, languages);
    assert_eq!(result.frameworks, frameworks);
}

#[parameterized(
    node_express_api = { "node-express-api", &[TechId::PostgreSql], &[TechId::Jest], &[] },
    react_vite_app = { "react-vite-app", &[], &[TechId::Vitest], &[TechId::Vite] },
    django_service = { "django-service", &[TechId::PostgreSql], &[TechId::Pytest], &[] },
    go_gin_service = { "go-gin-service", &[TechId::Redis], &[], &[TechId::Make] },
)]
fn test_supporting_technologies(
    fixture: &str,
    databases: &[TechId],
    test_frameworks: &[TechId],
    build_tools: &[TechId],
) {
    let result = run_detection(fixture);
    assert_eq!(result.databases, databases);
    assert_eq!(result.test_frameworks, test_frameworks);
    assert_eq!(result.build_tools, build_tools);
}

#[parameterized(
    node_express_api = { "node-express-api", &[PackageManagerId::Npm] },
    react_vite_app = { "react-vite-app", &[PackageManagerId::Yarn] },
    django_service = { "django-service", &[PackageManagerId::Pip] },
    go_gin_service = { "go-gin-service", &[PackageManagerId::Go] },
)]
fn test_package_managers(fixture: &str, expected: &[PackageManagerId]) {
    let result = run_detection(fixture);
    assert_eq!(result.package_managers, expected);
}

#[test]
fn test_dockerfile_is_deployment_evidence() {
    let result = run_detection("node-express-api");
    assert_eq!(result.deployment, vec![TechId::Docker]);

    let docker = &result.detections.deployment[0];
    assert_eq!(docker.confidence, 1.0);
    assert_eq!(docker.evidence.config_files, vec!["Dockerfile".to_string()]);
}

#[test]
fn test_config_file_evidence_below_dependency_tier() {
    let result = run_detection("django-service");
    let pytest = &result.detections.test_frameworks[0];

    assert_eq!(pytest.name, TechId::Pytest);
    assert_eq!(pytest.confidence, 0.95);
    assert!(pytest.evidence.related_packages.contains(&"pytest-django".to_string()));
}

#[test]
fn test_patterns_union_is_ordered_by_category() {
    let result = run_detection("go-gin-service");
    assert_eq!(
        result.patterns,
        vec![TechId::Go, TechId::Gin, TechId::Redis, TechId::Make]
    );
}
