//! Compose file scanning
//!
//! Detectors only need a yes/no answer per known service name, so the
//! default scanner works on raw text. A structured YAML scanner can replace
//! it behind [`ComposeScanner`] without touching any detector.

/// Answers service-level questions about a compose file's text
pub trait ComposeScanner: Send + Sync {
    /// Names from `services` that the compose text declares or references
    fn find_services(&self, content: &str, services: &[&str]) -> Vec<String>;

    /// Number of services built from local sources (`build:` entries)
    fn count_build_services(&self, content: &str) -> usize;
}

/// Degraded-mode scanner: substring search for `"<service>:"` or
/// `"image: <service>"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringComposeScanner;

impl ComposeScanner for SubstringComposeScanner {
    fn find_services(&self, content: &str, services: &[&str]) -> Vec<String> {
        services
            .iter()
            .filter(|service| {
                content.contains(&format!("{}:", service))
                    || content.contains(&format!("image: {}", service))
            })
            .map(|service| service.to_string())
            .collect()
    }

    fn count_build_services(&self, content: &str) -> usize {
        content
            .lines()
            .filter(|line| line.trim_start().starts_with("build:"))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPOSE: &str = r#"
services:
  api:
    build: ./api
  worker:
    build:
      context: ./worker
  cache:
    image: redis:7-alpine
  db:
    image: postgres:16
"#;

    #[test]
    fn test_find_services_by_key_or_image() {
        let found = SubstringComposeScanner.find_services(COMPOSE, &["redis", "postgres", "mongo"]);
        assert_eq!(found, vec!["redis".to_string(), "postgres".to_string()]);
    }

    #[test]
    fn test_find_services_by_service_key() {
        let content = "services:\n  redis:\n    image: bitnami/cache\n";
        let found = SubstringComposeScanner.find_services(content, &["redis"]);
        assert_eq!(found, vec!["redis".to_string()]);
    }

    #[test]
    fn test_count_build_services() {
        assert_eq!(SubstringComposeScanner.count_build_services(COMPOSE), 2);
        assert_eq!(SubstringComposeScanner.count_build_services("services: {}"), 0);
    }
}
