//! Scoring functions
//!
//! Each function is a priority-ordered decision tree over one evidence bag:
//! the first branch that matches decides the score. Signals are never
//! summed, so many weak hints cannot add up to a strong detection.
//!
//! Functions are looked up by [`TechId`] through [`scorer_for`]; the spec
//! tables never carry code.

use super::TechId;
use crate::evidence::Evidence;

pub type ScoreFn = fn(&Evidence) -> f64;

/// Source-file count from which file matches alone count as a language
const LANGUAGE_FILE_QUORUM: usize = 5;

/// Clamps into `[0, 1]`; NaN scores as 0.
pub fn clamp(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

pub fn scorer_for(id: TechId) -> ScoreFn {
    use TechId::*;

    match id {
        JavaScript => score_javascript,
        TypeScript => score_typescript,
        Python | Rust | Go | Java | Kotlin | Ruby | Php | CSharp | Swift | Elixir => {
            score_language
        }

        React | NextJs | Vue | Nuxt | Angular | Svelte => score_frontend,

        Express | Fastify | Koa | NestJs | Django | Flask | FastApi | Rails | Sinatra
        | SpringBoot | Gin | Echo | ActixWeb | Axum | Laravel => score_backend,

        PostgreSql | MySql | MongoDb | Redis | Sqlite | Elasticsearch => score_database,

        Jest | Vitest | Mocha | Cypress | Playwright | Pytest | Rspec => score_test_framework,

        Webpack | Vite | Rollup | Esbuild | Parcel => score_js_build_tool,

        Make | Gradle | Maven | Docker | Kubernetes | Vercel | Netlify | Heroku | Fly
        | Serverless | Terraform => score_config_canonical,
    }
}

/// Runs the scorer registered for `id` and clamps the result
pub fn score(id: TechId, evidence: &Evidence) -> f64 {
    clamp(scorer_for(id)(evidence))
}

fn score_language_files(evidence: &Evidence) -> f64 {
    if evidence.files.len() >= LANGUAGE_FILE_QUORUM {
        0.7
    } else if evidence.has_files() {
        0.4
    } else {
        0.0
    }
}

pub fn score_language(evidence: &Evidence) -> f64 {
    if evidence.has_config() && evidence.has_files() {
        1.0
    } else if evidence.has_config() {
        0.9
    } else if evidence.has_content() {
        0.8
    } else {
        score_language_files(evidence)
    }
}

/// A bare `package.json` does not prove JavaScript sources.
pub fn score_javascript(evidence: &Evidence) -> f64 {
    if evidence.has_config() && evidence.has_files() {
        1.0
    } else if evidence.has_config() {
        0.6
    } else {
        score_language_files(evidence)
    }
}

pub fn score_typescript(evidence: &Evidence) -> f64 {
    if evidence.has_dependency() || evidence.has_config() {
        1.0
    } else {
        score_language_files(evidence)
    }
}

fn score_framework(evidence: &Evidence) -> f64 {
    if evidence.has_dependency() {
        1.0
    } else if evidence.has_config() {
        0.95
    } else if evidence.has_related() {
        0.85
    } else if evidence.has_content() {
        0.8
    } else if evidence.has_files() {
        0.5
    } else {
        0.0
    }
}

pub fn score_frontend(evidence: &Evidence) -> f64 {
    if evidence.is_backend_only {
        return 0.0;
    }
    score_framework(evidence)
}

pub fn score_backend(evidence: &Evidence) -> f64 {
    if evidence.is_frontend_only {
        return 0.0;
    }
    score_framework(evidence)
}

pub fn score_database(evidence: &Evidence) -> f64 {
    if evidence.has_dependency() {
        1.0
    } else if evidence.has_related() {
        0.9
    } else if evidence.has_content() {
        0.8
    } else if evidence.has_docker_service() {
        0.75
    } else if evidence.has_env_var() {
        0.7
    } else if evidence.has_files() {
        0.6
    } else {
        0.0
    }
}

pub fn score_test_framework(evidence: &Evidence) -> f64 {
    score_framework(evidence)
}

pub fn score_js_build_tool(evidence: &Evidence) -> f64 {
    if evidence.has_dependency() {
        1.0
    } else if evidence.has_config() {
        0.95
    } else if evidence.has_content() {
        0.8
    } else if evidence.has_files() {
        0.5
    } else {
        0.0
    }
}

/// Tools proven by their own configuration file rather than a dependency
pub fn score_config_canonical(evidence: &Evidence) -> f64 {
    if evidence.has_config() {
        1.0
    } else if evidence.has_dependency() || evidence.has_directory() {
        0.9
    } else if evidence.has_related() {
        0.85
    } else if evidence.has_content() {
        0.8
    } else if evidence.has_files() {
        0.5
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn with_dependency() -> Evidence {
        Evidence {
            dependencies: strings(&["pkg"]),
            ..Default::default()
        }
    }

    fn full_evidence(backend_only: bool, frontend_only: bool) -> Evidence {
        Evidence {
            files: strings(&["a", "b", "c", "d", "e", "f"]),
            config_files: strings(&["cfg"]),
            dependencies: strings(&["dep"]),
            related_packages: strings(&["rel"]),
            docker_services: strings(&["svc"]),
            env_vars: strings(&["VAR"]),
            content_matches: strings(&["pattern"]),
            directories: strings(&["dir"]),
            is_backend_only: backend_only,
            is_frontend_only: frontend_only,
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(f64::NAN), 0.0);
        assert_eq!(clamp(-0.5), 0.0);
        assert_eq!(clamp(1.7), 1.0);
        assert_eq!(clamp(0.85), 0.85);
        assert_eq!(clamp(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_every_scorer_stays_in_unit_interval() {
        let bags = [
            Evidence::default(),
            full_evidence(false, false),
            full_evidence(true, false),
            full_evidence(false, true),
            with_dependency(),
        ];
        for id in TechId::all_variants() {
            for bag in &bags {
                let s = score(*id, bag);
                assert!((0.0..=1.0).contains(&s), "{} scored {}", id, s);
            }
        }
    }

    #[test]
    fn test_empty_evidence_scores_zero() {
        for id in TechId::all_variants() {
            assert_eq!(score(*id, &Evidence::default()), 0.0, "{}", id);
        }
    }

    fn is_config_canonical(id: TechId) -> bool {
        use TechId::*;
        matches!(
            id,
            Make | Gradle | Maven | Docker | Kubernetes | Vercel | Netlify | Heroku | Fly
                | Serverless | Terraform
        )
    }

    #[test]
    fn test_canonical_dependency_scores_one() {
        let registry = crate::stack::DetectorRegistry::with_defaults();
        for spec in registry.all() {
            if spec.requirements.dependencies.is_empty() || is_config_canonical(spec.id) {
                continue;
            }
            assert_eq!(score(spec.id, &with_dependency()), 1.0, "{}", spec.id);
        }
    }

    #[parameterized(
        config_and_sources = { &["main.py"], &["pyproject.toml"], &[], 1.0 },
        config_alone = { &[], &["pyproject.toml"], &[], 0.9 },
        content = { &[], &[], &["shebang"], 0.8 },
        five_files = { &["a.py", "b.py", "c.py", "d.py", "e.py"], &[], &[], 0.7 },
        four_files = { &["a.py", "b.py", "c.py", "d.py"], &[], &[], 0.4 },
        nothing = { &[], &[], &[], 0.0 },
    )]
    fn test_language_tiers(files: &[&str], config: &[&str], content: &[&str], expected: f64) {
        let evidence = Evidence {
            files: strings(files),
            config_files: strings(config),
            content_matches: strings(content),
            ..Default::default()
        };
        assert_eq!(score_language(&evidence), expected);
    }

    #[test]
    fn test_javascript_needs_sources() {
        let bare_manifest = Evidence {
            config_files: strings(&["package.json"]),
            ..Default::default()
        };
        assert_eq!(score_javascript(&bare_manifest), 0.6);

        let with_sources = Evidence {
            files: strings(&["index.js"]),
            ..bare_manifest
        };
        assert_eq!(score_javascript(&with_sources), 1.0);
    }

    #[test]
    fn test_typescript_canonical_signals() {
        let tsconfig = Evidence {
            config_files: strings(&["tsconfig.json"]),
            ..Default::default()
        };
        assert_eq!(score_typescript(&tsconfig), 1.0);
        assert_eq!(score_typescript(&with_dependency()), 1.0);
    }

    #[parameterized(
        dependency = { "dependency", 1.0 },
        config = { "config", 0.95 },
        related = { "related", 0.85 },
        content = { "content", 0.8 },
        files = { "files", 0.5 },
    )]
    fn test_framework_tiers(signal: &str, expected: f64) {
        let mut evidence = Evidence::default();
        match signal {
            "dependency" => evidence.dependencies = strings(&["x"]),
            "config" => evidence.config_files = strings(&["x"]),
            "related" => evidence.related_packages = strings(&["x"]),
            "content" => evidence.content_matches = strings(&["x"]),
            _ => evidence.files = strings(&["x"]),
        }
        assert_eq!(score_frontend(&evidence), expected);
        assert_eq!(score_backend(&evidence), expected);
        assert_eq!(score_test_framework(&evidence), expected);
    }

    #[test]
    fn test_gates_zero_the_opposite_half() {
        assert_eq!(score_frontend(&full_evidence(true, false)), 0.0);
        assert_eq!(score_backend(&full_evidence(false, true)), 0.0);
        assert_eq!(score_frontend(&full_evidence(false, true)), 1.0);
        assert_eq!(score_backend(&full_evidence(true, false)), 1.0);
    }

    #[parameterized(
        related = { "related", 0.9 },
        content = { "content", 0.8 },
        docker = { "docker", 0.75 },
        env = { "env", 0.7 },
        files = { "files", 0.6 },
    )]
    fn test_database_tiers(signal: &str, expected: f64) {
        let mut evidence = Evidence::default();
        match signal {
            "related" => evidence.related_packages = strings(&["x"]),
            "content" => evidence.content_matches = strings(&["x"]),
            "docker" => evidence.docker_services = strings(&["redis"]),
            "env" => evidence.env_vars = strings(&["REDIS_"]),
            _ => evidence.files = strings(&["data.db"]),
        }
        assert_eq!(score_database(&evidence), expected);
    }

    #[test]
    fn test_config_canonical_tiers() {
        let config = Evidence {
            config_files: strings(&["Makefile"]),
            ..Default::default()
        };
        assert_eq!(score_config_canonical(&config), 1.0);

        let directory = Evidence {
            directories: strings(&["k8s"]),
            ..Default::default()
        };
        assert_eq!(score_config_canonical(&directory), 0.9);
        assert_eq!(score_config_canonical(&with_dependency()), 0.9);

        let files = Evidence {
            files: strings(&["infra.tf"]),
            ..Default::default()
        };
        assert_eq!(score_config_canonical(&files), 0.5);
    }

    #[test]
    fn test_js_build_tool_has_no_related_tier() {
        let related = Evidence {
            related_packages: strings(&["webpack-cli"]),
            ..Default::default()
        };
        assert_eq!(score_js_build_tool(&related), 0.0);
    }
}
