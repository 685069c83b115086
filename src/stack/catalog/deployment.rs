use crate::stack::{Category, ContentScan, DetectorSpec, Requirements, TechId};

const fn deployment(id: TechId, requirements: Requirements) -> DetectorSpec {
    DetectorSpec::new(Category::Deployment, id, requirements)
}

pub const DEPLOYMENT_TARGETS: &[DetectorSpec] = &[
    deployment(
        TechId::Docker,
        Requirements {
            file_patterns: &["Dockerfile", "Dockerfile.*", "*.Dockerfile"],
            config_files: &[
                "Dockerfile",
                "docker-compose.yml",
                "docker-compose.yaml",
                "compose.yml",
                "compose.yaml",
            ],
            ..Requirements::EMPTY
        },
    ),
    deployment(
        TechId::Kubernetes,
        Requirements {
            config_files: &["skaffold.yaml", "kustomization.yaml", "kustomization.yml", "Chart.yaml"],
            directories: &["k8s", "kubernetes", "helm", "charts", "deploy/k8s"],
            content: Some(ContentScan {
                files: &["k8s/*.yaml", "k8s/*.yml", "kubernetes/*.yaml", "deploy/*.yaml", "*.k8s.yaml"],
                patterns: &[r"(?m)^apiVersion:\s*apps/v1", r"(?m)^kind:\s*(?:Deployment|StatefulSet|Service)\b"],
            }),
            ..Requirements::EMPTY
        },
    ),
    deployment(
        TechId::Vercel,
        Requirements {
            dependencies: &["vercel", "@vercel/node"],
            config_files: &["vercel.json"],
            directories: &[".vercel"],
            related_packages: &["@vercel/analytics", "@vercel/og"],
            ..Requirements::EMPTY
        },
    ),
    deployment(
        TechId::Netlify,
        Requirements {
            dependencies: &["netlify-cli", "@netlify/functions"],
            config_files: &["netlify.toml"],
            directories: &[".netlify", "netlify/functions"],
            related_packages: &["@netlify/plugin-nextjs"],
            ..Requirements::EMPTY
        },
    ),
    deployment(
        TechId::Heroku,
        Requirements {
            config_files: &["Procfile", "heroku.yml"],
            ..Requirements::EMPTY
        },
    ),
    deployment(
        TechId::Fly,
        Requirements {
            config_files: &["fly.toml"],
            directories: &[".fly"],
            ..Requirements::EMPTY
        },
    ),
    deployment(
        TechId::Serverless,
        Requirements {
            dependencies: &["serverless"],
            config_files: &["serverless.yml", "serverless.yaml", "serverless.ts"],
            directories: &[".serverless"],
            related_packages: &["serverless-offline", "serverless-webpack", "serverless-http"],
            ..Requirements::EMPTY
        },
    ),
    deployment(
        TechId::Terraform,
        Requirements {
            file_patterns: &["*.tf"],
            config_files: &["main.tf", "terraform.tfvars", ".terraform.lock.hcl"],
            directories: &["terraform", ".terraform"],
            ..Requirements::EMPTY
        },
    ),
];
