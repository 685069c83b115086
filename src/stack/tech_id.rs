crate::define_id_enum! {
    /// Canonical technology identifier shared by every detector category
    TechId {
        // Languages
        JavaScript => "javascript" : "JavaScript",
        TypeScript => "typescript" : "TypeScript",
        Python => "python" : "Python",
        Rust => "rust" : "Rust",
        Go => "go" : "Go",
        Java => "java" : "Java",
        Kotlin => "kotlin" : "Kotlin",
        Ruby => "ruby" : "Ruby",
        Php => "php" : "PHP",
        CSharp => "csharp" : "C#",
        Swift => "swift" : "Swift",
        Elixir => "elixir" : "Elixir",

        // Frontend frameworks
        React => "react" : "React",
        NextJs => "nextjs" : "Next.js",
        Vue => "vue" : "Vue",
        Nuxt => "nuxt" : "Nuxt",
        Angular => "angular" : "Angular",
        Svelte => "svelte" : "Svelte",

        // Backend frameworks
        Express => "express" : "Express",
        Fastify => "fastify" : "Fastify",
        Koa => "koa" : "Koa",
        NestJs => "nestjs" : "NestJS",
        Django => "django" : "Django",
        Flask => "flask" : "Flask",
        FastApi => "fastapi" : "FastAPI",
        Rails => "rails" : "Rails",
        Sinatra => "sinatra" : "Sinatra",
        SpringBoot => "spring-boot" : "Spring Boot",
        Gin => "gin" : "Gin",
        Echo => "echo" : "Echo",
        ActixWeb => "actix-web" : "Actix Web",
        Axum => "axum" : "Axum",
        Laravel => "laravel" : "Laravel",

        // Databases
        PostgreSql => "postgresql" : "PostgreSQL",
        MySql => "mysql" : "MySQL",
        MongoDb => "mongodb" : "MongoDB",
        Redis => "redis" : "Redis",
        Sqlite => "sqlite" : "SQLite",
        Elasticsearch => "elasticsearch" : "Elasticsearch",

        // Test frameworks
        Jest => "jest" : "Jest",
        Vitest => "vitest" : "Vitest",
        Mocha => "mocha" : "Mocha",
        Cypress => "cypress" : "Cypress",
        Playwright => "playwright" : "Playwright",
        Pytest => "pytest" : "pytest",
        Rspec => "rspec" : "RSpec",

        // Build tools
        Webpack => "webpack" : "webpack",
        Vite => "vite" : "Vite",
        Rollup => "rollup" : "Rollup",
        Esbuild => "esbuild" : "esbuild",
        Parcel => "parcel" : "Parcel",
        Make => "make" : "Make",
        Gradle => "gradle" : "Gradle",
        Maven => "maven" : "Maven",

        // Deployment targets
        Docker => "docker" : "Docker",
        Kubernetes => "kubernetes" : "Kubernetes",
        Vercel => "vercel" : "Vercel",
        Netlify => "netlify" : "Netlify",
        Heroku => "heroku" : "Heroku",
        Fly => "fly" : "Fly.io",
        Serverless => "serverless" : "Serverless Framework",
        Terraform => "terraform" : "Terraform",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tech_id_serialization() {
        assert_eq!(
            serde_json::to_string(&TechId::SpringBoot).unwrap(),
            "\"spring-boot\""
        );
        assert_eq!(serde_json::to_string(&TechId::NextJs).unwrap(), "\"nextjs\"");
    }

    #[test]
    fn test_tech_id_deserialization() {
        let id: TechId = serde_json::from_str("\"postgresql\"").unwrap();
        assert_eq!(id, TechId::PostgreSql);
        assert!(serde_json::from_str::<TechId>("\"cobol\"").is_err());
    }

    #[test]
    fn test_from_name_accepts_both_forms() {
        assert_eq!(TechId::from_name("actix-web"), Some(TechId::ActixWeb));
        assert_eq!(TechId::from_name("Actix Web"), Some(TechId::ActixWeb));
        assert_eq!(TechId::from_name("unknown"), None);
    }

    #[test]
    fn test_canonical_names_are_lowercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for id in TechId::all_variants() {
            let name = id.as_str();
            assert_eq!(name, name.to_lowercase());
            assert!(seen.insert(name), "duplicate identifier {}", name);
        }
    }
}
