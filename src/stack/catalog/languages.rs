use crate::stack::{Category, DetectorSpec, Requirements, TechId};

const fn language(id: TechId, requirements: Requirements) -> DetectorSpec {
    DetectorSpec::new(Category::Language, id, requirements)
}

pub const LANGUAGES: &[DetectorSpec] = &[
    language(
        TechId::JavaScript,
        Requirements {
            file_patterns: &["*.js", "*.mjs", "*.cjs", "*.jsx"],
            config_files: &["package.json"],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::TypeScript,
        Requirements {
            file_patterns: &["*.ts", "*.tsx", "*.mts"],
            dependencies: &["typescript"],
            config_files: &["tsconfig.json"],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::Python,
        Requirements {
            file_patterns: &["*.py"],
            config_files: &[
                "pyproject.toml",
                "requirements.txt",
                "setup.py",
                "setup.cfg",
                "Pipfile",
            ],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::Rust,
        Requirements {
            file_patterns: &["*.rs"],
            config_files: &["Cargo.toml"],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::Go,
        Requirements {
            file_patterns: &["*.go"],
            config_files: &["go.mod"],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::Java,
        Requirements {
            file_patterns: &["*.java"],
            config_files: &["pom.xml", "build.gradle"],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::Kotlin,
        Requirements {
            file_patterns: &["*.kt"],
            config_files: &["build.gradle.kts"],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::Ruby,
        Requirements {
            file_patterns: &["*.rb"],
            config_files: &["Gemfile", ".ruby-version"],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::Php,
        Requirements {
            file_patterns: &["*.php"],
            config_files: &["composer.json"],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::CSharp,
        Requirements {
            file_patterns: &["*.cs"],
            config_files: &["*.csproj", "*.sln"],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::Swift,
        Requirements {
            file_patterns: &["*.swift"],
            config_files: &["Package.swift"],
            ..Requirements::EMPTY
        },
    ),
    language(
        TechId::Elixir,
        Requirements {
            file_patterns: &["*.ex", "*.exs"],
            config_files: &["mix.exs"],
            ..Requirements::EMPTY
        },
    ),
];
