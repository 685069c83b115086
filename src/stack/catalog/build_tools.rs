use crate::stack::{Category, ContentScan, DetectorSpec, Requirements, TechId};

const fn build_tool(id: TechId, requirements: Requirements) -> DetectorSpec {
    DetectorSpec::new(Category::BuildTool, id, requirements)
}

pub const BUILD_TOOLS: &[DetectorSpec] = &[
    build_tool(
        TechId::Webpack,
        Requirements {
            dependencies: &["webpack"],
            config_files: &["webpack.config.js", "webpack.config.ts", "webpack.config.cjs"],
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Vite, TechId::Parcel]),
    build_tool(
        TechId::Vite,
        Requirements {
            dependencies: &["vite"],
            config_files: &["vite.config.js", "vite.config.ts", "vite.config.mjs", "vite.config.mts"],
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Webpack, TechId::Parcel]),
    build_tool(
        TechId::Rollup,
        Requirements {
            dependencies: &["rollup"],
            config_files: &["rollup.config.js", "rollup.config.mjs", "rollup.config.ts"],
            ..Requirements::EMPTY
        },
    ),
    build_tool(
        TechId::Esbuild,
        Requirements {
            dependencies: &["esbuild"],
            config_files: &["esbuild.config.js", "esbuild.config.mjs"],
            content: Some(ContentScan {
                files: &["build.js", "build.mjs", "scripts/*.js", "scripts/*.mjs"],
                patterns: &[r#"require\(['"]esbuild['"]\)"#, r#"from\s+['"]esbuild['"]"#],
            }),
            ..Requirements::EMPTY
        },
    ),
    build_tool(
        TechId::Parcel,
        Requirements {
            dependencies: &["parcel", "parcel-bundler"],
            config_files: &[".parcelrc"],
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Webpack, TechId::Vite]),
    build_tool(
        TechId::Make,
        Requirements {
            file_patterns: &["*.mk"],
            config_files: &["Makefile", "makefile", "GNUmakefile"],
            ..Requirements::EMPTY
        },
    ),
    build_tool(
        TechId::Gradle,
        Requirements {
            file_patterns: &["*.gradle", "*.gradle.kts"],
            config_files: &[
                "build.gradle",
                "build.gradle.kts",
                "settings.gradle",
                "settings.gradle.kts",
                "gradlew",
            ],
            directories: &["gradle/wrapper"],
            ..Requirements::EMPTY
        },
    ),
    build_tool(
        TechId::Maven,
        Requirements {
            config_files: &["pom.xml", "mvnw"],
            directories: &[".mvn"],
            ..Requirements::EMPTY
        },
    ),
];
