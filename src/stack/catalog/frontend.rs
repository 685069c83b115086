use crate::stack::{Category, ContentScan, DetectorSpec, Requirements, TechId};

const fn frontend(id: TechId, requirements: Requirements) -> DetectorSpec {
    DetectorSpec::new(Category::FrontendFramework, id, requirements)
}

const SCRIPT_SOURCES: &[&str] = &["*.js", "*.jsx", "*.ts", "*.tsx"];

pub const FRONTEND_FRAMEWORKS: &[DetectorSpec] = &[
    frontend(
        TechId::React,
        Requirements {
            file_patterns: &["*.jsx", "*.tsx"],
            dependencies: &["react"],
            related_packages: &["react-dom", "react-router-dom", "react-scripts", "@vitejs/plugin-react"],
            content: Some(ContentScan {
                files: &["*.jsx", "*.tsx"],
                patterns: &[r#"from\s+['"]react['"]"#, r#"require\(['"]react['"]\)"#],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Vue, TechId::Angular, TechId::Svelte]),
    frontend(
        TechId::NextJs,
        Requirements {
            dependencies: &["next"],
            config_files: &["next.config.js", "next.config.mjs", "next.config.ts"],
            related_packages: &["eslint-config-next", "@next/font", "@next/bundle-analyzer"],
            content: Some(ContentScan {
                files: SCRIPT_SOURCES,
                patterns: &[r#"from\s+['"]next/"#],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Nuxt]),
    frontend(
        TechId::Vue,
        Requirements {
            file_patterns: &["*.vue"],
            dependencies: &["vue"],
            config_files: &["vue.config.js"],
            related_packages: &["vue-router", "pinia", "vuex", "@vitejs/plugin-vue"],
            content: Some(ContentScan {
                files: &["*.vue"],
                patterns: &[r"<template[\s>]"],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::React, TechId::Angular, TechId::Svelte]),
    frontend(
        TechId::Nuxt,
        Requirements {
            dependencies: &["nuxt"],
            config_files: &["nuxt.config.js", "nuxt.config.ts"],
            related_packages: &["@nuxt/kit", "@nuxt/content", "@nuxtjs/tailwindcss"],
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::NextJs]),
    frontend(
        TechId::Angular,
        Requirements {
            file_patterns: &["*.component.ts"],
            dependencies: &["@angular/core"],
            config_files: &["angular.json"],
            related_packages: &["@angular/common", "@angular/router", "@angular/cli"],
            content: Some(ContentScan {
                files: &["*.ts"],
                patterns: &[r"@Component\(", r#"from\s+['"]@angular/core['"]"#],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::React, TechId::Vue, TechId::Svelte]),
    frontend(
        TechId::Svelte,
        Requirements {
            file_patterns: &["*.svelte"],
            dependencies: &["svelte"],
            config_files: &["svelte.config.js"],
            related_packages: &["@sveltejs/kit", "@sveltejs/vite-plugin-svelte"],
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::React, TechId::Vue, TechId::Angular]),
];
