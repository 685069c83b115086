use crate::stack::{Category, ContentScan, DetectorSpec, Requirements, TechId};

const fn backend(id: TechId, requirements: Requirements) -> DetectorSpec {
    DetectorSpec::new(Category::BackendFramework, id, requirements)
}

const NODE_SOURCES: &[&str] = &["*.js", "*.mjs", "*.cjs", "*.ts"];

pub const BACKEND_FRAMEWORKS: &[DetectorSpec] = &[
    backend(
        TechId::Express,
        Requirements {
            dependencies: &["express"],
            related_packages: &["express-session", "express-validator", "body-parser"],
            content: Some(ContentScan {
                files: NODE_SOURCES,
                patterns: &[r#"require\(['"]express['"]\)"#, r#"from\s+['"]express['"]"#],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Fastify, TechId::Koa]),
    backend(
        TechId::Fastify,
        Requirements {
            dependencies: &["fastify"],
            related_packages: &["fastify-plugin", "@fastify/cors", "@fastify/static"],
            content: Some(ContentScan {
                files: NODE_SOURCES,
                patterns: &[r#"require\(['"]fastify['"]\)"#, r#"from\s+['"]fastify['"]"#],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Express, TechId::Koa]),
    backend(
        TechId::Koa,
        Requirements {
            dependencies: &["koa"],
            related_packages: &["@koa/router", "koa-router", "koa-bodyparser"],
            content: Some(ContentScan {
                files: NODE_SOURCES,
                patterns: &[r#"require\(['"]koa['"]\)"#, r#"from\s+['"]koa['"]"#],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Express, TechId::Fastify]),
    backend(
        TechId::NestJs,
        Requirements {
            file_patterns: &["*.module.ts", "*.controller.ts"],
            dependencies: &["@nestjs/core"],
            config_files: &["nest-cli.json"],
            related_packages: &["@nestjs/common", "@nestjs/platform-express", "@nestjs/cli"],
            content: Some(ContentScan {
                files: &["*.ts"],
                patterns: &[r#"from\s+['"]@nestjs/"#],
            }),
            ..Requirements::EMPTY
        },
    ),
    backend(
        TechId::Django,
        Requirements {
            dependencies: &["django"],
            config_files: &["manage.py"],
            related_packages: &["djangorestframework", "django-environ", "django-cors-headers"],
            content: Some(ContentScan {
                files: &["*.py"],
                patterns: &[r"(?m)^\s*from django\b", r"(?m)^\s*import django\b"],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Flask, TechId::FastApi]),
    backend(
        TechId::Flask,
        Requirements {
            dependencies: &["flask"],
            related_packages: &["flask-sqlalchemy", "flask-cors", "flask-login", "flask-restful"],
            content: Some(ContentScan {
                files: &["*.py"],
                patterns: &[r"(?m)^\s*from flask import", r"Flask\(__name__\)"],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Django, TechId::FastApi]),
    backend(
        TechId::FastApi,
        Requirements {
            dependencies: &["fastapi"],
            related_packages: &["fastapi-users", "sqlmodel", "fastapi-pagination"],
            content: Some(ContentScan {
                files: &["*.py"],
                patterns: &[r"(?m)^\s*from fastapi import", r"FastAPI\("],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Django, TechId::Flask]),
    backend(
        TechId::Rails,
        Requirements {
            dependencies: &["rails"],
            config_files: &["config/routes.rb", "config/application.rb", "bin/rails"],
            related_packages: &["railties", "actionpack", "activerecord"],
            content: Some(ContentScan {
                files: &["*.rb"],
                patterns: &[r"Rails\.application", r"< ApplicationController"],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Sinatra]),
    backend(
        TechId::Sinatra,
        Requirements {
            dependencies: &["sinatra"],
            related_packages: &["sinatra-contrib", "sinatra-activerecord"],
            content: Some(ContentScan {
                files: &["*.rb"],
                patterns: &[r#"require\s+['"]sinatra"#],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Rails]),
    backend(
        TechId::SpringBoot,
        Requirements {
            dependencies: &[
                "org.springframework.boot:spring-boot-starter",
                "org.springframework.boot:spring-boot-starter-web",
                "org.springframework.boot:spring-boot-starter-webflux",
            ],
            related_packages: &[
                "org.springframework.boot:spring-boot-starter-parent",
                "org.springframework.boot",
            ],
            content: Some(ContentScan {
                files: &["*.java", "*.kt"],
                patterns: &[r"@SpringBootApplication"],
            }),
            ..Requirements::EMPTY
        },
    ),
    backend(
        TechId::Gin,
        Requirements {
            dependencies: &["github.com/gin-gonic/gin"],
            related_packages: &["github.com/gin-contrib/cors", "github.com/gin-contrib/sessions"],
            content: Some(ContentScan {
                files: &["*.go"],
                patterns: &[r#""github.com/gin-gonic/gin""#],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Echo]),
    backend(
        TechId::Echo,
        Requirements {
            dependencies: &["github.com/labstack/echo/v4", "github.com/labstack/echo"],
            related_packages: &["github.com/labstack/echo-contrib"],
            content: Some(ContentScan {
                files: &["*.go"],
                patterns: &[r#""github.com/labstack/echo"#],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Gin]),
    backend(
        TechId::ActixWeb,
        Requirements {
            dependencies: &["actix-web"],
            related_packages: &["actix-rt", "actix-cors", "actix-files"],
            content: Some(ContentScan {
                files: &["*.rs"],
                patterns: &[r"use actix_web\b"],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Axum]),
    backend(
        TechId::Axum,
        Requirements {
            dependencies: &["axum"],
            related_packages: &["axum-extra", "axum-macros"],
            content: Some(ContentScan {
                files: &["*.rs"],
                patterns: &[r"use axum\b"],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::ActixWeb]),
    backend(
        TechId::Laravel,
        Requirements {
            dependencies: &["laravel/framework"],
            config_files: &["artisan"],
            related_packages: &["laravel/tinker", "laravel/sanctum", "laravel/sail"],
            content: Some(ContentScan {
                files: &["*.php"],
                patterns: &[r"use Illuminate\\"],
            }),
            ..Requirements::EMPTY
        },
    ),
];
