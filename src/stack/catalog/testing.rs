use crate::stack::{Category, ContentScan, DetectorSpec, Requirements, TechId};

const fn test_framework(id: TechId, requirements: Requirements) -> DetectorSpec {
    DetectorSpec::new(Category::TestFramework, id, requirements)
}

const JS_TEST_FILES: &[&str] = &["*.test.js", "*.test.ts", "*.spec.js", "*.spec.ts"];

pub const TEST_FRAMEWORKS: &[DetectorSpec] = &[
    test_framework(
        TechId::Jest,
        Requirements {
            file_patterns: JS_TEST_FILES,
            dependencies: &["jest"],
            config_files: &["jest.config.js", "jest.config.ts", "jest.config.mjs", "jest.config.cjs"],
            related_packages: &["ts-jest", "babel-jest", "@types/jest", "jest-environment-jsdom"],
            content: Some(ContentScan {
                files: JS_TEST_FILES,
                patterns: &[r#"from\s+['"]@jest/globals['"]"#, r"\bjest\.(?:fn|mock|spyOn)\("],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Vitest]),
    test_framework(
        TechId::Vitest,
        Requirements {
            file_patterns: JS_TEST_FILES,
            dependencies: &["vitest"],
            config_files: &["vitest.config.ts", "vitest.config.js", "vitest.config.mts"],
            related_packages: &["@vitest/ui", "@vitest/coverage-v8", "@vitest/coverage-istanbul"],
            content: Some(ContentScan {
                files: JS_TEST_FILES,
                patterns: &[r#"from\s+['"]vitest['"]"#, r"\bvi\.(?:fn|mock|spyOn)\("],
            }),
            ..Requirements::EMPTY
        },
    )
    .excluding(&[TechId::Jest]),
    test_framework(
        TechId::Mocha,
        Requirements {
            file_patterns: JS_TEST_FILES,
            dependencies: &["mocha"],
            config_files: &[".mocharc.json", ".mocharc.js", ".mocharc.yml", ".mocharc.yaml"],
            related_packages: &["@types/mocha", "mochawesome"],
            ..Requirements::EMPTY
        },
    ),
    test_framework(
        TechId::Cypress,
        Requirements {
            file_patterns: &["*.cy.js", "*.cy.ts"],
            dependencies: &["cypress"],
            config_files: &["cypress.config.js", "cypress.config.ts", "cypress.json"],
            related_packages: &["@testing-library/cypress", "cypress-real-events"],
            ..Requirements::EMPTY
        },
    ),
    test_framework(
        TechId::Playwright,
        Requirements {
            dependencies: &["@playwright/test", "playwright"],
            config_files: &["playwright.config.ts", "playwright.config.js"],
            related_packages: &["@playwright/experimental-ct-react", "pytest-playwright"],
            content: Some(ContentScan {
                files: JS_TEST_FILES,
                patterns: &[r#"from\s+['"]@playwright/test['"]"#],
            }),
            ..Requirements::EMPTY
        },
    ),
    test_framework(
        TechId::Pytest,
        Requirements {
            file_patterns: &["test_*.py", "*_test.py"],
            dependencies: &["pytest"],
            config_files: &["pytest.ini", "conftest.py"],
            related_packages: &["pytest-cov", "pytest-asyncio", "pytest-mock", "pytest-django"],
            content: Some(ContentScan {
                files: &["test_*.py", "*_test.py"],
                patterns: &[r"(?m)^\s*import pytest\b", r"@pytest\."],
            }),
            ..Requirements::EMPTY
        },
    ),
    test_framework(
        TechId::Rspec,
        Requirements {
            file_patterns: &["*_spec.rb"],
            dependencies: &["rspec", "rspec-rails"],
            config_files: &[".rspec"],
            related_packages: &["rspec-core", "rspec-expectations", "rspec-mocks"],
            content: Some(ContentScan {
                files: &["*_spec.rb"],
                patterns: &[r"\bRSpec\.describe\b"],
            }),
            ..Requirements::EMPTY
        },
    ),
];
