use crate::stack::{Category, ContentScan, DetectorSpec, Requirements, TechId};

const fn database(id: TechId, requirements: Requirements) -> DetectorSpec {
    DetectorSpec::new(Category::Database, id, requirements)
}

const CONNECTION_SOURCES: &[&str] = &[
    "*.js", "*.ts", "*.py", "*.rb", "*.go", "*.rs", "*.java", "*.php", "*.yml", "*.yaml",
];

pub const DATABASES: &[DetectorSpec] = &[
    database(
        TechId::PostgreSql,
        Requirements {
            dependencies: &[
                "pg",
                "postgres",
                "psycopg",
                "psycopg2",
                "psycopg2-binary",
                "asyncpg",
                "tokio-postgres",
                "github.com/lib/pq",
                "github.com/jackc/pgx/v5",
                "org.postgresql:postgresql",
            ],
            related_packages: &["pg-promise", "pg-pool", "@types/pg"],
            docker_services: &["postgres"],
            env_vars: &["POSTGRES_", "PGHOST", "PGDATABASE"],
            content: Some(ContentScan {
                files: CONNECTION_SOURCES,
                patterns: &[r"postgres(?:ql)?://"],
            }),
            ..Requirements::EMPTY
        },
    ),
    database(
        TechId::MySql,
        Requirements {
            dependencies: &[
                "mysql",
                "mysql2",
                "pymysql",
                "mysqlclient",
                "mysql-connector-python",
                "github.com/go-sql-driver/mysql",
                "com.mysql:mysql-connector-j",
                "mysql:mysql-connector-java",
            ],
            related_packages: &["@types/mysql", "aiomysql"],
            docker_services: &["mysql", "mariadb"],
            env_vars: &["MYSQL_"],
            content: Some(ContentScan {
                files: CONNECTION_SOURCES,
                patterns: &[r"mysql://"],
            }),
            ..Requirements::EMPTY
        },
    ),
    database(
        TechId::MongoDb,
        Requirements {
            dependencies: &[
                "mongodb",
                "mongoose",
                "pymongo",
                "motor",
                "mongoid",
                "go.mongodb.org/mongo-driver",
            ],
            related_packages: &["mongoengine", "beanie", "@types/mongoose"],
            docker_services: &["mongo"],
            env_vars: &["MONGO_", "MONGODB_"],
            content: Some(ContentScan {
                files: CONNECTION_SOURCES,
                patterns: &[r"mongodb(?:\+srv)?://"],
            }),
            ..Requirements::EMPTY
        },
    ),
    database(
        TechId::Redis,
        Requirements {
            dependencies: &[
                "redis",
                "ioredis",
                "github.com/redis/go-redis/v9",
                "github.com/go-redis/redis/v8",
            ],
            related_packages: &["bull", "bullmq", "connect-redis", "django-redis", "rq"],
            docker_services: &["redis"],
            env_vars: &["REDIS_"],
            content: Some(ContentScan {
                files: CONNECTION_SOURCES,
                patterns: &[r"rediss?://"],
            }),
            ..Requirements::EMPTY
        },
    ),
    database(
        TechId::Sqlite,
        Requirements {
            file_patterns: &["*.sqlite", "*.sqlite3", "*.db"],
            dependencies: &[
                "sqlite3",
                "better-sqlite3",
                "rusqlite",
                "github.com/mattn/go-sqlite3",
                "org.xerial:sqlite-jdbc",
            ],
            related_packages: &["aiosqlite", "sql.js"],
            content: Some(ContentScan {
                files: &["*.py", "*.js", "*.ts", "*.rb"],
                patterns: &[r"sqlite:///?", r"(?m)^\s*import sqlite3\b"],
            }),
            ..Requirements::EMPTY
        },
    ),
    database(
        TechId::Elasticsearch,
        Requirements {
            dependencies: &[
                "@elastic/elasticsearch",
                "elasticsearch",
                "elasticsearch-dsl",
                "github.com/elastic/go-elasticsearch/v8",
            ],
            related_packages: &["elasticsearch-async", "django-elasticsearch-dsl"],
            docker_services: &["elasticsearch"],
            env_vars: &["ELASTICSEARCH_"],
            ..Requirements::EMPTY
        },
    ),
];
