//! SQLite-backed metadata store.
//!
//! The schema is shared with the wider product: quoted PascalCase tables
//! (`"Image"`, `"Like"`, `"Comment"`, plus the externally-owned `"User"`)
//! with camelCase columns. Other consumers read the same database file, so
//! the names are not ours to change.

mod comment_repository;
mod image_repository;
mod user_repository;

pub use comment_repository::SqliteCommentRepo;
pub use image_repository::SqliteImageRepo;
pub use user_repository::SqliteUserRepo;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

/// Open (or create) the SQLite database at `db_path`.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    SqlitePool::connect(&format!("sqlite:{db_path}?mode=rwc"))
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// Create tables and indexes if they do not exist yet.
///
/// `"User"` is normally populated by the identity system; it is created here
/// too so local deployments and tests work against an empty database file.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS "User" (
            id TEXT PRIMARY KEY,
            name TEXT,
            email TEXT,
            emailVerified TEXT,
            image TEXT,
            createdAt TEXT
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS "Image" (
            id TEXT PRIMARY KEY,
            userId TEXT NOT NULL,
            imageUrl TEXT NOT NULL,
            prompt TEXT NOT NULL,
            refinedPrompt TEXT,
            createdAt TEXT NOT NULL,
            likes INTEGER NOT NULL DEFAULT 0
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS "Like" (
            imageId TEXT NOT NULL,
            userId TEXT NOT NULL,
            PRIMARY KEY (imageId, userId)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS "Comment" (
            id TEXT PRIMARY KEY,
            imageId TEXT NOT NULL,
            userId TEXT NOT NULL,
            userName TEXT NOT NULL,
            text TEXT NOT NULL,
            createdAt TEXT NOT NULL
        )
        "#,
        r#"CREATE INDEX IF NOT EXISTS idx_image_user ON "Image"(userId)"#,
        r#"CREATE INDEX IF NOT EXISTS idx_image_created ON "Image"(createdAt)"#,
        r#"CREATE INDEX IF NOT EXISTS idx_like_user ON "Like"(userId)"#,
        r#"CREATE INDEX IF NOT EXISTS idx_comment_image ON "Comment"(imageId)"#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }

    Ok(())
}

/// All SQLite repositories created from one pool.
pub struct SqliteRepositories {
    pub users: Arc<SqliteUserRepo>,
    pub images: Arc<SqliteImageRepo>,
    pub comments: Arc<SqliteCommentRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: Arc::new(SqliteUserRepo::new(pool.clone())),
            images: Arc::new(SqliteImageRepo::new(pool.clone())),
            comments: Arc::new(SqliteCommentRepo::new(pool)),
        }
    }
}

/// Timestamps are stored as RFC 3339 text, which also makes the stored form
/// sort chronologically.
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("bad timestamp {value}: {e}")))
}
