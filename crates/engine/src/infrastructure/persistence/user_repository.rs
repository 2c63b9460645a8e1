//! Read-only access to the externally-owned `"User"` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use atelier_domain::{User, UserId};

use crate::infrastructure::ports::{RepoError, UserRepo};

use super::parse_timestamp;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn find_id_by_email(&self, email: &str) -> Result<Option<UserId>, RepoError> {
        // SQLite TEXT comparison is case-sensitive, which is exactly the
        // matching rule for identity resolution.
        let row = sqlx::query(r#"SELECT id FROM "User" WHERE email = ?"#)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("find_id_by_email", e))?;

        Ok(row.map(|r| UserId::new(r.get::<String, _>("id"))))
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, emailVerified, image, createdAt
            FROM "User"
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_user", e))?;

        row.map(|r| {
            Ok(User {
                id: UserId::new(r.get::<String, _>("id")),
                name: r.get("name"),
                email: r.get("email"),
                email_verified: parse_optional_timestamp(r.get("emailVerified"))?,
                image: r.get("image"),
                created_at: parse_optional_timestamp(r.get("createdAt"))?,
            })
        })
        .transpose()
    }
}

fn parse_optional_timestamp(value: Option<String>) -> Result<Option<DateTime<Utc>>, RepoError> {
    value.as_deref().map(parse_timestamp).transpose()
}
