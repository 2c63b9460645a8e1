//! Comment persistence.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use atelier_domain::{Comment, CommentId, ImageId, UserId};

use crate::infrastructure::ports::{CommentRepo, RepoError};

use super::parse_timestamp;

pub struct SqliteCommentRepo {
    pool: SqlitePool,
}

impl SqliteCommentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_comment(row: &SqliteRow) -> Result<Comment, RepoError> {
    let id_str: String = row.get("id");
    let image_id_str: String = row.get("imageId");
    let created_at_str: String = row.get("createdAt");

    let id = Uuid::parse_str(&id_str)
        .map_err(|e| RepoError::serialization(format!("bad comment id {id_str}: {e}")))?;
    let image_id = Uuid::parse_str(&image_id_str)
        .map_err(|e| RepoError::serialization(format!("bad image id {image_id_str}: {e}")))?;

    Ok(Comment {
        id: CommentId::from_uuid(id),
        image_id: ImageId::from_uuid(image_id),
        user_id: UserId::new(row.get::<String, _>("userId")),
        user_name: row.get("userName"),
        text: row.get("text"),
        created_at: parse_timestamp(&created_at_str)?,
    })
}

#[async_trait]
impl CommentRepo for SqliteCommentRepo {
    async fn insert(&self, comment: &Comment) -> Result<Comment, RepoError> {
        sqlx::query(
            r#"
            INSERT INTO "Comment" (id, imageId, userId, userName, text, createdAt)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(comment.id.to_string())
        .bind(comment.image_id.to_string())
        .bind(comment.user_id.as_str())
        .bind(&comment.user_name)
        .bind(&comment.text)
        .bind(comment.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_comment", e))?;

        // The stored row is the source of truth; read it back instead of
        // echoing the input.
        let row = sqlx::query(
            r#"
            SELECT id, imageId, userId, userName, text, createdAt
            FROM "Comment"
            WHERE id = ?
            "#,
        )
        .bind(comment.id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_comment", e))?;

        row_to_comment(&row)
    }

    async fn list_for_image(&self, image_id: ImageId) -> Result<Vec<Comment>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, imageId, userId, userName, text, createdAt
            FROM "Comment"
            WHERE imageId = ?
            ORDER BY createdAt ASC
            "#,
        )
        .bind(image_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_comments", e))?;

        rows.iter().map(row_to_comment).collect()
    }
}
