//! Image persistence: rows, like bookkeeping, and feed queries.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use atelier_domain::{ExploreSort, Image, ImageId, ImageRecord, UserId};

use crate::infrastructure::ports::{ImageRepo, RepoError};

use super::parse_timestamp;

pub struct SqliteImageRepo {
    pool: SqlitePool,
}

impl SqliteImageRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: &SqliteRow) -> Result<ImageRecord, RepoError> {
    let id_str: String = row.get("id");
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| RepoError::serialization(format!("bad image id {id_str}: {e}")))?;
    let created_at_str: String = row.get("createdAt");

    Ok(ImageRecord {
        id: ImageId::from_uuid(id),
        user_id: UserId::new(row.get::<String, _>("userId")),
        image_url: row.get("imageUrl"),
        prompt: row.get("prompt"),
        refined_prompt: row.get("refinedPrompt"),
        created_at: parse_timestamp(&created_at_str)?,
        likes: row.get("likes"),
        user_name: row.get("userName"),
    })
}

#[async_trait]
impl ImageRepo for SqliteImageRepo {
    async fn insert(&self, image: &Image) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO "Image" (id, userId, imageUrl, prompt, refinedPrompt, createdAt, likes)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(image.id().to_string())
        .bind(image.user_id().as_str())
        .bind(image.image_url())
        .bind(image.prompt())
        .bind(image.refined_prompt())
        .bind(image.created_at().to_rfc3339())
        .bind(image.likes())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_image", e))?;

        Ok(())
    }

    async fn get_record(&self, id: ImageId) -> Result<Option<ImageRecord>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT i.id, i.userId, i.imageUrl, i.prompt, i.refinedPrompt, i.createdAt, i.likes,
                   u.name AS userName
            FROM "Image" i
            LEFT JOIN "User" u ON i.userId = u.id
            WHERE i.id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_image", e))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ImageRecord>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.userId, i.imageUrl, i.prompt, i.refinedPrompt, i.createdAt, i.likes,
                   u.name AS userName
            FROM "Image" i
            LEFT JOIN "User" u ON i.userId = u.id
            WHERE i.userId = ?
            ORDER BY i.createdAt DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_user_images", e))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn list_explore(
        &self,
        limit: i64,
        offset: i64,
        sort: ExploreSort,
    ) -> Result<Vec<ImageRecord>, RepoError> {
        // Most-liked breaks counter ties by recency so fresh uploads are not
        // buried behind old ones.
        let sql = match sort {
            ExploreSort::MostLiked => {
                r#"
                SELECT i.id, i.userId, i.imageUrl, i.prompt, i.refinedPrompt, i.createdAt, i.likes,
                       u.name AS userName
                FROM "Image" i
                LEFT JOIN "User" u ON i.userId = u.id
                ORDER BY i.likes DESC, i.createdAt DESC
                LIMIT ? OFFSET ?
                "#
            }
            ExploreSort::Newest => {
                r#"
                SELECT i.id, i.userId, i.imageUrl, i.prompt, i.refinedPrompt, i.createdAt, i.likes,
                       u.name AS userName
                FROM "Image" i
                LEFT JOIN "User" u ON i.userId = u.id
                ORDER BY i.createdAt DESC
                LIMIT ? OFFSET ?
                "#
            }
        };

        let rows = sqlx::query(sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_explore", e))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn add_like(&self, image_id: ImageId, user_id: &UserId) -> Result<bool, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("add_like", e))?;

        // The composite primary key makes the duplicate check atomic with
        // the insert, so two racing likes cannot both pass it.
        let inserted =
            sqlx::query(r#"INSERT OR IGNORE INTO "Like" (imageId, userId) VALUES (?, ?)"#)
                .bind(image_id.to_string())
                .bind(user_id.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("add_like", e))?
                .rows_affected();

        if inserted == 0 {
            // Already liked; dropping the transaction rolls back.
            return Ok(false);
        }

        let updated = sqlx::query(r#"UPDATE "Image" SET likes = likes + 1 WHERE id = ?"#)
            .bind(image_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("add_like", e))?
            .rows_affected();

        if updated == 0 {
            // No such image; the rollback also discards the like row.
            return Err(RepoError::not_found("Image", image_id));
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("add_like", e))?;

        Ok(true)
    }

    async fn remove_like(&self, image_id: ImageId, user_id: &UserId) -> Result<bool, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("remove_like", e))?;

        let deleted = sqlx::query(r#"DELETE FROM "Like" WHERE imageId = ? AND userId = ?"#)
            .bind(image_id.to_string())
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("remove_like", e))?
            .rows_affected();

        if deleted == 0 {
            return Ok(false);
        }

        // Clamp at zero so a drifted counter can never go negative.
        sqlx::query(r#"UPDATE "Image" SET likes = MAX(likes - 1, 0) WHERE id = ?"#)
            .bind(image_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("remove_like", e))?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("remove_like", e))?;

        Ok(true)
    }

    async fn liked_image_ids(&self, user_id: &UserId) -> Result<Vec<ImageId>, RepoError> {
        let rows = sqlx::query(r#"SELECT imageId FROM "Like" WHERE userId = ?"#)
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("liked_image_ids", e))?;

        rows.iter()
            .map(|row| {
                let id_str: String = row.get("imageId");
                Uuid::parse_str(&id_str)
                    .map(ImageId::from_uuid)
                    .map_err(|e| RepoError::serialization(format!("bad image id {id_str}: {e}")))
            })
            .collect()
    }

    async fn delete_owned(&self, image_id: ImageId, user_id: &UserId) -> Result<bool, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("delete_image", e))?;

        let owner = sqlx::query(r#"SELECT userId FROM "Image" WHERE id = ?"#)
            .bind(image_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepoError::database("delete_image", e))?;

        // A missing image and a foreign owner report the same way.
        let owned =
            matches!(owner, Some(row) if row.get::<String, _>("userId") == user_id.as_str());
        if !owned {
            return Ok(false);
        }

        sqlx::query(r#"DELETE FROM "Like" WHERE imageId = ?"#)
            .bind(image_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("delete_image", e))?;

        sqlx::query(r#"DELETE FROM "Comment" WHERE imageId = ?"#)
            .bind(image_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("delete_image", e))?;

        sqlx::query(r#"DELETE FROM "Image" WHERE id = ?"#)
            .bind(image_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("delete_image", e))?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("delete_image", e))?;

        Ok(true)
    }
}
