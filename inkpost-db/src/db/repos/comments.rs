//! Comment repository
//!
//! Comments reference both an author and a post; the store rejects either
//! reference dangling and cascade-deletes along both edges.
//!
//! Plain methods run against the pool; `_in` variants take any
//! [`PgExecutor`] so the query can join a [`Session`](crate::Session).

use sqlx::{PgExecutor, PgPool};

use crate::error::{DbError, DbResult};
use crate::models::{Comment, CommentPatch, NewComment, Rating};

const COMMENT_COLUMNS: &str =
    "id, created_at, update_at, content, user_id, post_id, is_published, rating";

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a comment. Dangling `user_id` or `post_id` surfaces as
    /// [`DbError::ForeignKeyViolation`]; `None` for `is_published` or
    /// `rating` takes the declared defaults.
    pub async fn create(&self, comment: NewComment) -> DbResult<Comment> {
        self.create_in(self.pool, comment).await
    }

    pub async fn create_in<'e, E>(&self, executor: E, comment: NewComment) -> DbResult<Comment>
    where
        E: PgExecutor<'e>,
    {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (user_id, post_id, content, is_published, rating) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(comment.user_id)
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(
            comment
                .is_published
                .unwrap_or(Comment::DEFAULT_IS_PUBLISHED),
        )
        .bind(comment.rating.unwrap_or(Rating::DEFAULT))
        .fetch_one(executor)
        .await?;

        Ok(comment)
    }

    pub async fn get(&self, id: i64) -> DbResult<Comment> {
        self.get_in(self.pool, id).await
    }

    pub async fn get_in<'e, E>(&self, executor: E, id: i64) -> DbResult<Comment>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "comment",
            id: id.to_string(),
        })
    }

    /// Apply a patch; absent fields keep their current values.
    pub async fn update(&self, id: i64, patch: CommentPatch) -> DbResult<Comment> {
        self.update_in(self.pool, id, patch).await
    }

    pub async fn update_in<'e, E>(
        &self,
        executor: E,
        id: i64,
        patch: CommentPatch,
    ) -> DbResult<Comment>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Comment>(&format!(
            "UPDATE comments SET \
                content = COALESCE($2, content), \
                is_published = COALESCE($3, is_published), \
                rating = COALESCE($4, rating) \
             WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.content)
        .bind(patch.is_published)
        .bind(patch.rating)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "comment",
            id: id.to_string(),
        })
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.delete_in(self.pool, id).await
    }

    pub async fn delete_in<'e, E>(&self, executor: E, id: i64) -> DbResult<()>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "comment",
                id: id.to_string(),
            });
        }

        Ok(())
    }

    /// All comments on a post, oldest first. On-demand load.
    pub async fn list_for_post(&self, post_id: i64) -> DbResult<Vec<Comment>> {
        self.list_for_post_in(self.pool, post_id).await
    }

    pub async fn list_for_post_in<'e, E>(&self, executor: E, post_id: i64) -> DbResult<Vec<Comment>>
    where
        E: PgExecutor<'e>,
    {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY created_at"
        ))
        .bind(post_id)
        .fetch_all(executor)
        .await?;

        Ok(comments)
    }

    /// All comments authored by a user, newest first. On-demand load.
    pub async fn list_for_user(&self, user_id: i64) -> DbResult<Vec<Comment>> {
        self.list_for_user_in(self.pool, user_id).await
    }

    pub async fn list_for_user_in<'e, E>(&self, executor: E, user_id: i64) -> DbResult<Vec<Comment>>
    where
        E: PgExecutor<'e>,
    {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(comments)
    }
}
