//! Post repository
//!
//! Posts are loaded on demand (never joined into user fetches). Deleting a
//! post relies on the store cascading away its comments.
//!
//! Plain methods run against the pool; `_in` variants take any
//! [`PgExecutor`] so the query can join a [`Session`](crate::Session).

use sqlx::{FromRow, PgExecutor, PgPool, Row};

use crate::error::{DbError, DbResult};
use crate::models::{NewPost, Paginated, Pagination, Post, PostPatch, PostStatus};

const POST_COLUMNS: &str =
    "id, created_at, update_at, title, content, main_photo_url, photos_url, status, user_id";

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a post. A nonexistent `user_id` surfaces as
    /// [`DbError::ForeignKeyViolation`]; `status: None` takes the declared
    /// default.
    pub async fn create(&self, post: NewPost) -> DbResult<Post> {
        self.create_in(self.pool, post).await
    }

    pub async fn create_in<'e, E>(&self, executor: E, post: NewPost) -> DbResult<Post>
    where
        E: PgExecutor<'e>,
    {
        let post = sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (user_id, title, content, main_photo_url, photos_url, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {POST_COLUMNS}"
        ))
        .bind(post.user_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.main_photo_url)
        .bind(&post.photos_url)
        .bind(post.status.unwrap_or(PostStatus::DEFAULT))
        .fetch_one(executor)
        .await?;

        Ok(post)
    }

    pub async fn get(&self, id: i64) -> DbResult<Post> {
        self.get_in(self.pool, id).await
    }

    pub async fn get_in<'e, E>(&self, executor: E, id: i64) -> DbResult<Post>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "post",
                id: id.to_string(),
            })
    }

    /// Apply a patch; absent fields keep their current values.
    pub async fn update(&self, id: i64, patch: PostPatch) -> DbResult<Post> {
        self.update_in(self.pool, id, patch).await
    }

    pub async fn update_in<'e, E>(&self, executor: E, id: i64, patch: PostPatch) -> DbResult<Post>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET \
                title = COALESCE($2, title), \
                content = COALESCE($3, content), \
                main_photo_url = COALESCE($4, main_photo_url), \
                photos_url = COALESCE($5, photos_url), \
                status = COALESCE($6, status) \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.main_photo_url)
        .bind(patch.photos_url)
        .bind(patch.status)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "post",
            id: id.to_string(),
        })
    }

    /// Delete a post. The store cascades to its comments; the owner's other
    /// posts are untouched.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.delete_in(self.pool, id).await
    }

    pub async fn delete_in<'e, E>(&self, executor: E, id: i64) -> DbResult<()>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "post",
                id: id.to_string(),
            });
        }

        tracing::debug!(post_id = id, "deleted post (comments cascaded)");
        Ok(())
    }

    /// All posts owned by a user, newest first. On-demand load.
    pub async fn list_for_user(&self, user_id: i64) -> DbResult<Vec<Post>> {
        self.list_for_user_in(self.pool, user_id).await
    }

    pub async fn list_for_user_in<'e, E>(&self, executor: E, user_id: i64) -> DbResult<Vec<Post>>
    where
        E: PgExecutor<'e>,
    {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(posts)
    }

    /// List posts across all users, newest first.
    pub async fn list(&self, page: Pagination) -> DbResult<Paginated<Post>> {
        let rows = sqlx::query(&format!(
            "SELECT {POST_COLUMNS}, COUNT(*) OVER() AS total \
             FROM posts ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let items = rows
            .iter()
            .map(Post::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }
}
