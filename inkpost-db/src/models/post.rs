//! Post entity - authored content owning comments
//!
//! Belongs to exactly one user; deleting the user takes the post with it,
//! and deleting the post takes its comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::PostStatus;

/// Post record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub main_photo_url: String,
    /// Ordered gallery URLs beyond the main photo
    pub photos_url: Option<Vec<String>>,
    pub status: PostStatus,
    pub user_id: i64,
}

impl Post {
    pub const TABLE: &'static str = "posts";
}

/// Insert payload; `status: None` takes the declared default
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub main_photo_url: String,
    pub photos_url: Option<Vec<String>>,
    pub status: Option<PostStatus>,
}

/// Update payload; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub main_photo_url: Option<String>,
    pub photos_url: Option<Vec<String>>,
    pub status: Option<PostStatus>,
}
