//! Comment entity - belongs to one user and one post
//!
//! Cascade-deleted when either owner goes away.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Rating;

/// Comment record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
    pub is_published: bool,
    pub rating: Rating,
}

impl Comment {
    pub const TABLE: &'static str = "comments";

    /// Declared default for `is_published`; emitted into the DDL.
    pub const DEFAULT_IS_PUBLISHED: bool = true;
}

/// Insert payload; `None` for defaulted fields takes the declared default
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub user_id: i64,
    pub post_id: i64,
    pub content: String,
    pub is_published: Option<bool>,
    pub rating: Option<Rating>,
}

/// Update payload; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentPatch {
    pub content: Option<String>,
    pub is_published: Option<bool>,
    pub rating: Option<Rating>,
}
