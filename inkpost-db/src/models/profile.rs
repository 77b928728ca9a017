//! Profile entity - personal details for at most one user
//!
//! Deleting a profile never deletes the user; the store clears
//! `users.profile_id` instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Gender, Profession};

/// Profile record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Gender,
    pub profession: Profession,
    /// Ordered list of free-form interest strings
    pub interests: Option<Vec<String>>,
    /// Unstructured contact document (telegram handle, website, ...)
    pub contacts: Option<serde_json::Value>,
}

impl Profile {
    pub const TABLE: &'static str = "profiles";
}

/// Insert payload; `profession: None` takes the declared default
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Gender,
    pub profession: Option<Profession>,
    pub interests: Option<Vec<String>>,
    pub contacts: Option<serde_json::Value>,
}

/// Update payload; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub profession: Option<Profession>,
    pub interests: Option<Vec<String>>,
    pub contacts: Option<serde_json::Value>,
}
