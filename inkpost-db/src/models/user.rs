//! User entity - account record owning posts and comments
//!
//! `username` and `email` are unique at the store. `profile_id` carries the
//! one-to-one link to profiles; its UNIQUE constraint is what keeps a
//! profile from being claimed by two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Profile;

/// User record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub username: String,
    pub email: String,
    /// Opaque stored string; hashing happens upstream
    pub password: String,
    pub profile_id: Option<i64>,
}

impl User {
    pub const TABLE: &'static str = "users";
}

/// Insert payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub profile_id: Option<i64>,
}

/// Update payload; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User with its eagerly joined profile.
///
/// Fetching a user always brings the profile along in the same query, so
/// callers never pay a second round trip for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithProfile {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<Profile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_profile_flattens_user_fields() {
        let user = User {
            id: 1,
            created_at: Utc::now(),
            update_at: Utc::now(),
            username: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "hash".to_owned(),
            profile_id: None,
        };
        let value = serde_json::to_value(UserWithProfile {
            user,
            profile: None,
        })
        .unwrap();

        assert_eq!(value["username"], "ada");
        assert!(value["profile"].is_null());
        assert!(value.get("user").is_none(), "user fields are flattened");
    }
}
