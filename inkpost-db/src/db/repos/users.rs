//! User repository
//!
//! Every fetch brings the profile along in the same query (eager one-to-one
//! join); posts and comments stay on-demand through their own repos.
//! Deleting a user relies on the store's cascades for posts and comments.
//!
//! Each operation comes in two forms: the plain method runs against the
//! pool (auto-commit), and the `_in` variant takes any [`PgExecutor`] so
//! the same query can run inside a [`Session`](crate::Session) via
//! `session.conn()`.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor, PgPool, Row};

use crate::error::{DbError, DbResult};
use crate::models::{
    NewProfile, NewUser, Paginated, Pagination, Profession, Profile, User, UserPatch,
    UserWithProfile,
};

const USER_COLUMNS: &str = "id, created_at, update_at, username, email, password, profile_id";

const USER_WITH_PROFILE_COLUMNS: &str = "\
    u.id, u.created_at, u.update_at, u.username, u.email, u.password, u.profile_id, \
    p.id AS p_id, p.created_at AS p_created_at, p.update_at AS p_update_at, \
    p.first_name, p.last_name, p.age, p.gender, p.profession, p.interests, p.contacts";

const USER_WITH_PROFILE_FROM: &str = "FROM users u LEFT JOIN profiles p ON p.id = u.profile_id";

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user. Duplicate username or email surfaces as
    /// [`DbError::UniqueViolation`]; a dangling `profile_id` as
    /// [`DbError::ForeignKeyViolation`].
    pub async fn create(&self, user: NewUser) -> DbResult<User> {
        self.create_in(self.pool, user).await
    }

    pub async fn create_in<'e, E>(&self, executor: E, user: NewUser) -> DbResult<User>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password, profile_id) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.profile_id)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Insert a user together with a fresh profile, atomically.
    ///
    /// Either both rows land and the user points at the profile, or neither
    /// exists. Any `profile_id` on the payload is ignored.
    pub async fn create_with_profile(
        &self,
        user: NewUser,
        profile: NewProfile,
    ) -> DbResult<UserWithProfile> {
        let mut tx = self.pool.begin().await?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (first_name, last_name, age, gender, profession, interests, contacts)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, created_at, update_at, first_name, last_name, age, gender,
                      profession, interests, contacts
            "#,
        )
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.age)
        .bind(profile.gender)
        .bind(profile.profession.unwrap_or(Profession::DEFAULT))
        .bind(&profile.interests)
        .bind(&profile.contacts)
        .fetch_one(&mut *tx)
        .await?;

        let user = NewUser {
            profile_id: Some(profile.id),
            ..user
        };
        let user = self.create_in(&mut *tx, user).await?;

        tx.commit().await?;
        Ok(UserWithProfile {
            user,
            profile: Some(profile),
        })
    }

    /// Fetch a user by id with its profile joined in.
    pub async fn get(&self, id: i64) -> DbResult<UserWithProfile> {
        self.get_in(self.pool, id).await
    }

    pub async fn get_in<'e, E>(&self, executor: E, id: i64) -> DbResult<UserWithProfile>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query(&format!(
            "SELECT {USER_WITH_PROFILE_COLUMNS} {USER_WITH_PROFILE_FROM} WHERE u.id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })?;

        decode_user_with_profile(&row)
    }

    /// Fetch a user by username with its profile joined in.
    pub async fn get_by_username(&self, username: &str) -> DbResult<UserWithProfile> {
        self.get_by_username_in(self.pool, username).await
    }

    pub async fn get_by_username_in<'e, E>(
        &self,
        executor: E,
        username: &str,
    ) -> DbResult<UserWithProfile>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query(&format!(
            "SELECT {USER_WITH_PROFILE_COLUMNS} {USER_WITH_PROFILE_FROM} WHERE u.username = $1"
        ))
        .bind(username)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: username.to_owned(),
        })?;

        decode_user_with_profile(&row)
    }

    /// Apply a patch; absent fields keep their current values.
    pub async fn update(&self, id: i64, patch: UserPatch) -> DbResult<User> {
        self.update_in(self.pool, id, patch).await
    }

    pub async fn update_in<'e, E>(&self, executor: E, id: i64, patch: UserPatch) -> DbResult<User>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                username = COALESCE($2, username), \
                email = COALESCE($3, email), \
                password = COALESCE($4, password) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.username)
        .bind(patch.email)
        .bind(patch.password)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })
    }

    /// Point the user at an existing profile. The UNIQUE constraint on
    /// `profile_id` rejects a profile already claimed by another user.
    pub async fn attach_profile(&self, id: i64, profile_id: i64) -> DbResult<User> {
        self.attach_profile_in(self.pool, id, profile_id).await
    }

    pub async fn attach_profile_in<'e, E>(
        &self,
        executor: E,
        id: i64,
        profile_id: i64,
    ) -> DbResult<User>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET profile_id = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(profile_id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })
    }

    /// Clear the profile link. The profile row itself is untouched.
    pub async fn detach_profile(&self, id: i64) -> DbResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET profile_id = NULL WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })
    }

    /// Delete a user. The store cascades to all owned posts and comments.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.delete_in(self.pool, id).await
    }

    pub async fn delete_in<'e, E>(&self, executor: E, id: i64) -> DbResult<()>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "user",
                id: id.to_string(),
            });
        }

        tracing::debug!(user_id = id, "deleted user (posts/comments cascaded)");
        Ok(())
    }

    /// List users, newest first, each with its profile joined in. The
    /// eager-load policy holds here too: no follow-up query per row.
    pub async fn list(&self, page: Pagination) -> DbResult<Paginated<UserWithProfile>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_WITH_PROFILE_COLUMNS}, COUNT(*) OVER() AS total \
             {USER_WITH_PROFILE_FROM} \
             ORDER BY u.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let items = rows
            .iter()
            .map(decode_user_with_profile)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }
}

/// Decode a LEFT JOIN row into the user plus its optional profile.
fn decode_user_with_profile(row: &PgRow) -> DbResult<UserWithProfile> {
    let user = User::from_row(row)?;

    let profile = match row.try_get::<Option<i64>, _>("p_id")? {
        Some(profile_id) => Some(Profile {
            id: profile_id,
            created_at: row.try_get("p_created_at")?,
            update_at: row.try_get("p_update_at")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            age: row.try_get("age")?,
            gender: row.try_get("gender")?,
            profession: row.try_get("profession")?,
            interests: row.try_get("interests")?,
            contacts: row.try_get("contacts")?,
        }),
        None => None,
    };

    Ok(UserWithProfile { user, profile })
}
