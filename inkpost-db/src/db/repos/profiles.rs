//! Profile repository
//!
//! A profile lives independently of its user: deleting one clears
//! `users.profile_id` (store-side SET NULL) but never deletes the user.
//!
//! Plain methods run against the pool; `_in` variants take any
//! [`PgExecutor`] so the query can join a [`Session`](crate::Session).

use sqlx::{PgExecutor, PgPool};

use crate::error::{DbError, DbResult};
use crate::models::{NewProfile, Profession, Profile, ProfilePatch};

const PROFILE_COLUMNS: &str = "id, created_at, update_at, first_name, last_name, age, gender, \
                               profession, interests, contacts";

/// Profile repository
pub struct ProfileRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a profile. `profession: None` takes the declared default.
    pub async fn create(&self, profile: NewProfile) -> DbResult<Profile> {
        self.create_in(self.pool, profile).await
    }

    pub async fn create_in<'e, E>(&self, executor: E, profile: NewProfile) -> DbResult<Profile>
    where
        E: PgExecutor<'e>,
    {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "INSERT INTO profiles (first_name, last_name, age, gender, profession, interests, contacts) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.age)
        .bind(profile.gender)
        .bind(profile.profession.unwrap_or(Profession::DEFAULT))
        .bind(&profile.interests)
        .bind(&profile.contacts)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }

    pub async fn get(&self, id: i64) -> DbResult<Profile> {
        self.get_in(self.pool, id).await
    }

    pub async fn get_in<'e, E>(&self, executor: E, id: i64) -> DbResult<Profile>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "profile",
            id: id.to_string(),
        })
    }

    /// Apply a patch; absent fields keep their current values.
    pub async fn update(&self, id: i64, patch: ProfilePatch) -> DbResult<Profile> {
        self.update_in(self.pool, id, patch).await
    }

    pub async fn update_in<'e, E>(
        &self,
        executor: E,
        id: i64,
        patch: ProfilePatch,
    ) -> DbResult<Profile>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Profile>(&format!(
            "UPDATE profiles SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                age = COALESCE($4, age), \
                gender = COALESCE($5, gender), \
                profession = COALESCE($6, profession), \
                interests = COALESCE($7, interests), \
                contacts = COALESCE($8, contacts) \
             WHERE id = $1 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.first_name)
        .bind(patch.last_name)
        .bind(patch.age)
        .bind(patch.gender)
        .bind(patch.profession)
        .bind(patch.interests)
        .bind(patch.contacts)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "profile",
            id: id.to_string(),
        })
    }

    /// Delete a profile. Any user pointing at it gets `profile_id` cleared
    /// by the store; the user row survives.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.delete_in(self.pool, id).await
    }

    pub async fn delete_in<'e, E>(&self, executor: E, id: i64) -> DbResult<()>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "profile",
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
