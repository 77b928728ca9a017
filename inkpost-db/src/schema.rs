//! Schema bootstrap - enum types, tables, cascade rules, timestamp triggers
//!
//! All integrity rules live here, in the store:
//!
//! - uniqueness on `users.username`, `users.email`, and `users.profile_id`
//!   (the one-to-one edge to profiles)
//! - foreign keys with an explicit deletion-propagation policy per edge:
//!   user->post CASCADE, user->comment CASCADE, post->comment CASCADE,
//!   profile->user SET NULL (profile deletion never deletes the user)
//! - enum columns typed with native Postgres enums generated from the Rust
//!   domains, so out-of-domain literals are rejected on any insert path
//! - `update_at` maintained by a BEFORE UPDATE trigger and `created_at`
//!   pinned by the same trigger, so both hold even for SQL issued outside
//!   this crate
//!
//! Every statement is idempotent; `create_all` can run at each startup.

use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::{Comment, Gender, PostStatus, Profession, Rating};

/// Storage table name policy: lower-cased entity name plus a plural `s`.
pub fn table_name(entity: &str) -> String {
    let mut name = entity.to_lowercase();
    name.push('s');
    name
}

/// Idempotent DDL for one enum type, generated from the Rust domain.
fn enum_ddl(type_name: &str, variants: &[&str]) -> String {
    let literals = variants
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "DO $$ BEGIN \
            CREATE TYPE {type_name} AS ENUM ({literals}); \
        EXCEPTION WHEN duplicate_object THEN NULL; \
        END $$"
    )
}

fn profiles_ddl() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id BIGSERIAL PRIMARY KEY,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            first_name TEXT NOT NULL,
            last_name TEXT,
            age INTEGER,
            gender gender NOT NULL,
            profession profession NOT NULL DEFAULT '{profession}',
            interests TEXT[],
            contacts JSONB
        )
        "#,
        profession = Profession::DEFAULT.as_str(),
    )
}

fn users_ddl() -> String {
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        update_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        profile_id BIGINT UNIQUE REFERENCES profiles(id) ON DELETE SET NULL
    )
    "#
    .to_owned()
}

fn posts_ddl() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id BIGSERIAL PRIMARY KEY,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            main_photo_url TEXT NOT NULL,
            photos_url TEXT[],
            status post_status NOT NULL DEFAULT '{status}',
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
        status = PostStatus::DEFAULT.as_str(),
    )
}

fn comments_ddl() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id BIGSERIAL PRIMARY KEY,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            content TEXT NOT NULL,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            post_id BIGINT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
            is_published BOOLEAN NOT NULL DEFAULT {is_published},
            rating rating NOT NULL DEFAULT '{rating}'
        )
        "#,
        is_published = Comment::DEFAULT_IS_PUBLISHED,
        rating = Rating::DEFAULT.as_str(),
    )
}

/// Trigger function shared by all four tables: refresh `update_at` on every
/// mutation and pin `created_at` to its insert-time value.
const TOUCH_FN_DDL: &str = r#"
    CREATE OR REPLACE FUNCTION touch_update_at() RETURNS trigger AS $$
    BEGIN
        NEW.created_at := OLD.created_at;
        NEW.update_at := now();
        RETURN NEW;
    END;
    $$ LANGUAGE plpgsql
"#;

const TABLES: &[&str] = &["profiles", "users", "posts", "comments"];

/// Create enum types, tables, triggers, and indexes.
pub async fn create_all(pool: &PgPool) -> DbResult<()> {
    tracing::info!("creating inkpost schema");

    sqlx::query(&enum_ddl(
        Gender::TYPE_NAME,
        &Gender::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>(),
    ))
    .execute(pool)
    .await?;
    sqlx::query(&enum_ddl(
        Profession::TYPE_NAME,
        &Profession::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>(),
    ))
    .execute(pool)
    .await?;
    sqlx::query(&enum_ddl(
        PostStatus::TYPE_NAME,
        &PostStatus::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>(),
    ))
    .execute(pool)
    .await?;
    sqlx::query(&enum_ddl(
        Rating::TYPE_NAME,
        &Rating::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>(),
    ))
    .execute(pool)
    .await?;

    // profiles first: users carries the FK to it
    sqlx::query(&profiles_ddl()).execute(pool).await?;
    sqlx::query(&users_ddl()).execute(pool).await?;
    sqlx::query(&posts_ddl()).execute(pool).await?;
    sqlx::query(&comments_ddl()).execute(pool).await?;

    sqlx::query(TOUCH_FN_DDL).execute(pool).await?;
    for table in TABLES {
        sqlx::query(&format!(
            "DROP TRIGGER IF EXISTS {table}_touch_update_at ON {table}"
        ))
        .execute(pool)
        .await?;
        sqlx::query(&format!(
            "CREATE TRIGGER {table}_touch_update_at \
             BEFORE UPDATE ON {table} \
             FOR EACH ROW EXECUTE FUNCTION touch_update_at()"
        ))
        .execute(pool)
        .await?;
    }

    create_indexes(pool).await?;

    tracing::info!("inkpost schema ready");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> DbResult<()> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_user ON posts(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_user ON comments(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Drop everything `create_all` creates. Test teardown only.
pub async fn drop_all(pool: &PgPool) -> DbResult<()> {
    for table in TABLES.iter().rev() {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table} CASCADE"))
            .execute(pool)
            .await?;
    }
    for ty in [
        Gender::TYPE_NAME,
        Profession::TYPE_NAME,
        PostStatus::TYPE_NAME,
        Rating::TYPE_NAME,
    ] {
        sqlx::query(&format!("DROP TYPE IF EXISTS {ty}"))
            .execute(pool)
            .await?;
    }
    sqlx::query("DROP FUNCTION IF EXISTS touch_update_at")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Post, Profile, User};

    #[test]
    fn table_name_policy() {
        assert_eq!(table_name("User"), User::TABLE);
        assert_eq!(table_name("Profile"), Profile::TABLE);
        assert_eq!(table_name("Post"), Post::TABLE);
        assert_eq!(table_name("Comment"), Comment::TABLE);
    }

    #[test]
    fn ownership_edges_cascade() {
        assert!(posts_ddl().contains("REFERENCES users(id) ON DELETE CASCADE"));
        assert!(comments_ddl().contains("REFERENCES users(id) ON DELETE CASCADE"));
        assert!(comments_ddl().contains("REFERENCES posts(id) ON DELETE CASCADE"));
    }

    #[test]
    fn profile_edge_does_not_cascade() {
        // One-to-one lives on users.profile_id: unique, and cleared rather
        // than cascaded when the profile goes away
        assert!(users_ddl().contains("profile_id BIGINT UNIQUE REFERENCES profiles(id) ON DELETE SET NULL"));
    }

    #[test]
    fn store_defaults_come_from_declared_constants() {
        assert!(profiles_ddl().contains("DEFAULT 'developer'"));
        assert!(posts_ddl().contains("DEFAULT 'published'"));
        assert!(comments_ddl().contains("is_published BOOLEAN NOT NULL DEFAULT true"));
        assert!(comments_ddl().contains("rating rating NOT NULL DEFAULT 'five'"));
    }

    #[test]
    fn enum_ddl_is_idempotent_and_ordered() {
        let ddl = enum_ddl("rating", &["one", "two", "three", "four", "five"]);
        assert!(ddl.contains("CREATE TYPE rating AS ENUM ('one', 'two', 'three', 'four', 'five')"));
        assert!(ddl.contains("duplicate_object"));
    }
}
