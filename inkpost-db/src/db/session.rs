//! Short-lived units of work over a pooled connection
//!
//! One logical operation acquires one session, does its reads and writes
//! through [`Session::conn`], and finishes with [`Session::commit`].
//! Dropping an uncommitted session rolls the transaction back, so release
//! is guaranteed on every exit path including `?` and panics. Sessions are
//! not `Clone` and must not be shared across concurrent operations; row
//! serialization is the store's job.

use sqlx::postgres::PgConnection;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::DbResult;

/// A transactional unit of work.
pub struct Session {
    tx: Transaction<'static, Postgres>,
}

impl Session {
    /// Begin a session on a pooled connection.
    pub async fn begin(pool: &PgPool) -> DbResult<Self> {
        let tx = pool.begin().await?;
        Ok(Self { tx })
    }

    /// Executor for queries inside this session.
    ///
    /// ```ignore
    /// let mut session = Session::begin(&pool).await?;
    /// sqlx::query("DELETE FROM comments WHERE post_id = $1")
    ///     .bind(post_id)
    ///     .execute(session.conn())
    ///     .await?;
    /// session.commit().await?;
    /// ```
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Consume the session and hand back the raw transaction, for callers
    /// that need sqlx APIs not surfaced here.
    pub fn into_inner(self) -> Transaction<'static, Postgres> {
        self.tx
    }

    /// Commit the unit of work. All-or-nothing: either this succeeds and
    /// every write lands, or the transaction is gone and none did.
    pub async fn commit(self) -> DbResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Roll back explicitly. Dropping the session does the same; this form
    /// surfaces rollback errors instead of swallowing them.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
