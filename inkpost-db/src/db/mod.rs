//! Database layer - connection pool, sessions, and repositories
//!
//! # Design Principles
//!
//! - Connection pool - no Arc<Mutex<Connection>>
//! - Rely on DB constraints, handle violations - no check-then-insert
//! - Sessions (transactions) for multi-step operations; drop = rollback

pub mod pool;
pub mod repos;
pub mod session;

pub use pool::connect;
pub use repos::*;
pub use session::Session;
