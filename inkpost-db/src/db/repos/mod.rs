//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Constraint violations surface as classified DbError variants
//! - Transactions for multi-step operations
//! - Deletes lean on the store's cascade rules, never manual traversal

pub mod comments;
pub mod posts;
pub mod profiles;
pub mod users;

pub use comments::CommentRepo;
pub use posts::PostRepo;
pub use profiles::ProfileRepo;
pub use users::UserRepo;
