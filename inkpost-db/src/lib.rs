//! inkpost-db: relational schema and async session layer
//!
//! Declares the four blog entities (users, profiles, posts, comments),
//! their relationships and cascade rules, and the PostgreSQL plumbing to
//! reach them: connection pool, short-lived sessions, and per-entity
//! repositories.
//!
//! # Design Principles
//!
//! - Integrity lives in the store: uniqueness, foreign keys, cascades, and
//!   enum domains are DDL constraints, not application checks
//! - One default per column, declared once in Rust and emitted into the DDL
//! - Sessions are short-lived units of work; dropping an uncommitted
//!   session rolls it back

pub mod db;
pub mod error;
pub mod models;
pub mod schema;

pub use db::pool::{connect, connect_from, connect_with_options};
pub use db::repos::{CommentRepo, PostRepo, ProfileRepo, UserRepo};
pub use db::session::Session;
pub use error::{DbError, DbResult};
pub use models::{
    Comment, CommentPatch, Gender, NewComment, NewPost, NewProfile, NewUser, Paginated,
    Pagination, Post, PostPatch, PostStatus, Profession, Profile, ProfilePatch, Rating, User,
    UserPatch, UserWithProfile,
};
