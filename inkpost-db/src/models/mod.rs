//! Entity records, insert/update payloads, and enum domains
//!
//! Each entity module declares the row struct (`FromRow`), a `New*` insert
//! payload, and a `*Patch` update payload with all-optional fields.
//! Defaulted columns are `Option` in the payloads; `None` means "take the
//! declared default".

pub mod comment;
pub mod enums;
pub mod pagination;
pub mod post;
pub mod profile;
pub mod user;

pub use comment::{Comment, CommentPatch, NewComment};
pub use enums::{Gender, InvalidEnumValue, PostStatus, Profession, Rating};
pub use pagination::{Paginated, Pagination};
pub use post::{NewPost, Post, PostPatch};
pub use profile::{NewProfile, Profile, ProfilePatch};
pub use user::{NewUser, User, UserPatch, UserWithProfile};
