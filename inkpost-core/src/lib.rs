//! inkpost-core: configuration and shared error types
//!
//! Everything the data layer needs before it can touch the database:
//! where the connection URL comes from and how config failures surface.

pub mod config;
pub mod error;

pub use config::{AppConfig, DatabaseConfig};
pub use error::{CoreError, Result};
