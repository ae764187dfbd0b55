// lib.rs
//! Data model of the blog: posts, categories, locations and comments.

pub mod config;
pub mod entities;
pub mod error;
pub mod meta;
pub mod migration;
pub mod schema;
pub mod store;

pub use config::Config;
pub use error::{Error, IntegrityError, Result};
pub use migration::Migrator;
