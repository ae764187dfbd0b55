// entities/mod.rs
pub mod base;
pub mod category;
pub mod comment;
pub mod location;
pub mod post;
pub mod prelude;
pub mod user;
