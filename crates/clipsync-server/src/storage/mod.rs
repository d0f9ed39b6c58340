//! Storage layer
//!
//! Credentials live in a flat JSON document; clipboard entries live in an
//! embedded SQLite table.

pub mod db;
pub mod quote;
pub mod users;

pub use db::Database;
pub use users::UserFile;
