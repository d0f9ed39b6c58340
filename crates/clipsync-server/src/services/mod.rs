//! Business logic services

pub mod auth;
pub mod clipboard;

pub use auth::{hash_password, AuthService};
pub use clipboard::ClipboardService;
