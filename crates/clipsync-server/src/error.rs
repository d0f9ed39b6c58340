//! Error types for the clipboard server

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClipError>;

#[derive(Error, Debug)]
pub enum ClipError {
    /// A required request field was absent or empty; carries the message
    /// reported to the caller
    #[error("{0}")]
    MissingField(&'static str),

    #[error("Invalid username")]
    InvalidUsername,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("User already exists")]
    UserExists,

    /// Upload for a username that is not registered
    #[error("Invalid user")]
    InvalidUser,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

/// Coarse classification used to pick the HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingField,
    AuthFailure,
    Conflict,
    Internal,
}

impl ClipError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClipError::MissingField(_) => ErrorKind::MissingField,
            ClipError::InvalidUsername | ClipError::IncorrectPassword | ClipError::InvalidUser => {
                ErrorKind::AuthFailure
            }
            ClipError::UserExists => ErrorKind::Conflict,
            ClipError::Io(_)
            | ClipError::Json(_)
            | ClipError::Database(_)
            | ClipError::PasswordHash(_) => ErrorKind::Internal,
        }
    }
}

impl From<argon2::password_hash::Error> for ClipError {
    fn from(e: argon2::password_hash::Error) -> Self {
        ClipError::PasswordHash(e.to_string())
    }
}
