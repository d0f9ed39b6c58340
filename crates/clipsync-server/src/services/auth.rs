//! Authentication service

use crate::error::{ClipError, Result};
use crate::storage::UserFile;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AuthService {
    users: Arc<UserFile>,
}

impl AuthService {
    pub fn new(users: Arc<UserFile>) -> Self {
        Self { users }
    }

    /// Check a username/password pair against the credential document.
    ///
    /// Unknown usernames and wrong passwords are reported separately.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() || password.is_empty() {
            return Err(ClipError::MissingField("Missing fields"));
        }

        let stored_hash = self
            .users
            .get_hash(username)
            .await?
            .ok_or(ClipError::InvalidUsername)?;

        if is_bcrypt_hash(&stored_hash) {
            return match bcrypt::verify(password, &stored_hash) {
                Ok(true) => Ok(()),
                Ok(false) => Err(ClipError::IncorrectPassword),
                Err(e) => {
                    warn!("Unusable bcrypt hash stored for {}: {}", username, e);
                    Err(ClipError::IncorrectPassword)
                }
            };
        }

        // Anything else must be a PHC string; unparseable values never match
        let parsed_hash = match PasswordHash::new(&stored_hash) {
            Ok(hash) => hash,
            Err(e) => {
                warn!("Unusable password hash stored for {}: {}", username, e);
                return Err(ClipError::IncorrectPassword);
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| ClipError::IncorrectPassword)
    }

    /// Register a user with a caller-supplied password hash, stored verbatim.
    pub async fn register(&self, username: &str, password_hash: &str) -> Result<()> {
        if username.is_empty() || password_hash.is_empty() {
            return Err(ClipError::MissingField("Missing fields"));
        }

        if !self.users.insert_new(username, password_hash).await? {
            return Err(ClipError::UserExists);
        }

        info!("Registered user: {}", username);
        Ok(())
    }

    pub async fn user_exists(&self, username: &str) -> Result<bool> {
        self.users.contains(username).await
    }

    pub async fn user_count(&self) -> Result<usize> {
        self.users.count().await
    }
}

/// Modular-crypt bcrypt prefixes (`$2a$`, `$2b$`, `$2x$`, `$2y$`)
fn is_bcrypt_hash(hash: &str) -> bool {
    matches!(hash.get(..4), Some("$2a$" | "$2b$" | "$2x$" | "$2y$"))
}

/// Produce a PHC-format Argon2 hash accepted by [`AuthService::authenticate`].
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn service(dir: &tempfile::TempDir) -> AuthService {
        AuthService::new(Arc::new(UserFile::new(dir.path().join("users.json"))))
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service(&dir);

        auth.register("alice", "h1").await.unwrap();
        let err = auth.register("alice", "h2").await.unwrap_err();

        assert!(matches!(err, ClipError::UserExists));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(auth.user_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service(&dir);
        let hash = hash_password("correct horse").unwrap();
        auth.register("alice", &hash).await.unwrap();

        assert!(matches!(
            auth.authenticate("mallory", "correct horse").await,
            Err(ClipError::InvalidUsername)
        ));
        assert!(matches!(
            auth.authenticate("alice", "battery staple").await,
            Err(ClipError::IncorrectPassword)
        ));
        auth.authenticate("alice", "correct horse").await.unwrap();
    }

    #[tokio::test]
    async fn test_login_with_bcrypt_hash() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service(&dir);
        let hash = bcrypt::hash("password", 4).unwrap();
        assert!(hash.starts_with("$2b$"));
        auth.register("alice", &hash).await.unwrap();

        auth.authenticate("alice", "password").await.unwrap();
        assert!(matches!(
            auth.authenticate("alice", "Password").await,
            Err(ClipError::IncorrectPassword)
        ));
    }

    #[tokio::test]
    async fn test_truncated_bcrypt_hash_never_matches() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service(&dir);
        auth.register("alice", "$2b$12$tooshort").await.unwrap();

        assert!(matches!(
            auth.authenticate("alice", "password").await,
            Err(ClipError::IncorrectPassword)
        ));
    }

    #[test]
    fn test_bcrypt_prefix_detection() {
        assert!(is_bcrypt_hash("$2y$10$abc"));
        assert!(!is_bcrypt_hash("$argon2id$v=19$m=19456,t=2,p=1$abc"));
        assert!(!is_bcrypt_hash("h1"));
    }

    #[tokio::test]
    async fn test_plaintext_hash_never_matches() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service(&dir);
        auth.register("alice", "h1").await.unwrap();

        assert!(matches!(
            auth.authenticate("alice", "h1").await,
            Err(ClipError::IncorrectPassword)
        ));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let auth = service(&dir);

        assert!(matches!(
            auth.authenticate("", "pw").await,
            Err(ClipError::MissingField(_))
        ));
        assert!(matches!(
            auth.register("alice", "").await,
            Err(ClipError::MissingField(_))
        ));
        assert_eq!(auth.user_count().await.unwrap(), 0);
    }
}
