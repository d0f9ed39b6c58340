//! User types

use serde::{Deserialize, Serialize};

use crate::non_empty;

/// User login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Username and password, if both were supplied
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.username)?, non_empty(&self.password)?))
    }
}

/// User registration request
///
/// The password arrives already hashed; the server stores it verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub password_hash: Option<String>,
}

impl RegisterRequest {
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.username)?, non_empty(&self.password_hash)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_missing_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert!(req.credentials().is_none());

        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"alice","password":null}"#).unwrap();
        assert!(req.credentials().is_none());

        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"","password":"pw"}"#).unwrap();
        assert!(req.credentials().is_none());
    }

    #[test]
    fn test_register_request_credentials() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"alice","password_hash":"h1"}"#).unwrap();
        assert_eq!(req.credentials(), Some(("alice", "h1")));
    }
}
