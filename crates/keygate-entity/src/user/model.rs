//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
///
/// An account is reachable through a password, a federated identity, or
/// both; `password_hash` is absent for purely federated accounts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address (unique).
    pub email: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Argon2 password hash, absent for federated-only accounts.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Federated provider identifier (unique when present).
    pub google_id: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether this account can authenticate with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Check whether this account is linked to a federated identity.
    pub fn is_federated(&self) -> bool {
        self.google_id.is_some()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Pre-hashed password (optional).
    pub password_hash: Option<String>,
    /// Federated provider identifier (optional).
    pub google_id: Option<String>,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// The user ID to update.
    pub id: Uuid,
    /// New display name.
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(password_hash: Option<&str>, google_id: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            display_name: None,
            password_hash: password_hash.map(String::from),
            google_id: google_id.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_auth_paths() {
        assert!(user(Some("$argon2id$..."), None).has_password());
        assert!(!user(None, Some("g-123")).has_password());
        assert!(user(None, Some("g-123")).is_federated());
        assert!(user(Some("$argon2id$..."), Some("g-123")).is_federated());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(user(Some("secret-hash"), None)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json.get("email").unwrap(), "a@x.com");
    }
}
