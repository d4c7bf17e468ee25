//! User account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user account.
///
/// The password hash is deliberately excluded from serialization so the
/// type can be returned from API handlers as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Database ID.
    pub id: i64,
    /// Email address, unique across all users.
    pub email: String,
    /// Argon2 password hash. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    /// Already-hashed password. Hashing happens at the HTTP boundary,
    /// the store never sees a plaintext password.
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: 1,
            email: "user@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("user@example.com"));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
    }
}
