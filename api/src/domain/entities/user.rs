//! User domain entity
//!
//! A registered reader or editor of the site, plus the identity claim carried by their token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned by the database when none is given
pub const DEFAULT_ROLE: &str = "user";

/// Unique identifier for a user (serial primary key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i32);

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
}

/// Identity embedded in a signed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: UserId,
    pub email: String,
    pub role: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn for_user(user: &User, issued_at: DateTime<Utc>, ttl_secs: i64) -> Self {
        let iat = issued_at.timestamp();
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            iat,
            exp: iat + ttl_secs,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user() -> User {
        User {
            id: UserId(7),
            email: "ana@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            name: Some("Ana".to_string()),
            role: "editor".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn claims_carry_identity() {
        let issued = Utc.with_ymd_and_hms(2026, 1, 4, 12, 0, 0).unwrap();
        let claims = Claims::for_user(&user(), issued, 3600);

        assert_eq!(claims.id, UserId(7));
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.role, "editor");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn claims_expire_at_exp() {
        let issued = Utc.with_ymd_and_hms(2026, 1, 4, 12, 0, 0).unwrap();
        let claims = Claims::for_user(&user(), issued, 60);

        assert!(!claims.is_expired(issued + chrono::Duration::seconds(59)));
        assert!(claims.is_expired(issued + chrono::Duration::seconds(60)));
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_string(&user()).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("ana@example.com"));
    }

    #[test]
    fn user_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&UserId(3)).unwrap(), "3");
    }
}
