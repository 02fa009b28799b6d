use serde::Serialize;
use uuid::Uuid;

/// A registered account.
///
/// The password hash is a PHC-format string produced by the credential
/// service. It stays inside the server; API responses carry
/// [`UserProfile`] instead.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// Public view of a user, safe to return to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
        };

        let json = serde_json::to_string(&UserProfile::from(&user)).unwrap();

        assert!(json.contains("alice"));
        assert!(!json.contains("argon2id"));
    }
}
