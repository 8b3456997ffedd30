use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pages::Page;

use super::repo::{Role, User};

/// Staff account as returned to clients (no password hash).
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub allowed_pages: Vec<Page>,
    pub photo_url: Option<String>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            allowed_pages: u.allowed_pages,
            photo_url: u.photo_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub allowed_pages: Vec<Page>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub allowed_pages: Option<Vec<Page>>,
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn public_user_serialization_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password_hash: "argon2-secret".into(),
            role: Role::Employee,
            allowed_pages: vec![Page::Rentals],
            photo_url: None,
            created_at: OffsetDateTime::now_utc(),
        };

        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("ana@example.com"));
        assert!(json.contains("\"EMPLOYEE\""));
        assert!(json.contains("\"rentals\""));
        assert!(!json.contains("argon2-secret"));
    }
}
