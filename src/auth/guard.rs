use axum::http::StatusCode;
use tracing::error;
use uuid::Uuid;

use crate::{
    pages::{can_access, Page},
    state::AppState,
    users::repo::{Role, User},
};

/// Load the caller's staff record; the token may outlive the account.
pub async fn require_user(state: &AppState, user_id: Uuid) -> Result<User, (StatusCode, String)> {
    match User::find_by_id(&state.db, user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err((
            StatusCode::UNAUTHORIZED,
            "Account no longer exists".to_string(),
        )),
        Err(e) => {
            error!(error = %e, %user_id, "load current user failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

pub fn require_admin(user: &User) -> Result<(), (StatusCode, String)> {
    if user.role != Role::Admin {
        return Err((StatusCode::FORBIDDEN, "Admin access required".to_string()));
    }
    Ok(())
}

pub fn require_page(user: &User, page: Page) -> Result<(), (StatusCode, String)> {
    if !can_access(user.role, &user.allowed_pages, page) {
        return Err((
            StatusCode::FORBIDDEN,
            "Page not allowed for this account".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn employee(pages: Vec<Page>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Staff".into(),
            email: "staff@example.com".into(),
            password_hash: "x".into(),
            role: Role::Employee,
            allowed_pages: pages,
            photo_url: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn employee_is_not_admin() {
        let user = employee(vec![]);
        assert!(require_admin(&user).is_err());
    }

    #[test]
    fn page_guard_follows_whitelist() {
        let user = employee(vec![Page::Rentals]);
        assert!(require_page(&user, Page::Rentals).is_ok());
        assert_eq!(
            require_page(&user, Page::Finance).unwrap_err().0,
            StatusCode::FORBIDDEN
        );
    }
}
