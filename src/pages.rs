use serde::{Deserialize, Serialize};

use crate::users::repo::Role;

/// Identifier of a UI section. Employees carry a whitelist of these on their
/// account; admins implicitly hold all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "page", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Dashboard,
    Toys,
    Rentals,
    Customers,
    Finance,
    Reports,
    Users,
    Settings,
}

// The derive does not cover array binds; users.allowed_pages is a page[].
impl sqlx::postgres::PgHasArrayType for Page {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_page")
    }
}

/// The static menu, in display order.
pub const MENU: [Page; 8] = [
    Page::Dashboard,
    Page::Toys,
    Page::Rentals,
    Page::Customers,
    Page::Finance,
    Page::Reports,
    Page::Users,
    Page::Settings,
];

pub fn can_access(role: Role, allowed: &[Page], page: Page) -> bool {
    role == Role::Admin || allowed.contains(&page)
}

/// Menu entries visible to a session: everything for admins, the
/// intersection of the menu and the whitelist for employees, menu order
/// preserved.
pub fn visible_pages(role: Role, allowed: &[Page]) -> Vec<Page> {
    MENU.iter()
        .copied()
        .filter(|p| can_access(role, allowed, *p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_array_maps_to_the_postgres_array_type() {
        use sqlx::postgres::PgHasArrayType;
        assert_eq!(Page::array_type_info().to_string(), "_page");
    }

    #[test]
    fn admin_sees_full_menu() {
        assert_eq!(visible_pages(Role::Admin, &[]), MENU.to_vec());
    }

    #[test]
    fn employee_sees_only_whitelisted_pages() {
        let allowed = vec![Page::Rentals, Page::Toys];
        let visible = visible_pages(Role::Employee, &allowed);
        // menu order, not whitelist order
        assert_eq!(visible, vec![Page::Toys, Page::Rentals]);
    }

    #[test]
    fn employee_with_empty_whitelist_sees_nothing() {
        assert!(visible_pages(Role::Employee, &[]).is_empty());
    }

    #[test]
    fn can_access_checks_whitelist_for_employees_only() {
        assert!(can_access(Role::Admin, &[], Page::Users));
        assert!(can_access(Role::Employee, &[Page::Finance], Page::Finance));
        assert!(!can_access(Role::Employee, &[Page::Finance], Page::Users));
    }
}
