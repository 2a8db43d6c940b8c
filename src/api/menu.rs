//! Role-gated dashboard menu.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Stable identifier.
    pub id: String,
    /// Label shown to the user.
    pub label: String,
    /// API path backing the entry.
    pub path: String,
}

impl MenuItem {
    fn new(id: &str, label: &str, path: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            path: path.to_string(),
        }
    }
}

/// Menu entries available to `role`.
///
/// Every role gets its own days and assignment submission. Managers add
/// the team overview and the review queue; admins also get the employee
/// directory.
pub fn menu_for(role: Role) -> Vec<MenuItem> {
    let mut items = vec![
        MenuItem::new("my_days", "My days", "/employees/{id}/days"),
        MenuItem::new("submit_assignment", "Submit assignment", "/assignments"),
    ];
    if matches!(role, Role::Manager | Role::Admin) {
        items.push(MenuItem::new("overview", "Team overview", "/overview"));
        items.push(MenuItem::new(
            "review_assignments",
            "Review assignments",
            "/assignments?status=pending",
        ));
    }
    if role == Role::Admin {
        items.push(MenuItem::new("employees", "Employees", "/employees"));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(role: Role) -> Vec<String> {
        menu_for(role).into_iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_employee_menu() {
        assert_eq!(ids(Role::Employee), vec!["my_days", "submit_assignment"]);
    }

    #[test]
    fn test_manager_menu_adds_review() {
        let ids = ids(Role::Manager);
        assert!(ids.contains(&"overview".to_string()));
        assert!(ids.contains(&"review_assignments".to_string()));
        assert!(!ids.contains(&"employees".to_string()));
    }

    #[test]
    fn test_admin_menu_is_superset() {
        let admin = ids(Role::Admin);
        for id in ids(Role::Manager) {
            assert!(admin.contains(&id));
        }
        assert!(admin.contains(&"employees".to_string()));
    }
}
