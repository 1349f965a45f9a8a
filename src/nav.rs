use storerate_shared::Role;

use crate::route::AppRoute;

/// One link in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub route: AppRoute,
    pub label: &'static str,
    pub icon: Option<&'static str>,
    /// Path prefix that marks the link active.
    pub section: &'static str,
    /// Rendered as a call-to-action button.
    pub emphasized: bool,
}

impl NavItem {
    const fn plain(route: AppRoute, label: &'static str, section: &'static str) -> Self {
        Self {
            route,
            label,
            icon: None,
            section,
            emphasized: false,
        }
    }

    const fn with_icon(
        route: AppRoute,
        label: &'static str,
        icon: &'static str,
        section: &'static str,
    ) -> Self {
        Self {
            route,
            label,
            icon: Some(icon),
            section,
            emphasized: false,
        }
    }

    pub fn href(&self) -> &'static str {
        match self.route {
            // Signed-out visitors get the explicit alias.
            AppRoute::Home => "/home",
            other => other.to_path(),
        }
    }

    pub fn is_active(&self, current_path: &str) -> bool {
        is_within(self.section, current_path)
    }
}

/// `path` equals `section` or lies below it.
pub fn is_within(section: &str, path: &str) -> bool {
    path == section
        || path
            .strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Links for the given session; the logout button is not a link and is
/// rendered separately whenever a role is present.
pub fn nav_items(role: Option<Role>) -> Vec<NavItem> {
    let Some(role) = role else {
        let mut register = NavItem::plain(AppRoute::Register, "Register", "/register");
        register.emphasized = true;
        return vec![
            NavItem::plain(AppRoute::Home, "Home", "/home"),
            NavItem::plain(AppRoute::Login, "Login", "/login"),
            register,
        ];
    };

    let dashboard = match role {
        Role::Admin => NavItem::with_icon(AppRoute::AdminDashboard, "Admin Dashboard", "⚙️", "/admin"),
        Role::StoreOwner => NavItem::with_icon(
            AppRoute::StoreOwnerDashboard,
            "Store Dashboard",
            "🏪",
            "/store-owner",
        ),
        Role::User => NavItem::with_icon(AppRoute::Stores, "Stores", "🏬", "/stores"),
    };
    vec![
        dashboard,
        NavItem::with_icon(AppRoute::Profile, "Profile", "👤", "/profile"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(role: Option<Role>) -> Vec<&'static str> {
        nav_items(role).iter().map(|i| i.label).collect()
    }

    #[test]
    fn items_per_role() {
        assert_eq!(labels(None), vec!["Home", "Login", "Register"]);
        assert_eq!(labels(Some(Role::Admin)), vec!["Admin Dashboard", "Profile"]);
        assert_eq!(labels(Some(Role::StoreOwner)), vec!["Store Dashboard", "Profile"]);
        assert_eq!(labels(Some(Role::User)), vec!["Stores", "Profile"]);
    }

    #[test]
    fn signed_out_home_uses_alias() {
        assert_eq!(nav_items(None)[0].href(), "/home");
        assert!(nav_items(None)[2].emphasized);
    }

    #[test]
    fn section_matching() {
        let admin = nav_items(Some(Role::Admin))[0];
        assert!(admin.is_active("/admin"));
        assert!(admin.is_active("/admin/dashboard"));
        assert!(!admin.is_active("/administrator"));
        assert!(!is_within("/stores", "/store-owner/dashboard"));
    }
}
