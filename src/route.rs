//! 路由定义模块 - 领域模型
//!
//! Pure routing table; knows nothing about the DOM. The frontend router asks
//! [`resolve`] where a navigation should actually land.

use std::fmt::Display;

use storerate_shared::Role;

use crate::guard::{Access, evaluate};

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    #[default]
    Home,
    Login,
    Register,
    Stores,
    Profile,
    AdminDashboard,
    StoreOwnerDashboard,
    Unauthorized,
    NotFound,
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const STORE_OWNER_ONLY: &[Role] = &[Role::StoreOwner];
const USER_ONLY: &[Role] = &[Role::User];
const ANY_ROLE: &[Role] = &[];

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" | "/home" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/stores" => Self::Stores,
            "/profile" => Self::Profile,
            "/admin" | "/admin/dashboard" => Self::AdminDashboard,
            "/store-owner" | "/store-owner/dashboard" => Self::StoreOwnerDashboard,
            "/unauthorized" => Self::Unauthorized,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Stores => "/stores",
            Self::Profile => "/profile",
            Self::AdminDashboard => "/admin/dashboard",
            Self::StoreOwnerDashboard => "/store-owner/dashboard",
            Self::Unauthorized => "/unauthorized",
            Self::NotFound => "/404",
        }
    }

    /// Roles allowed in. `None` means public; an empty slice means any
    /// signed-in user.
    pub fn required_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::Stores => Some(USER_ONLY),
            Self::AdminDashboard => Some(ADMIN_ONLY),
            Self::StoreOwnerDashboard => Some(STORE_OWNER_ONLY),
            Self::Profile => Some(ANY_ROLE),
            Self::Home | Self::Login | Self::Register | Self::Unauthorized | Self::NotFound => {
                None
            }
        }
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn redirects_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Sign In",
            Self::Register => "Create Account",
            Self::Stores => "Stores",
            Self::Profile => "Profile",
            Self::AdminDashboard => "Admin Dashboard",
            Self::StoreOwnerDashboard => "Store Dashboard",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Not Found",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// Landing page after sign-in.
pub fn home_for(role: Role) -> AppRoute {
    match role {
        Role::Admin => AppRoute::AdminDashboard,
        Role::StoreOwner => AppRoute::StoreOwnerDashboard,
        Role::User => AppRoute::Stores,
    }
}

/// Where a navigation to `target` ends up for the given session role.
pub fn resolve(target: AppRoute, role: Option<Role>) -> AppRoute {
    if let (true, Some(role)) = (target.redirects_when_authenticated(), role) {
        return home_for(role);
    }
    let Some(required) = target.required_roles() else {
        return target;
    };
    match evaluate(required, role) {
        Access::Granted => target,
        Access::RedirectToLogin => AppRoute::Login,
        Access::RedirectToUnauthorized => AppRoute::Unauthorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_and_unknown_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/home"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::AdminDashboard);
        assert_eq!(AppRoute::from_path("/admin/dashboard/"), AppRoute::AdminDashboard);
        assert_eq!(AppRoute::from_path("/store-owner"), AppRoute::StoreOwnerDashboard);
        assert_eq!(AppRoute::from_path("/stores?x=1"), AppRoute::Stores);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn canonical_paths_parse_back() {
        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Stores,
            AppRoute::Profile,
            AppRoute::AdminDashboard,
            AppRoute::StoreOwnerDashboard,
            AppRoute::Unauthorized,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn role_homes() {
        assert_eq!(home_for(Role::Admin).to_path(), "/admin/dashboard");
        assert_eq!(home_for(Role::StoreOwner).to_path(), "/store-owner/dashboard");
        assert_eq!(home_for(Role::User).to_path(), "/stores");
    }

    #[test]
    fn signed_out_visitors() {
        assert_eq!(resolve(AppRoute::Stores, None), AppRoute::Login);
        assert_eq!(resolve(AppRoute::Profile, None), AppRoute::Login);
        assert_eq!(resolve(AppRoute::Home, None), AppRoute::Home);
        assert_eq!(resolve(AppRoute::Register, None), AppRoute::Register);
        assert_eq!(resolve(AppRoute::NotFound, None), AppRoute::NotFound);
    }

    #[test]
    fn signed_in_visitors() {
        let user = Some(Role::User);
        assert_eq!(resolve(AppRoute::AdminDashboard, user), AppRoute::Unauthorized);
        assert_eq!(resolve(AppRoute::Stores, user), AppRoute::Stores);
        assert_eq!(resolve(AppRoute::Profile, user), AppRoute::Profile);
        assert_eq!(resolve(AppRoute::Login, user), AppRoute::Stores);
        assert_eq!(
            resolve(AppRoute::Register, Some(Role::Admin)),
            AppRoute::AdminDashboard
        );
        assert_eq!(
            resolve(AppRoute::Stores, Some(Role::StoreOwner)),
            AppRoute::Unauthorized
        );
    }
}
