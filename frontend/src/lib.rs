//! Store Rating 前端应用
//!
//! Context-driven layout:
//! - `web::router`: navigation engine, every transition runs the core route guard
//! - `auth`: reactive mirror of the core session store
//! - `components`: pages and shared UI pieces

mod auth;
mod components {
    pub mod admin_dashboard;
    pub mod common;
    pub mod error_pages;
    pub mod home;
    pub mod login;
    pub mod navbar;
    pub mod profile;
    pub mod register;
    pub mod store_owner_dashboard;
    pub mod stores;
}

use leptos::prelude::*;
use storerate::config::{ClientConfig, ConfigError};
use storerate::route::AppRoute;

use crate::auth::AuthContext;
use crate::components::admin_dashboard::AdminDashboardPage;
use crate::components::error_pages::{NotFoundPage, UnauthorizedPage};
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::store_owner_dashboard::StoreOwnerDashboardPage;
use crate::components::stores::StoresPage;

// 原生 Web API 封装模块
// Thin wrappers written directly against `web_sys` instead of the gloo-*
// crates, to keep the WASM binary small.
pub(crate) mod web {
    pub mod console;
    pub mod dialog;
    mod http;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchHttpClient;
    pub use storage::BrowserStorage;
    pub use timer::Timeout;
}

pub use web::console::init as init_logging;

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// Only ever sees routes the guard already admitted.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Stores => view! { <StoresPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::StoreOwnerDashboard => view! { <StoreOwnerDashboardPage /> }.into_any(),
        AppRoute::Unauthorized => view! { <UnauthorizedPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
fn Shell(config: ClientConfig) -> impl IntoView {
    // 1. 创建认证上下文（恢复已保存的会话）
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    // 2. 角色信号注入路由服务
    let role = auth_ctx.role_signal();

    view! {
        <Router role=role>
            <div class="min-h-screen bg-base-200 flex flex-col">
                <Navbar />
                <main class="flex-1">
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
        </Router>
    }
}

#[component]
pub fn App(config: Result<ClientConfig, ConfigError>) -> impl IntoView {
    view! {
        <ErrorBoundary fallback=|errors| {
            view! {
                <div class="hero min-h-screen bg-base-200">
                    <div class="hero-content text-center">
                        <div class="max-w-md">
                            <div class="text-6xl mb-4">"⚠️"</div>
                            <h1 class="text-3xl font-bold">"Something went wrong"</h1>
                            <ul class="py-4 text-base-content/70">
                                {move || {
                                    errors
                                        .get()
                                        .into_iter()
                                        .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                        .collect_view()
                                }}
                            </ul>
                            <button class="btn btn-primary" on:click=|_| {
                                if let Some(window) = web_sys::window() {
                                    let _ = window.location().reload();
                                }
                            }>
                                "Reload"
                            </button>
                        </div>
                    </div>
                </div>
            }
        }>
            {config.map(|config| view! { <Shell config=config /> }.into_any())}
        </ErrorBoundary>
    }
}
