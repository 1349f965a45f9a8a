//! 路由服务模块 - 核心引擎
//!
//! Owns every `window.history` call. Each navigation goes through
//! [`storerate::route::resolve`] first, so protected pages are never shown
//! to the wrong session, whether reached by a link, a typed URL, the
//! back button or a session change.

use leptos::prelude::*;
use storerate::route::{AppRoute, resolve};
use storerate_shared::Role;
use wasm_bindgen::prelude::*;

const APP_TITLE: &str = "Store Rating System";

/// 获取当前浏览器路径
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn replace_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 路由器服务
///
/// The session role is injected as a signal so the router does not depend
/// on the auth module.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// Browser path as last written, used for active-link highlighting.
    current_path: ReadSignal<String>,
    set_path: WriteSignal<String>,
    role: Signal<Option<Role>>,
}

impl RouterService {
    fn new(role: Signal<Option<Role>>) -> Self {
        let path = current_path();
        let requested = AppRoute::from_path(&path);
        let landed = resolve(requested, role.get_untracked());

        let path = if landed == requested {
            path
        } else {
            tracing::info!(from = %path, to = %landed, "initial route redirected");
            replace_history_state(landed.to_path());
            landed.to_path().to_string()
        };

        let (current_route, set_route) = signal(landed);
        let (current_path, set_path) = signal(path);
        Self {
            current_route,
            set_route,
            current_path,
            set_path,
            role,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn current_path(&self) -> ReadSignal<String> {
        self.current_path
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.go(path, true);
    }

    /// Like [`navigate`](Self::navigate) but without a new history entry.
    pub fn replace(&self, path: &str) {
        self.go(path, false);
    }

    pub fn back(&self) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.back();
        }
    }

    fn go(&self, path: &str, use_push: bool) {
        let requested = AppRoute::from_path(path);
        let landed = resolve(requested, self.role.get_untracked());

        let final_path = if landed == requested {
            path
        } else {
            tracing::info!(from = %path, to = %landed, "navigation redirected");
            landed.to_path()
        };

        if use_push {
            push_history_state(final_path);
        } else {
            replace_history_state(final_path);
        }
        self.commit(landed, final_path);
    }

    fn commit(&self, route: AppRoute, path: &str) {
        self.set_path.set(path.to_string());
        // Same route again keeps the mounted page (and its state).
        if self.current_route.get_untracked() != route {
            self.set_route.set(route);
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let requested = AppRoute::from_path(&path);
            let landed = resolve(requested, router.role.get_untracked());
            if landed == requested {
                router.commit(landed, &path);
            } else {
                replace_history_state(landed.to_path());
                router.commit(landed, landed.to_path());
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// Keeps `document.title` in step with the visible page.
    fn setup_title_sync(&self) {
        let router = *self;
        Effect::new(move |_| {
            let route = router.current_route.get();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                document.set_title(&format!("{} | {}", route.title(), APP_TITLE));
            }
        });
    }

    /// Re-checks the visible route whenever the session role changes.
    fn setup_auth_redirect(&self) {
        let router = *self;
        Effect::new(move |_| {
            let role = router.role.get();
            let route = router.current_route.get_untracked();
            let landed = resolve(route, role);
            if landed != route {
                tracing::info!(from = %route, to = %landed, "session changed, redirecting");
                push_history_state(landed.to_path());
                router.commit(landed, landed.to_path());
            }
        });
    }
}

fn provide_router(role: Signal<Option<Role>>) -> RouterService {
    let router = RouterService::new(role);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    router.setup_title_sync();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// Role of the current session, `None` when signed out.
    role: Signal<Option<Role>>,
    children: Children,
) -> impl IntoView {
    provide_router(role);
    children()
}

/// 路由出口组件
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current_route().get())
}

/// In-app anchor; plain clicks go through the router, modified clicks
/// (new tab and the like) are left to the browser.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(into, optional)] class: MaybeProp<String>,
    #[prop(optional)] on_navigate: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&to);
        if let Some(cb) = on_navigate {
            cb.run(());
        }
    };

    view! {
        <a href=href class=move || class.get().unwrap_or_default() on:click=on_click>
            {children()}
        </a>
    }
}
