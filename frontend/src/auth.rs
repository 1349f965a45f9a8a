//! 认证模块
//!
//! Reactive face of the core [`AuthService`]. The session store stays the
//! single source of truth; a subscription mirrors every change into a
//! signal, so views and the router re-render on login, logout and implicit
//! logout after a rejected token alike.

use leptos::prelude::*;
use storerate::api::ApiClient;
use storerate::auth::AuthService;
use storerate::config::ClientConfig;
use storerate::error::ApiResult;
use storerate_shared::{RegisterRequest, Role, Session, User};

use crate::web::{BrowserStorage, FetchHttpClient};

pub type Api = ApiClient<FetchHttpClient>;
pub type Auth = AuthService<FetchHttpClient>;

/// 认证上下文
///
/// `Copy`, so it can be captured by any number of view closures.
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: ReadSignal<Option<Session>>,
    service: StoredValue<Auth, LocalStorage>,
}

impl AuthContext {
    /// Restores any persisted session and starts mirroring it.
    pub fn new(config: &ClientConfig) -> Self {
        let service = storerate::connect(config, FetchHttpClient, BrowserStorage);
        let (session, set_session) = signal(service.session().current());
        service
            .session()
            .subscribe(move |current| set_session.set(current.cloned()));

        Self {
            session,
            service: StoredValue::new_local(service),
        }
    }

    /// Owned handle for async work.
    pub fn service(&self) -> Auth {
        self.service.get_value()
    }

    pub fn api(&self) -> Api {
        self.service.with_value(|s| s.api().clone())
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    pub fn role(&self) -> Option<Role> {
        self.session.with(|s| s.as_ref().map(Session::role))
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Option::is_some)
    }

    /// 获取角色信号（用于路由服务注入）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let ctx = *self;
        Signal::derive(move || ctx.role())
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        self.service().login(email, password).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<()> {
        self.service().register(req).await
    }

    /// 注销并清除状态
    ///
    /// The router reacts to the session signal and leaves protected pages
    /// on its own.
    pub fn logout(&self) {
        self.service.with_value(|s| s.logout());
    }

    pub async fn update_password(&self, password: &str) -> ApiResult<()> {
        self.service().update_password(password).await
    }

    pub async fn refresh_profile(&self) -> ApiResult<User> {
        self.service().refresh_profile().await
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
