//! 认证服务
//!
//! Login, registration, logout and password change on top of [`ApiClient`]
//! and [`SessionStore`]. Failures come back as [`ApiError`] values, never
//! panics.

use storerate_shared::{RegisterRequest, Role, Session, User};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpClient;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AuthService<C> {
    api: ApiClient<C>,
}

impl<C: HttpClient> AuthService<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        self.api.session()
    }

    pub fn user(&self) -> Option<User> {
        self.session().user()
    }

    pub fn role(&self) -> Option<Role> {
        self.session().role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session().is_admin()
    }

    pub fn is_store_owner(&self) -> bool {
        self.session().is_store_owner()
    }

    /// Exchanges credentials for a session. On failure the current session,
    /// if any, is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let resp = self.api.login(email, password).await?;
        let user = resp.user.clone();
        self.session().establish(Session {
            token: resp.token,
            user: resp.user,
        });
        Ok(user)
    }

    /// Creates an account. The caller still has to sign in afterwards.
    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<()> {
        self.api.register(req).await?;
        tracing::info!(email = %req.email, "account registered");
        Ok(())
    }

    /// Local only; returns whether there was anything to clear.
    pub fn logout(&self) -> bool {
        self.session().clear()
    }

    pub async fn update_password(&self, new_password: &str) -> ApiResult<()> {
        self.api.update_password(new_password).await
    }

    /// Replaces the cached user with the server's copy.
    pub async fn refresh_profile(&self) -> ApiResult<User> {
        let user = self.api.profile().await?;
        self.session().update_user(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::{Access, evaluate};
    use crate::request::HttpResponse;
    use crate::request::mock::MockHttpClient;
    use crate::route::{AppRoute, resolve};
    use crate::session::MemoryStorage;
    use crate::session::tests::session;
    use storerate_shared::HttpMethod;

    fn service(mock: &MockHttpClient) -> AuthService<MockHttpClient> {
        let session = SessionStore::restore(MemoryStorage::new());
        AuthService::new(ApiClient::new("http://api.test", mock.clone(), session))
    }

    fn login_ok() -> MockHttpClient {
        MockHttpClient::new(|req| {
            let body: serde_json::Value =
                serde_json::from_str(req.body.as_deref().unwrap_or("{}")).unwrap();
            if body["password"] == "Secret1!" {
                Ok(HttpResponse::new(
                    200,
                    r#"{"token":"jwt-123","user":{"id":7,"name":"Regular Person Of Town","email":"a@b.com","role":"user"}}"#,
                ))
            } else {
                Ok(HttpResponse::new(401, r#"{"message":"Invalid credentials"}"#))
            }
        })
    }

    #[tokio::test]
    async fn login_stores_token_and_user() {
        let mock = login_ok();
        let auth = service(&mock);

        let user = auth.login("a@b.com", "Secret1!").await.unwrap();
        assert_eq!(user.role, Role::User);
        assert!(auth.is_authenticated());
        assert_eq!(auth.session().token().as_deref(), Some("jwt-123"));
        assert_eq!(mock.calls(), vec!["POST http://api.test/auth/login"]);
    }

    #[tokio::test]
    async fn user_login_is_refused_admin_dashboard() {
        let auth = service(&login_ok());
        auth.login("a@b.com", "Secret1!").await.unwrap();

        let route = AppRoute::from_path("/admin/dashboard");
        assert_eq!(
            evaluate(route.required_roles().unwrap_or_default(), auth.role()),
            Access::RedirectToUnauthorized
        );
        assert_eq!(resolve(route, auth.role()), AppRoute::Unauthorized);
    }

    #[tokio::test]
    async fn bad_credentials_keep_session_unset() {
        let auth = service(&login_ok());
        let err = auth.login("a@b.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn failed_relogin_keeps_current_session() {
        let mock = login_ok();
        let auth = service(&mock);
        auth.login("a@b.com", "Secret1!").await.unwrap();

        auth.login("a@b.com", "wrong").await.unwrap_err();
        assert!(auth.is_authenticated());
        assert_eq!(auth.session().token().as_deref(), Some("jwt-123"));
        assert_eq!(mock.requests()[1].header("Authorization"), None);
    }

    #[tokio::test]
    async fn register_does_not_sign_in() {
        let mock = MockHttpClient::fixed(201, r#"{"message":"User registered successfully"}"#);
        let auth = service(&mock);
        let req = RegisterRequest {
            name: "Someone With A Long Name".into(),
            email: "new@b.com".into(),
            address: None,
            password: "Secret1!".into(),
        };
        auth.register(&req).await.unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(mock.requests()[0].method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn logout_is_local_and_idempotent() {
        let mock = MockHttpClient::fixed(500, "");
        let auth = service(&mock);
        auth.session().establish(session(Role::StoreOwner));

        assert!(auth.logout());
        assert!(!auth.logout());
        assert!(!auth.is_authenticated());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn update_password_is_an_authenticated_put() {
        let mock = MockHttpClient::fixed(200, r#"{"message":"Password updated"}"#);
        let auth = service(&mock);
        auth.session().establish(session(Role::User));

        auth.update_password("NewSecret1!").await.unwrap();
        let req = &mock.requests()[0];
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.header("Authorization"), Some("Bearer tok-1"));
    }

    #[tokio::test]
    async fn refresh_profile_replaces_cached_user() {
        let mock = MockHttpClient::fixed(
            200,
            r#"{"user":{"id":1,"name":"Alexandra Montgomery-Smith","email":"a@b.com","address":"9 Elm","role":"user"}}"#,
        );
        let auth = service(&mock);
        auth.session().establish(session(Role::User));

        let user = auth.refresh_profile().await.unwrap();
        assert_eq!(user.address.as_deref(), Some("9 Elm"));
        assert_eq!(auth.user(), Some(user));
        assert_eq!(auth.session().token().as_deref(), Some("tok-1"));
    }
}
