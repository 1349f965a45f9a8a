use serde::de::DeserializeOwned;
use storerate_shared::{
    AdminStoreFilters, ApiRequest, CreateStoreRequest, CreateUserRequest, DashboardStats,
    DashboardStatsRequest, DeleteRatingRequest, DeleteStoreRequest, DeleteUserRequest,
    HEADER_AUTHORIZATION, ListAdminStoresRequest, ListStoresRequest, ListUsersRequest,
    LoginRequest, LoginResponse, MyRatingRequest, MyStoreRequest, OwnerStore, ProfileRequest,
    Rating, RatingValue, RecordId, RegisterRequest, Store, StoreDetailRequest, StoreFilters,
    SubmitRatingRequest, UpdatePasswordRequest, UpdateRatingRequest, User, UserDetailRequest,
    UserFilters,
};

use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest};
use crate::session::SessionStore;

// =========================================================
// API 客户端: base URL + bearer credential + typed decode
// =========================================================

/// The one HTTP adapter of the application.
///
/// Accepts any [`HttpClient`], so the browser uses `fetch` and tests use a
/// scripted mock.
#[derive(Clone)]
pub struct ApiClient<C> {
    base_url: String,
    client: C,
    session: SessionStore,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(base_url: &str, client: C, session: SessionStore) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送强类型请求并获取解析后的响应
    pub async fn send<T: ApiRequest>(&self, req: &T) -> ApiResult<T::Response> {
        let url = self.url(&req.path());
        let mut http = HttpRequest::new(&url, T::METHOD).with_header("Accept", "application/json");

        let token = if T::AUTHENTICATED {
            self.session.token()
        } else {
            None
        };
        if let Some(token) = &token {
            http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        if T::METHOD.carries_body() {
            let body = serde_json::to_string(req).map_err(|e| ApiError::Encode(e.to_string()))?;
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        tracing::debug!(method = T::METHOD.as_str(), url = %url, "api request");

        let resp = self.client.send(http).await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "request did not reach the server");
            ApiError::Network(e.0)
        })?;

        if !resp.ok() {
            let err = ApiError::from_status(resp.status, &resp.body);
            tracing::warn!(status = resp.status, url = %url, message = %err, "request failed");
            // Only the credential that was actually rejected gets dropped; a
            // newer login that raced this request stays.
            if err.is_unauthorized() && token.is_some() && self.session.token() == token {
                tracing::info!("bearer token rejected, signing out");
                self.session.clear();
            }
            return Err(err);
        }

        decode::<T::Response>(&resp.body)
    }

    // --- auth ---

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.send(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<()> {
        self.send(req).await.map(|_| ())
    }

    pub async fn profile(&self) -> ApiResult<User> {
        Ok(self.send(&ProfileRequest).await?.into_user())
    }

    pub async fn update_password(&self, password: &str) -> ApiResult<()> {
        self.send(&UpdatePasswordRequest {
            password: password.to_string(),
        })
        .await
        .map(|_| ())
    }

    // --- stores ---

    pub async fn list_stores(&self, filters: &StoreFilters) -> ApiResult<Vec<Store>> {
        let req = ListStoresRequest {
            filters: filters.clone(),
        };
        Ok(self.send(&req).await?.stores)
    }

    pub async fn store(&self, id: RecordId) -> ApiResult<Store> {
        Ok(self.send(&StoreDetailRequest { id }).await?.into_store())
    }

    /// The caller's own store, `None` when no store is assigned yet.
    pub async fn my_store(&self) -> ApiResult<Option<OwnerStore>> {
        Ok(self.send(&MyStoreRequest).await?.store)
    }

    // --- ratings ---

    pub async fn submit_rating(&self, store_id: RecordId, rating: RatingValue) -> ApiResult<()> {
        self.send(&SubmitRatingRequest { store_id, rating })
            .await
            .map(|_| ())
    }

    pub async fn update_rating(&self, store_id: RecordId, rating: RatingValue) -> ApiResult<()> {
        self.send(&UpdateRatingRequest { store_id, rating })
            .await
            .map(|_| ())
    }

    pub async fn delete_rating(&self, store_id: RecordId) -> ApiResult<()> {
        self.send(&DeleteRatingRequest { store_id }).await.map(|_| ())
    }

    pub async fn my_rating(&self, store_id: RecordId) -> ApiResult<Option<Rating>> {
        Ok(self.send(&MyRatingRequest { store_id }).await?.rating)
    }

    // --- admin ---

    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        Ok(self.send(&DashboardStatsRequest).await?.into_stats())
    }

    pub async fn list_users(&self, filters: &UserFilters) -> ApiResult<Vec<User>> {
        let req = ListUsersRequest {
            filters: filters.clone(),
        };
        Ok(self.send(&req).await?.users)
    }

    pub async fn user(&self, id: RecordId) -> ApiResult<User> {
        Ok(self.send(&UserDetailRequest { id }).await?.into_user())
    }

    pub async fn create_user(&self, req: &CreateUserRequest) -> ApiResult<()> {
        self.send(req).await.map(|_| ())
    }

    pub async fn delete_user(&self, id: RecordId) -> ApiResult<()> {
        self.send(&DeleteUserRequest { id }).await.map(|_| ())
    }

    pub async fn list_admin_stores(&self, filters: &AdminStoreFilters) -> ApiResult<Vec<Store>> {
        let req = ListAdminStoresRequest {
            filters: filters.clone(),
        };
        Ok(self.send(&req).await?.stores)
    }

    pub async fn create_store(&self, req: &CreateStoreRequest) -> ApiResult<()> {
        self.send(req).await.map(|_| ())
    }

    pub async fn delete_store(&self, id: RecordId) -> ApiResult<()> {
        self.send(&DeleteStoreRequest { id }).await.map(|_| ())
    }
}

/// Empty 2xx bodies decode as JSON `null`, which unit-like responses accept.
fn decode<R: DeserializeOwned>(body: &str) -> ApiResult<R> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "response body did not match the expected shape");
        ApiError::Decode(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::mock::MockHttpClient;
    use crate::request::{HttpResponse, TransportError};
    use crate::session::MemoryStorage;
    use crate::session::tests::session;
    use storerate_shared::{Role, SortOrder, StoreSortField};

    const BASE: &str = "http://localhost:5000/api/";

    fn client(mock: &MockHttpClient) -> ApiClient<MockHttpClient> {
        ApiClient::new(BASE, mock.clone(), SessionStore::restore(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn attaches_bearer_only_with_a_session() {
        let mock = MockHttpClient::fixed(200, r#"{"stores":[]}"#);
        let api = client(&mock);

        api.list_stores(&StoreFilters::default()).await.unwrap();
        api.session().establish(session(Role::User));
        api.list_stores(&StoreFilters::default()).await.unwrap();

        let reqs = mock.requests();
        assert_eq!(reqs[0].header("authorization"), None);
        assert_eq!(reqs[1].header("Authorization"), Some("Bearer tok-1"));
        assert_eq!(reqs[1].body, None);
    }

    #[tokio::test]
    async fn builds_filtered_store_url() {
        let mock = MockHttpClient::fixed(200, r#"{"stores":[]}"#);
        let api = client(&mock);
        let filters = StoreFilters {
            name: "Joe's".to_string(),
            sort_by: StoreSortField::AverageRating,
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        api.list_stores(&filters).await.unwrap();
        assert_eq!(
            mock.calls(),
            vec!["GET http://localhost:5000/api/stores?name=Joe%27s&sortBy=average_rating&sortOrder=DESC"]
        );
    }

    #[tokio::test]
    async fn json_body_for_writes() {
        let mock = MockHttpClient::fixed(201, "");
        let api = client(&mock);
        api.submit_rating(3, RatingValue::new(5).unwrap()).await.unwrap();

        let req = &mock.requests()[0];
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"store_id": 3, "rating": 5}));
    }

    #[tokio::test]
    async fn server_message_and_generic_fallback() {
        let mock = MockHttpClient::new(|req| {
            if req.url.ends_with("/admin/users/1") {
                Ok(HttpResponse::new(404, r#"{"message":"User not found"}"#))
            } else {
                Ok(HttpResponse::new(500, "Internal Server Error"))
            }
        });
        let api = client(&mock);

        let err = api.user(1).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
        let err = api.user(2).await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 500");
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let mock = MockHttpClient::new(|_| Err(TransportError("Failed to fetch".into())));
        let err = client(&mock).dashboard_stats().await.unwrap_err();
        assert_eq!(err.to_string(), "Network Error");
    }

    #[tokio::test]
    async fn rejected_token_clears_session() {
        let mock = MockHttpClient::fixed(401, r#"{"message":"Token expired"}"#);
        let api = client(&mock);
        api.session().establish(session(Role::Admin));

        let err = api.list_users(&UserFilters::default()).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!api.session().is_authenticated());
    }

    #[tokio::test]
    async fn unauthenticated_401_leaves_state_alone() {
        let mock = MockHttpClient::fixed(401, r#"{"message":"Invalid credentials"}"#);
        let api = client(&mock);
        let err = api.login("a@b.com", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!api.session().is_authenticated());
    }

    #[tokio::test]
    async fn failed_login_keeps_existing_session() {
        let mock = MockHttpClient::fixed(401, r#"{"message":"Invalid credentials"}"#);
        let api = client(&mock);
        api.session().establish(session(Role::Admin));

        let err = api.login("a@b.com", "wrong").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(mock.requests()[0].header("Authorization"), None);
        assert!(api.session().is_authenticated());
        assert_eq!(api.session().token().as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn register_is_sent_without_bearer() {
        let mock = MockHttpClient::fixed(401, r#"{"message":"Unauthorized"}"#);
        let api = client(&mock);
        api.session().establish(session(Role::User));

        let req = RegisterRequest {
            name: "A Sufficiently Long Name".into(),
            email: "new@x.io".into(),
            password: "Secret1!".into(),
            address: None,
        };
        api.register(&req).await.unwrap_err();
        assert_eq!(mock.requests()[0].header("Authorization"), None);
        assert!(api.session().is_authenticated());
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let mock = MockHttpClient::fixed(200, "<html></html>");
        let err = client(&mock).profile().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn error_shaped_stats_body_is_decode_error() {
        let mock = MockHttpClient::fixed(200, r#"{"message":"maintenance"}"#);
        let err = client(&mock).dashboard_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn owner_without_store() {
        let mock = MockHttpClient::fixed(200, r#"{"store":null}"#);
        assert_eq!(client(&mock).my_store().await.unwrap(), None);
    }

    #[tokio::test]
    async fn lenient_aggregates_from_sql() {
        let mock = MockHttpClient::fixed(
            200,
            r#"{"stores":[{"id":1,"name":"Corner Shop","email":"c@s.io","address":"1 Main",
                "average_rating":"4.50","total_ratings":"2","user_rating":null}]}"#,
        );
        let stores = client(&mock).list_stores(&StoreFilters::default()).await.unwrap();
        assert_eq!(stores[0].average_rating, Some(4.5));
        assert_eq!(stores[0].total_ratings, 2);
        assert_eq!(stores[0].user_rating, None);
    }
}
