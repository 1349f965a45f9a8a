use storerate_shared::{
    AdminStoreFilters, CreateStoreRequest, CreateUserRequest, DashboardStats, RatingValue,
    RecordId, Store, StoreFilters, User, UserFilters,
};

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;

/// A mutation followed by a re-fetch failed at one of the two steps.
///
/// Views report [`ActionError::Action`] as a blocking alert and
/// [`ActionError::Reload`] as the page error banner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("{0}")]
    Action(ApiError),
    #[error("{0}")]
    Reload(ApiError),
}

/// Whether a click on the star widget creates or replaces a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingAction {
    Submit,
    Update,
}

impl RatingAction {
    pub fn for_store(store: &Store) -> Self {
        match store.user_rating {
            Some(_) => RatingAction::Update,
            None => RatingAction::Submit,
        }
    }

    pub fn failure_prefix(&self) -> &'static str {
        match self {
            RatingAction::Submit => "Failed to submit rating",
            RatingAction::Update => "Failed to update rating",
        }
    }
}

// =========================================================
// 商店目录逻辑
// =========================================================

pub struct StoreLogic<'a, C> {
    api: &'a ApiClient<C>,
}

impl<'a, C: HttpClient> StoreLogic<'a, C> {
    pub fn new(api: &'a ApiClient<C>) -> Self {
        Self { api }
    }

    pub async fn list(&self, filters: &StoreFilters) -> ApiResult<Vec<Store>> {
        self.api.list_stores(filters).await
    }

    /// Rates `store` and re-fetches the directory. Exactly one write is
    /// issued: an update when the listing carried the caller's prior
    /// rating, a create otherwise.
    pub async fn rate(
        &self,
        store: &Store,
        value: RatingValue,
        filters: &StoreFilters,
    ) -> Result<Vec<Store>, ActionError> {
        let action = RatingAction::for_store(store);
        let written = match action {
            RatingAction::Submit => self.api.submit_rating(store.id, value).await,
            RatingAction::Update => self.api.update_rating(store.id, value).await,
        };
        written.map_err(ActionError::Action)?;
        tracing::info!(store_id = store.id, rating = value.get(), ?action, "rating saved");
        self.list(filters).await.map_err(ActionError::Reload)
    }
}

// =========================================================
// 管理后台逻辑
// =========================================================

pub struct AdminLogic<'a, C> {
    api: &'a ApiClient<C>,
}

impl<'a, C: HttpClient> AdminLogic<'a, C> {
    pub fn new(api: &'a ApiClient<C>) -> Self {
        Self { api }
    }

    pub async fn stats(&self) -> ApiResult<DashboardStats> {
        self.api.dashboard_stats().await
    }

    pub async fn users(&self, filters: &UserFilters) -> ApiResult<Vec<User>> {
        self.api.list_users(filters).await
    }

    pub async fn stores(&self, filters: &AdminStoreFilters) -> ApiResult<Vec<Store>> {
        self.api.list_admin_stores(filters).await
    }

    pub async fn delete_user(
        &self,
        id: RecordId,
        filters: &UserFilters,
    ) -> Result<Vec<User>, ActionError> {
        self.api.delete_user(id).await.map_err(ActionError::Action)?;
        tracing::info!(user_id = id, "user deleted");
        self.users(filters).await.map_err(ActionError::Reload)
    }

    pub async fn delete_store(
        &self,
        id: RecordId,
        filters: &AdminStoreFilters,
    ) -> Result<Vec<Store>, ActionError> {
        self.api.delete_store(id).await.map_err(ActionError::Action)?;
        tracing::info!(store_id = id, "store deleted");
        self.stores(filters).await.map_err(ActionError::Reload)
    }

    pub async fn create_user(
        &self,
        req: &CreateUserRequest,
        filters: &UserFilters,
    ) -> Result<Vec<User>, ActionError> {
        self.api.create_user(req).await.map_err(ActionError::Action)?;
        tracing::info!(email = %req.email, role = req.role.as_str(), "user created");
        self.users(filters).await.map_err(ActionError::Reload)
    }

    pub async fn create_store(
        &self,
        req: &CreateStoreRequest,
        filters: &AdminStoreFilters,
    ) -> Result<Vec<Store>, ActionError> {
        self.api.create_store(req).await.map_err(ActionError::Action)?;
        tracing::info!(name = %req.name, "store created");
        self.stores(filters).await.map_err(ActionError::Reload)
    }
}

// =========================================================
// 单元测试
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::mock::MockHttpClient;
    use crate::request::{HttpRequest, HttpResponse, TransportError};
    use crate::session::tests::session;
    use crate::session::{MemoryStorage, SessionStore};
    use std::cell::RefCell;
    use std::rc::Rc;
    use storerate_shared::{HttpMethod, Role};

    fn api(mock: &MockHttpClient, role: Role) -> ApiClient<MockHttpClient> {
        let store = SessionStore::restore(MemoryStorage::new());
        store.establish(session(role));
        ApiClient::new("http://api.test", mock.clone(), store)
    }

    fn store(id: RecordId, prior: Option<u8>) -> Store {
        Store {
            id,
            name: "Corner Shop".into(),
            email: "corner@shop.com".into(),
            address: "1 Main St".into(),
            average_rating: None,
            total_ratings: 0,
            owner_name: None,
            user_rating: prior.and_then(|v| RatingValue::new(v).ok()),
        }
    }

    /// Fake user table: DELETE removes the row, GET lists what is left.
    fn user_backend(ids: Vec<i64>) -> MockHttpClient {
        let rows = Rc::new(RefCell::new(ids));
        MockHttpClient::new(move |req: &HttpRequest| {
            let path = req.url.trim_start_matches("http://api.test");
            match req.method {
                HttpMethod::Delete => {
                    let id: i64 = path.rsplit('/').next().unwrap().parse().unwrap();
                    rows.borrow_mut().retain(|r| *r != id);
                    Ok(HttpResponse::new(200, r#"{"message":"User deleted successfully"}"#))
                }
                HttpMethod::Get => {
                    let users: Vec<String> = rows
                        .borrow()
                        .iter()
                        .map(|id| {
                            format!(r#"{{"id":{id},"name":"User {id}","email":"u{id}@x.io","role":"user"}}"#)
                        })
                        .collect();
                    Ok(HttpResponse::new(200, format!(r#"{{"users":[{}]}}"#, users.join(","))))
                }
                _ => Ok(HttpResponse::new(405, "")),
            }
        })
    }

    #[tokio::test]
    async fn first_rating_is_a_create() {
        let mock = MockHttpClient::new(|req| match req.method {
            HttpMethod::Get => Ok(HttpResponse::new(200, r#"{"stores":[]}"#)),
            _ => Ok(HttpResponse::new(201, r#"{"message":"Rating submitted"}"#)),
        });
        let api = api(&mock, Role::User);
        StoreLogic::new(&api)
            .rate(&store(4, None), RatingValue::new(5).unwrap(), &StoreFilters::default())
            .await
            .unwrap();

        assert_eq!(
            mock.calls(),
            vec![
                "POST http://api.test/ratings",
                "GET http://api.test/stores?sortBy=name&sortOrder=ASC",
            ]
        );
    }

    #[tokio::test]
    async fn prior_rating_is_an_update() {
        let mock = MockHttpClient::new(|req| match req.method {
            HttpMethod::Get => Ok(HttpResponse::new(200, r#"{"stores":[]}"#)),
            _ => Ok(HttpResponse::new(200, "")),
        });
        let api = api(&mock, Role::User);
        StoreLogic::new(&api)
            .rate(&store(4, Some(2)), RatingValue::new(3).unwrap(), &StoreFilters::default())
            .await
            .unwrap();

        let methods: Vec<HttpMethod> = mock.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![HttpMethod::Put, HttpMethod::Get]);
    }

    #[tokio::test]
    async fn failed_rating_skips_reload() {
        let mock = MockHttpClient::fixed(400, r#"{"message":"Rating must be between 1 and 5"}"#);
        let api = api(&mock, Role::User);
        let err = StoreLogic::new(&api)
            .rate(&store(4, None), RatingValue::new(1).unwrap(), &StoreFilters::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::Action(_)));
        assert_eq!(mock.calls().len(), 1);
        assert_eq!(RatingAction::Submit.failure_prefix(), "Failed to submit rating");
    }

    #[tokio::test]
    async fn deleted_user_is_gone_after_refetch() {
        let mock = user_backend(vec![1, 2, 3]);
        let api = api(&mock, Role::Admin);

        let users = AdminLogic::new(&api)
            .delete_user(2, &UserFilters::default())
            .await
            .unwrap();

        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(mock.calls()[0], "DELETE http://api.test/admin/users/2");
        assert!(mock.calls()[1].starts_with("GET http://api.test/admin/users?"));
    }

    #[tokio::test]
    async fn reload_failure_is_reported_separately() {
        let mock = MockHttpClient::new(|req| match req.method {
            HttpMethod::Delete => Ok(HttpResponse::new(200, "")),
            _ => Err(TransportError("offline".into())),
        });
        let api = api(&mock, Role::Admin);
        let err = AdminLogic::new(&api)
            .delete_store(9, &AdminStoreFilters::default())
            .await
            .unwrap_err();
        assert_eq!(err, ActionError::Reload(ApiError::Network("offline".into())));
    }

    #[tokio::test]
    async fn create_store_posts_then_lists() {
        let mock = MockHttpClient::new(|req| match req.method {
            HttpMethod::Post => Ok(HttpResponse::new(201, r#"{"message":"Store created"}"#)),
            _ => Ok(HttpResponse::new(
                200,
                r#"{"stores":[{"id":5,"name":"New Store","email":"n@s.io","address":"x","average_rating":null,"total_ratings":"0"}]}"#,
            )),
        });
        let api = api(&mock, Role::Admin);
        let req = CreateStoreRequest {
            name: "New Store".into(),
            email: "n@s.io".into(),
            address: "x".into(),
            owner_id: Some(3),
        };
        let stores = AdminLogic::new(&api)
            .create_store(&req, &AdminStoreFilters::default())
            .await
            .unwrap();
        assert_eq!(stores.len(), 1);

        let body: serde_json::Value =
            serde_json::from_str(mock.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["owner_id"], 3);
    }
}
