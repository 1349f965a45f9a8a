//! DOM-free core of the store rating client.
//!
//! Everything here runs natively under `cargo test`; the browser crate only
//! plugs in a `fetch` transport and `localStorage`.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod format;
pub mod guard;
pub mod logic;
pub mod nav;
pub mod request;
pub mod route;
pub mod scope;
pub mod session;

pub use storerate_shared as shared;

use api::ApiClient;
use auth::AuthService;
use config::ClientConfig;
use request::HttpClient;
use session::{KeyValueStorage, SessionStore};

/// Restores the persisted session and wires the API client around it.
pub fn connect<C: HttpClient>(
    config: &ClientConfig,
    client: C,
    storage: impl KeyValueStorage + 'static,
) -> AuthService<C> {
    let session = SessionStore::restore(storage);
    tracing::info!(api = %config.api_base_url, "client core ready");
    AuthService::new(ApiClient::new(&config.api_base_url, client, session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::mock::MockHttpClient;
    use crate::session::MemoryStorage;
    use storerate_shared::{Role, STORAGE_TOKEN_KEY, STORAGE_USER_KEY};

    #[tokio::test]
    async fn reload_keeps_the_session() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_TOKEN_KEY, "persisted");
        storage.set(
            STORAGE_USER_KEY,
            r#"{"id":3,"name":"Owner Of The Corner Shop","email":"o@s.io","role":"store_owner"}"#,
        );

        let mock = MockHttpClient::fixed(200, r#"{"store":null}"#);
        let auth = connect(&ClientConfig::default(), mock.clone(), storage);
        assert_eq!(auth.role(), Some(Role::StoreOwner));

        auth.api().my_store().await.unwrap();
        let req = &mock.requests()[0];
        assert_eq!(req.url, "http://localhost:5000/api/stores/my/store");
        assert_eq!(req.header("Authorization"), Some("Bearer persisted"));
    }
}
