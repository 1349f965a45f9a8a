use crate::serde_helper;
use crate::{DashboardStats, OwnerStore, Rating, RatingValue, RecordId, Role, Store, User};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use std::fmt;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the request value itself is sent as the JSON body.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// For `POST`/`PUT` the implementing value is serialized as the JSON body, so
/// fields that only feed the path or query string are `#[serde(skip)]`.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the session bearer is attached. Credential exchanges opt
    /// out, so their 401 never touches the current session.
    const AUTHENTICATED: bool = true;
    /// Path relative to the API base URL, including any query string.
    fn path(&self) -> String;
}

// =========================================================
// Query strings
// =========================================================

/// Ordered `key=value` pairs; blank values are dropped and values are
/// percent-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString(Vec<(&'static str, String)>);

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &'static str, value: impl AsRef<str>) -> Self {
        let value = value.as_ref();
        if !value.trim().is_empty() {
            self.0.push((key, value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `path?query`, or `path` alone when nothing survived.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self)
        }
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, urlencoding::encode(value))?;
        }
        Ok(())
    }
}

// =========================================================
// Filters
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Asc => "Ascending",
            SortOrder::Desc => "Descending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ASC" => Some(SortOrder::Asc),
            "DESC" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreSortField {
    #[default]
    Name,
    Address,
    AverageRating,
}

impl StoreSortField {
    pub const ALL: [StoreSortField; 3] = [
        StoreSortField::Name,
        StoreSortField::Address,
        StoreSortField::AverageRating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreSortField::Name => "name",
            StoreSortField::Address => "address",
            StoreSortField::AverageRating => "average_rating",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StoreSortField::Name => "Name",
            StoreSortField::Address => "Address",
            StoreSortField::AverageRating => "Rating",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

/// Search and sort parameters of the public store directory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreFilters {
    pub name: String,
    pub address: String,
    pub sort_by: StoreSortField,
    pub sort_order: SortOrder,
}

impl StoreFilters {
    pub fn query(&self) -> QueryString {
        QueryString::new()
            .push("name", &self.name)
            .push("address", &self.address)
            .push("sortBy", self.sort_by.as_str())
            .push("sortOrder", self.sort_order.as_str())
    }
}

/// Same as [`StoreFilters`] plus an email search, for the admin table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminStoreFilters {
    pub name: String,
    pub email: String,
    pub address: String,
    pub sort_by: StoreSortField,
    pub sort_order: SortOrder,
}

impl AdminStoreFilters {
    pub fn query(&self) -> QueryString {
        QueryString::new()
            .push("name", &self.name)
            .push("email", &self.email)
            .push("address", &self.address)
            .push("sortBy", self.sort_by.as_str())
            .push("sortOrder", self.sort_order.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortField {
    #[default]
    Name,
    Email,
    Address,
    Role,
    CreatedAt,
}

impl UserSortField {
    pub const ALL: [UserSortField; 5] = [
        UserSortField::Name,
        UserSortField::Email,
        UserSortField::Address,
        UserSortField::Role,
        UserSortField::CreatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserSortField::Name => "name",
            UserSortField::Email => "email",
            UserSortField::Address => "address",
            UserSortField::Role => "role",
            UserSortField::CreatedAt => "created_at",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserSortField::Name => "Name",
            UserSortField::Email => "Email",
            UserSortField::Address => "Address",
            UserSortField::Role => "Role",
            UserSortField::CreatedAt => "Created",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserFilters {
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: Option<Role>,
    pub sort_by: UserSortField,
    pub sort_order: SortOrder,
}

impl UserFilters {
    pub fn query(&self) -> QueryString {
        QueryString::new()
            .push("name", &self.name)
            .push("email", &self.email)
            .push("address", &self.address)
            .push("role", self.role.map(|r| r.as_str()).unwrap_or_default())
            .push("sortBy", self.sort_by.as_str())
            .push("sortOrder", self.sort_order.as_str())
    }
}

// =========================================================
// Response envelopes
// =========================================================

/// Success payload whose content the client does not inspect
/// (`{"message": ...}`, `{}` or an empty body).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Acknowledged;

impl<'de> Deserialize<'de> for Acknowledged {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(Acknowledged)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoreList {
    #[serde(default)]
    pub stores: Vec<Store>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<User>,
}

/// Single-user endpoints answer either `{"user": {...}}` or the bare record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl UserEnvelope {
    pub fn into_user(self) -> User {
        match self {
            UserEnvelope::Wrapped { user } | UserEnvelope::Bare(user) => user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoreEnvelope {
    Wrapped { store: Store },
    Bare(Store),
}

impl StoreEnvelope {
    pub fn into_store(self) -> Store {
        match self {
            StoreEnvelope::Wrapped { store } | StoreEnvelope::Bare(store) => store,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MyStoreResponse {
    #[serde(default)]
    pub store: Option<OwnerStore>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MyRatingResponse {
    #[serde(default)]
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StatsEnvelope {
    Wrapped { stats: DashboardStats },
    Bare(#[serde(deserialize_with = "bare_stats")] DashboardStats),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BareStats {
    #[serde(default, deserialize_with = "serde_helper::present_u64")]
    total_users: Option<u64>,
    #[serde(default, deserialize_with = "serde_helper::present_u64")]
    total_stores: Option<u64>,
    #[serde(default, deserialize_with = "serde_helper::present_u64")]
    total_ratings: Option<u64>,
}

/// An unwrapped stats object must name at least one counter; anything else
/// (an error body, an empty object) is not a stats payload.
fn bare_stats<'de, D>(deserializer: D) -> Result<DashboardStats, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BareStats::deserialize(deserializer)?;
    if raw.total_users.is_none() && raw.total_stores.is_none() && raw.total_ratings.is_none() {
        return Err(serde::de::Error::custom("no dashboard counters in response"));
    }
    Ok(DashboardStats {
        total_users: raw.total_users.unwrap_or_default(),
        total_stores: raw.total_stores.unwrap_or_default(),
        total_ratings: raw.total_ratings.unwrap_or_default(),
    })
}

impl StatsEnvelope {
    pub fn into_stats(self) -> DashboardStats {
        match self {
            StatsEnvelope::Wrapped { stats } | StatsEnvelope::Bare(stats) => stats,
        }
    }
}

// =========================================================
// Request Definitions: auth
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = Acknowledged;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
    fn path(&self) -> String {
        "/auth/register".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Response = UserEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/auth/profile".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

impl ApiRequest for UpdatePasswordRequest {
    type Response = Acknowledged;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        "/auth/password".to_string()
    }
}

// =========================================================
// Request Definitions: stores & ratings
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListStoresRequest {
    #[serde(skip)]
    pub filters: StoreFilters,
}

impl ApiRequest for ListStoresRequest {
    type Response = StoreList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        self.filters.query().append_to("/stores")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreDetailRequest {
    #[serde(skip)]
    pub id: RecordId,
}

impl ApiRequest for StoreDetailRequest {
    type Response = StoreEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/stores/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MyStoreRequest;

impl ApiRequest for MyStoreRequest {
    type Response = MyStoreResponse;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/stores/my/store".to_string()
    }
}

/// First rating of a store by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitRatingRequest {
    pub store_id: RecordId,
    pub rating: RatingValue,
}

impl ApiRequest for SubmitRatingRequest {
    type Response = Acknowledged;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/ratings".to_string()
    }
}

/// Replaces the caller's existing rating of a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateRatingRequest {
    pub store_id: RecordId,
    pub rating: RatingValue,
}

impl ApiRequest for UpdateRatingRequest {
    type Response = Acknowledged;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        "/ratings".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteRatingRequest {
    #[serde(skip)]
    pub store_id: RecordId,
}

impl ApiRequest for DeleteRatingRequest {
    type Response = Acknowledged;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/ratings/store/{}", self.store_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MyRatingRequest {
    #[serde(skip)]
    pub store_id: RecordId,
}

impl ApiRequest for MyRatingRequest {
    type Response = MyRatingResponse;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/ratings/store/{}/my-rating", self.store_id)
    }
}

// =========================================================
// Request Definitions: admin
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStatsRequest;

impl ApiRequest for DashboardStatsRequest {
    type Response = StatsEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/admin/dashboard/stats".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListUsersRequest {
    #[serde(skip)]
    pub filters: UserFilters,
}

impl ApiRequest for ListUsersRequest {
    type Response = UserList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        self.filters.query().append_to("/admin/users")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDetailRequest {
    #[serde(skip)]
    pub id: RecordId,
}

impl ApiRequest for UserDetailRequest {
    type Response = UserEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/admin/users/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub password: String,
    pub role: Role,
}

impl ApiRequest for CreateUserRequest {
    type Response = Acknowledged;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/admin/users".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteUserRequest {
    #[serde(skip)]
    pub id: RecordId,
}

impl ApiRequest for DeleteUserRequest {
    type Response = Acknowledged;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/admin/users/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListAdminStoresRequest {
    #[serde(skip)]
    pub filters: AdminStoreFilters,
}

impl ApiRequest for ListAdminStoresRequest {
    type Response = StoreList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        self.filters.query().append_to("/admin/stores")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<RecordId>,
}

impl ApiRequest for CreateStoreRequest {
    type Response = Acknowledged;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/admin/stores".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteStoreRequest {
    #[serde(skip)]
    pub id: RecordId,
}

impl ApiRequest for DeleteStoreRequest {
    type Response = Acknowledged;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/admin/stores/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_filters_encode_and_skip_blank_values() {
        let req = ListStoresRequest {
            filters: StoreFilters {
                name: "Joe's".to_string(),
                address: String::new(),
                sort_by: StoreSortField::AverageRating,
                sort_order: SortOrder::Desc,
            },
        };
        assert_eq!(
            req.path(),
            "/stores?name=Joe%27s&sortBy=average_rating&sortOrder=DESC"
        );
    }

    #[test]
    fn default_store_filters_only_sort() {
        let req = ListStoresRequest {
            filters: StoreFilters::default(),
        };
        assert_eq!(req.path(), "/stores?sortBy=name&sortOrder=ASC");
    }

    #[test]
    fn user_filters_include_role() {
        let filters = UserFilters {
            email: "a b@x.io".to_string(),
            role: Some(Role::StoreOwner),
            sort_by: UserSortField::CreatedAt,
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        assert_eq!(
            ListUsersRequest { filters }.path(),
            "/admin/users?email=a%20b%40x.io&role=store_owner&sortBy=created_at&sortOrder=DESC"
        );
    }

    #[test]
    fn empty_query_leaves_path_untouched() {
        assert_eq!(QueryString::new().push("name", "  ").append_to("/x"), "/x");
    }

    #[test]
    fn rating_bodies_use_wire_names() {
        let body = serde_json::to_value(SubmitRatingRequest {
            store_id: 7,
            rating: RatingValue::new(4).unwrap(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"store_id": 7, "rating": 4}));
        assert_eq!(SubmitRatingRequest::METHOD, HttpMethod::Post);
        assert_eq!(UpdateRatingRequest::METHOD, HttpMethod::Put);
        assert_eq!(MyRatingRequest { store_id: 7 }.path(), "/ratings/store/7/my-rating");
        assert_eq!(DeleteRatingRequest { store_id: 7 }.path(), "/ratings/store/7");
    }

    #[test]
    fn register_omits_missing_address() {
        let body = serde_json::to_value(RegisterRequest {
            name: "n".into(),
            email: "e@x.io".into(),
            address: None,
            password: "p".into(),
        })
        .unwrap();
        assert!(body.get("address").is_none());
    }

    #[test]
    fn envelopes_accept_wrapped_and_bare_forms() {
        let user = r#"{"id":1,"name":"N","email":"e@x.io","role":"admin"}"#;
        let bare: UserEnvelope = serde_json::from_str(user).unwrap();
        let wrapped: UserEnvelope = serde_json::from_str(&format!(r#"{{"user":{}}}"#, user)).unwrap();
        assert_eq!(bare.into_user(), wrapped.into_user());

        let stats: StatsEnvelope =
            serde_json::from_str(r#"{"stats":{"totalUsers":3,"totalStores":1,"totalRatings":0}}"#)
                .unwrap();
        assert_eq!(stats.into_stats().total_users, 3);
        let stats: StatsEnvelope = serde_json::from_str(r#"{"totalUsers":5}"#).unwrap();
        assert_eq!(stats.into_stats().total_users, 5);
    }

    #[test]
    fn stats_envelope_rejects_unrelated_objects() {
        assert!(serde_json::from_str::<StatsEnvelope>(r#"{"message":"Server busy"}"#).is_err());
        assert!(serde_json::from_str::<StatsEnvelope>("{}").is_err());
        let stats: StatsEnvelope = serde_json::from_str(r#"{"totalRatings":null}"#).unwrap();
        assert_eq!(stats.into_stats(), DashboardStats::default());
    }

    #[test]
    fn acknowledged_ignores_any_payload() {
        assert!(serde_json::from_str::<Acknowledged>(r#"{"message":"ok"}"#).is_ok());
        assert!(serde_json::from_str::<Acknowledged>("null").is_ok());
    }

    #[test]
    fn owner_without_store_decodes_to_none() {
        let resp: MyStoreResponse = serde_json::from_str(r#"{"store": null}"#).unwrap();
        assert!(resp.store.is_none());
    }
}
