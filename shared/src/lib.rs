use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod serde_helper;
pub mod validation;

pub use protocol::*;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// localStorage key holding the bearer token.
pub const STORAGE_TOKEN_KEY: &str = "token";
/// localStorage key holding the JSON-encoded user snapshot.
pub const STORAGE_USER_KEY: &str = "user";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

pub type RecordId = i64;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// Account role as issued by the server.
///
/// The client never changes a user's role; it only reads what the API sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    StoreOwner,
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::StoreOwner, Role::User];

    /// Wire representation, also used for `<select>` values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::StoreOwner => "store_owner",
            Role::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Role::Admin => "👑",
            Role::StoreOwner => "🏪",
            Role::User => "👤",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "System Administrator",
            Role::StoreOwner => "Store Owner",
            Role::User => "Regular User",
        }
    }

    /// Short label shown in the navbar under the user's name.
    pub fn nav_label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::StoreOwner => "store owner",
            Role::User => "user",
        }
    }

    /// Badge text used in the admin user table.
    pub fn badge_label(&self) -> &'static str {
        match self {
            Role::Admin => "👑 Admin",
            Role::StoreOwner => "🏪 Store Owner",
            Role::User => "👤 User",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// First letter of the name, upper-cased, for avatar bubbles.
    pub fn initial(&self) -> String {
        initial_of(&self.name)
    }
}

pub fn initial_of(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

/// The locally cached proof of authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// A score between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RatingValue(u8);

impl RatingValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, InvalidRating> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidRating(value))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Every valid score in ascending order (star widget order).
    pub fn all() -> impl Iterator<Item = RatingValue> {
        (Self::MIN..=Self::MAX).map(RatingValue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct InvalidRating(pub u8);

impl TryFrom<u8> for RatingValue {
    type Error = InvalidRating;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RatingValue> for u8 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for RatingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_f64")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "serde_helper::lenient_u64")]
    pub total_ratings: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    /// The caller's own prior rating, present only on listings made by a
    /// signed-in user who already rated this store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<RatingValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: RecordId,
    #[serde(default)]
    pub store_id: RecordId,
    #[serde(default)]
    pub user_id: RecordId,
    #[serde(rename = "rating")]
    pub value: RatingValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// The owner's view of their store, ratings embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerStore {
    #[serde(flatten)]
    pub store: Store,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "serde_helper::lenient_u64")]
    pub total_users: u64,
    #[serde(default, deserialize_with = "serde_helper::lenient_u64")]
    pub total_stores: u64,
    #[serde(default, deserialize_with = "serde_helper::lenient_u64")]
    pub total_ratings: u64,
}
