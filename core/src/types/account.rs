use serde::{Deserialize, Serialize};

/// Id carried by the synthetic guest account.
pub const GUEST_ACCOUNT_ID: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub iso_639_1: String,
    #[serde(default)]
    pub iso_3166_1: String,
    #[serde(default)]
    pub include_adult: bool,
    #[serde(default)]
    pub avatar: AccountAvatar,
}

impl Account {
    /// The placeholder account used while logged out or in a guest session.
    pub fn guest() -> Self {
        Self {
            id: GUEST_ACCOUNT_ID,
            username: "guest".to_string(),
            name: "Guest User".to_string(),
            iso_639_1: "en-US".to_string(),
            iso_3166_1: "US".to_string(),
            include_adult: false,
            avatar: AccountAvatar::default(),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.id == GUEST_ACCOUNT_ID
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::guest()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountAvatar {
    pub gravatar: Gravatar,
    pub tmdb: Avatar,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gravatar {
    pub hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Avatar {
    pub avatar_path: Option<String>,
}
