use serde::{Deserialize, Serialize};

use super::common::string_or_number;
use super::movie::Movie;

/// A list as it appears in `account/{id}/lists`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserList {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub favorite_count: u32,
    pub item_count: u32,
    pub iso_639_1: String,
    pub list_type: String,
    pub poster_path: Option<String>,
}

/// `list/{id}`. Items are movie-shaped; shows fill `title` empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListDetails {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_by: String,
    pub favorite_count: u32,
    pub item_count: u32,
    pub iso_639_1: String,
    pub poster_path: Option<String>,
    pub items: Vec<Movie>,
}

/// Answer to list creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListResult {
    pub success: bool,
    pub status_code: i32,
    pub status_message: String,
    pub list_id: i64,
}
