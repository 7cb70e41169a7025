use serde::{Deserialize, Serialize};

use super::common::string_or_number;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: i64,
    pub adult: bool,
    pub gender: u8,
    pub known_for_department: String,
    pub media_type: String,
    pub name: String,
    pub original_name: String,
    pub popularity: f64,
    pub profile_path: Option<String>,
}

/// A person's involvement in one movie or show, from `credit/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credit {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub credit_type: String,
    pub department: String,
    pub job: String,
    pub media: CreditMedia,
    pub media_type: String,
    pub person: Person,
}

/// The movie or show side of a credit. Movies fill `title`, shows `name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditMedia {
    pub id: i64,
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub character: Option<String>,
    pub genre_ids: Vec<i64>,
    pub media_type: String,
    pub original_language: String,
    pub original_title: Option<String>,
    pub overview: String,
    pub popularity: f64,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub video: bool,
    pub vote_average: f64,
    pub vote_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_decodes_with_string_id() {
        let credit: Credit = serde_json::from_str(
            r#"{
                "credit_type": "cast",
                "department": "Actors",
                "job": "Actor",
                "media": {"id": 550, "title": "Fight Club", "character": "Narrator", "media_type": "movie"},
                "media_type": "movie",
                "id": "52fe4250c3a36847f80149f3",
                "person": {"id": 819, "name": "Edward Norton", "profile_path": "/x.jpg"}
            }"#,
        )
        .unwrap();
        assert_eq!(credit.id, "52fe4250c3a36847f80149f3");
        assert_eq!(credit.media.character.as_deref(), Some("Narrator"));
        assert_eq!(credit.person.name, "Edward Norton");
    }
}
