use serde::{Deserialize, Deserializer, Serialize};

/// One page of a paginated result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: 0,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

/// Body the service sends alongside a failing status, and after most writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseFailure {
    pub success: bool,
    pub status_code: i32,
    pub status_message: String,
}

/// Answer of `list/{id}/item_status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Present {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub item_present: bool,
}

/// Accepts an id the service sends either as a JSON string or a number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genres {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keyword {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub aspect_ratio: f64,
    pub file_path: String,
    pub height: u32,
    pub width: u32,
    pub iso_639_1: Option<String>,
    pub vote_average: f64,
    pub vote_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageCollection {
    pub id: i64,
    pub backdrops: Vec<Image>,
    pub posters: Vec<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub headquarters: String,
    pub homepage: String,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
    pub parent_company: Option<Box<Company>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyImages {
    pub id: i64,
    pub logos: Vec<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternativeName {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternativeNames {
    pub id: i64,
    pub results: Vec<AlternativeName>,
}

/// Localized text of one translation. Movies and collections fill `title`,
/// shows fill `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationData {
    pub title: String,
    pub name: String,
    pub overview: String,
    pub homepage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Translation {
    pub iso_3166_1: String,
    pub iso_639_1: String,
    pub name: String,
    pub english_name: String,
    pub data: TranslationData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Translations {
    pub id: i64,
    pub translations: Vec<Translation>,
}

/// Entry of a `changes` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaIndex {
    pub id: i64,
    pub adult: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_accepts_numeric_or_string_ids() {
        let numeric: Present = serde_json::from_str(r#"{"id": 550, "item_present": true}"#).unwrap();
        assert_eq!(numeric.id, "550");
        assert!(numeric.item_present);
        let text: Present = serde_json::from_str(r#"{"id": "8", "item_present": false}"#).unwrap();
        assert_eq!(text.id, "8");
    }

    #[test]
    fn page_defaults_missing_fields() {
        let page: Page<Genre> = serde_json::from_str(r#"{"results": [{"id": 28, "name": "Action"}]}"#).unwrap();
        assert_eq!(page.page, 0);
        assert_eq!(page.results[0].name, "Action");
    }

    #[test]
    fn failure_body_decodes() {
        let failure: ResponseFailure = serde_json::from_str(
            r#"{"success": false, "status_code": 34, "status_message": "The resource you requested could not be found."}"#,
        )
        .unwrap();
        assert_eq!(failure.status_code, 34);
        assert!(!failure.success);
    }

    #[test]
    fn alternative_name_type_maps_to_kind() {
        let names: AlternativeNames = serde_json::from_str(
            r#"{"id": 1, "results": [{"name": "Lucasfilm Ltd.", "type": "legal"}]}"#,
        )
        .unwrap();
        assert_eq!(names.results[0].kind, "legal");
    }

    #[test]
    fn translation_data_tolerates_partial_text() {
        let translations: Translations = serde_json::from_str(
            r#"{"id": 10, "translations": [{"iso_3166_1": "FR", "iso_639_1": "fr", "name": "Français", "english_name": "French", "data": {"title": "Star Wars - La Saga", "overview": ""}}]}"#,
        )
        .unwrap();
        let french = &translations.translations[0];
        assert_eq!(french.english_name, "French");
        assert_eq!(french.data.title, "Star Wars - La Saga");
        assert_eq!(french.data.homepage, "");
    }
}
