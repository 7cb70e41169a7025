use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `configuration`: image hosts and the list of change keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub change_keys: Vec<String>,
    pub images: ImageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub base_url: String,
    pub secure_base_url: String,
    pub backdrop_sizes: Vec<String>,
    pub logo_sizes: Vec<String>,
    pub poster_sizes: Vec<String>,
    pub profile_sizes: Vec<String>,
    pub still_sizes: Vec<String>,
}

impl ImageConfig {
    /// Full HTTPS URL of an image path at the given size ("w500", "original").
    pub fn image_url(&self, size: &str, file_path: &str) -> String {
        format!("{}{}{}", self.secure_base_url, size, file_path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    pub iso_3166_1: String,
    pub english_name: String,
    pub native_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub department: String,
    pub jobs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub iso_639_1: String,
    pub english_name: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timezone {
    pub iso_3166_1: String,
    pub zones: Vec<String>,
}

/// Certification rating, e.g. "PG-13", with its meaning and sort order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub certification: String,
    pub meaning: String,
    pub order: i32,
}

/// Certifications keyed by ISO 3166-1 country code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certifications {
    pub certifications: BTreeMap<String, Vec<Certification>>,
}

impl Certifications {
    pub fn for_country(&self, iso_3166_1: &str) -> &[Certification] {
        self.certifications
            .get(iso_3166_1)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
