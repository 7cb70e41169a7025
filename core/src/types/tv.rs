use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvShow {
    pub id: i64,
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub first_air_date: String,
    pub genre_ids: Vec<i64>,
    pub name: String,
    pub origin_country: Vec<String>,
    pub original_language: String,
    pub original_name: String,
    pub overview: String,
    pub popularity: f64,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    pub vote_count: u32,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvSeason {
    pub id: i64,
    pub name: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub media_type: String,
    pub vote_average: f64,
    pub air_date: Option<String>,
    pub season_number: u32,
    pub show_id: i64,
    pub episode_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvEpisode {
    pub id: i64,
    pub air_date: Option<String>,
    pub episode_number: u32,
    pub episode_type: String,
    pub name: String,
    pub overview: String,
    pub production_code: String,
    pub runtime: Option<u32>,
    pub season_number: u32,
    pub show_id: i64,
    pub still_path: Option<String>,
    pub vote_average: f64,
    pub vote_count: u32,
    pub rating: Option<f64>,
}
