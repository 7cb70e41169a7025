use serde::{Deserialize, Serialize};

use super::movie::Movie;
use super::person::Person;
use super::tv::{TvEpisode, TvSeason, TvShow};

/// Result of looking up an external id, grouped by media kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindResults {
    pub movie_results: Vec<Movie>,
    pub person_results: Vec<Person>,
    pub tv_results: Vec<TvShow>,
    pub tv_episode_results: Vec<TvEpisode>,
    pub tv_season_results: Vec<TvSeason>,
}

impl FindResults {
    pub fn is_empty(&self) -> bool {
        self.movie_results.is_empty()
            && self.person_results.is_empty()
            && self.tv_results.is_empty()
            && self.tv_episode_results.is_empty()
            && self.tv_season_results.is_empty()
    }
}
