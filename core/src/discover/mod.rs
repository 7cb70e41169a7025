//! Discovery queries for `discover/movie` and `discover/tv`.
//!
//! A query is a plain value: build it, keep it (its compact form fits in a
//! preference string), and hand it to `TmdbClient::build_discover_*`.
//! Empty fields are not sent.

pub mod codec;
pub mod filters;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_LANGUAGE;
use crate::enums::SortBy;
use crate::url_builder::UrlBuilder;

pub use codec::{CodecError, Compact, Divider};
pub use filters::{
    QueryAirDates, QueryCertifications, QueryDates, QueryVotes, QueryWith, QueryWithout,
};

use codec::{Reader, Writer};

pub const DEFAULT_REGION: &str = "US";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieQuery {
    pub certifications: QueryCertifications,
    pub include_adult: bool,
    pub include_video: bool,
    pub language: String,
    pub dates: QueryDates,
    pub region: String,
    pub sort_by: SortBy,
    pub votes: QueryVotes,
    pub watch_region: String,
    pub with: QueryWith,
    pub without: QueryWithout,
    pub year: String,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            certifications: QueryCertifications::default(),
            include_adult: false,
            include_video: false,
            language: DEFAULT_LANGUAGE.to_string(),
            dates: QueryDates::default(),
            region: DEFAULT_REGION.to_string(),
            sort_by: SortBy::None,
            votes: QueryVotes::default(),
            watch_region: String::new(),
            with: QueryWith::default(),
            without: QueryWithout::default(),
            year: String::new(),
        }
    }
}

impl MovieQuery {
    /// Appends the query's parameters after `page`.
    pub fn apply(&self, url: UrlBuilder) -> UrlBuilder {
        let certs = &self.certifications;
        let dates = &self.dates;
        let url = url
            .param("certification", &certs.certification)
            .param("certification.gte", &certs.certification_gte)
            .param("certification.lte", &certs.certification_lte)
            .param("certification_country", &certs.certification_country)
            .param("include_adult", self.include_adult)
            .param("include_video", self.include_video)
            .param("language", &self.language)
            .param("primary_release_year", &dates.primary_release_year)
            .param("primary_release_date.gte", &dates.primary_release_date_gte)
            .param("primary_release_date.lte", &dates.primary_release_date_lte)
            .param("region", &self.region)
            .param("release_date.gte", &dates.release_date_gte)
            .param("release_date.lte", &dates.release_date_lte)
            .param("sort_by", self.sort_by);
        let url = apply_votes(url, &self.votes).param("watch_region", &self.watch_region);

        let with = &self.with;
        let url = url
            .param("with_cast", &with.cast)
            .param("with_companies", &with.companies)
            .param("with_crew", &with.crew)
            .param("with_genres", &with.genres)
            .param("with_keywords", &with.keywords)
            .param("with_origin_country", &with.origin_country)
            .param("with_original_language", &with.original_language)
            .param("with_people", &with.people)
            .param("with_release_type", with.release_type)
            .param("with_runtime.gte", &with.runtime_gte)
            .param("with_runtime.lte", &with.runtime_lte)
            .param("with_watch_monetization_types", with.monetization)
            .param("with_watch_providers", &with.watch_providers);
        apply_without(url, &self.without).param("year", &self.year)
    }
}

impl Compact for MovieQuery {
    const DIVIDER: Divider = Divider::Query;

    fn write_fields(&self, out: &mut Writer) {
        out.child(&self.certifications)
            .bool(self.include_adult)
            .bool(self.include_video)
            .string(&self.language)
            .child(&self.dates)
            .string(&self.region)
            .wire(self.sort_by)
            .child(&self.votes)
            .string(&self.watch_region)
            .child(&self.with)
            .child(&self.without)
            .string(&self.year);
    }

    fn read_fields(input: &mut Reader) -> Result<Self, CodecError> {
        Ok(Self {
            certifications: input.child()?,
            include_adult: input.bool()?,
            include_video: input.bool()?,
            language: input.string(),
            dates: input.child()?,
            region: input.string(),
            sort_by: input.wire()?,
            votes: input.child()?,
            watch_region: input.string(),
            with: input.child()?,
            without: input.child()?,
            year: input.string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TvQuery {
    pub air_dates: QueryAirDates,
    pub include_adult: bool,
    pub language: String,
    pub screened_theatrically: bool,
    pub sort_by: SortBy,
    pub timezone: String,
    pub votes: QueryVotes,
    pub watch_region: String,
    pub with: QueryWith,
    pub without: QueryWithout,
}

impl Default for TvQuery {
    fn default() -> Self {
        Self {
            air_dates: QueryAirDates::default(),
            include_adult: false,
            language: DEFAULT_LANGUAGE.to_string(),
            screened_theatrically: false,
            sort_by: SortBy::None,
            timezone: String::new(),
            votes: QueryVotes::default(),
            watch_region: String::new(),
            with: QueryWith::default(),
            without: QueryWithout::default(),
        }
    }
}

impl TvQuery {
    pub fn apply(&self, url: UrlBuilder) -> UrlBuilder {
        let air = &self.air_dates;
        let url = url
            .param("air_date.gte", &air.air_date_gte)
            .param("air_date.lte", &air.air_date_lte)
            .param("first_air_date_year", &air.first_air_date_year)
            .param("first_air_date.gte", &air.first_air_date_gte)
            .param("first_air_date.lte", &air.first_air_date_lte)
            .param("include_null_first_air_dates", air.include_null_first_air_dates)
            .param("include_adult", self.include_adult)
            .param("language", &self.language)
            .param("screened_theatrically", self.screened_theatrically)
            .param("sort_by", self.sort_by)
            .param("timezone", &self.timezone);
        let url = apply_votes(url, &self.votes).param("watch_region", &self.watch_region);

        let with = &self.with;
        let url = url
            .param("with_companies", &with.companies)
            .param("with_genres", &with.genres)
            .param("with_keywords", &with.keywords)
            .param("with_networks", &with.networks)
            .param("with_origin_country", &with.origin_country)
            .param("with_original_language", &with.original_language)
            .param("with_runtime.gte", &with.runtime_gte)
            .param("with_runtime.lte", &with.runtime_lte)
            .param("with_status", with.status)
            .param("with_watch_monetization_types", with.monetization)
            .param("with_watch_providers", &with.watch_providers)
            .param("with_type", with.show_type);
        apply_without(url, &self.without)
    }
}

impl Compact for TvQuery {
    const DIVIDER: Divider = Divider::Query;

    fn write_fields(&self, out: &mut Writer) {
        out.child(&self.air_dates)
            .bool(self.include_adult)
            .string(&self.language)
            .bool(self.screened_theatrically)
            .wire(self.sort_by)
            .string(&self.timezone)
            .child(&self.votes)
            .string(&self.watch_region)
            .child(&self.with)
            .child(&self.without);
    }

    fn read_fields(input: &mut Reader) -> Result<Self, CodecError> {
        Ok(Self {
            air_dates: input.child()?,
            include_adult: input.bool()?,
            language: input.string(),
            screened_theatrically: input.bool()?,
            sort_by: input.wire()?,
            timezone: input.string(),
            votes: input.child()?,
            watch_region: input.string(),
            with: input.child()?,
            without: input.child()?,
        })
    }
}

fn apply_votes(url: UrlBuilder, votes: &QueryVotes) -> UrlBuilder {
    url.param("vote_average.gte", &votes.vote_average_gte)
        .param("vote_average.lte", &votes.vote_average_lte)
        .param("vote_count.gte", &votes.vote_count_gte)
        .param("vote_count.lte", &votes.vote_count_lte)
}

fn apply_without(url: UrlBuilder, without: &QueryWithout) -> UrlBuilder {
    url.param("without_companies", &without.companies)
        .param("without_genres", &without.genres)
        .param("without_keywords", &without.keywords)
        .param("without_watch_providers", &without.watch_providers)
}
