//! Filter groups shared by movie and TV discovery.

use serde::{Deserialize, Serialize};

use super::codec::{CodecError, Compact, Divider, Reader, Writer};
use crate::enums::{MediaStatus, MonetizationType, ReleaseType, ShowType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCertifications {
    pub certification: String,
    pub certification_gte: String,
    pub certification_lte: String,
    pub certification_country: String,
}

impl Compact for QueryCertifications {
    const DIVIDER: Divider = Divider::Certifications;

    fn write_fields(&self, out: &mut Writer) {
        out.string(&self.certification)
            .string(&self.certification_gte)
            .string(&self.certification_lte)
            .string(&self.certification_country);
    }

    fn read_fields(input: &mut Reader) -> Result<Self, CodecError> {
        Ok(Self {
            certification: input.string(),
            certification_gte: input.string(),
            certification_lte: input.string(),
            certification_country: input.string(),
        })
    }
}

/// Release date ranges for movies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDates {
    pub primary_release_year: String,
    pub primary_release_date_gte: String,
    pub primary_release_date_lte: String,
    pub release_date_gte: String,
    pub release_date_lte: String,
    pub year: String,
}

impl Compact for QueryDates {
    const DIVIDER: Divider = Divider::Dates;

    fn write_fields(&self, out: &mut Writer) {
        out.string(&self.primary_release_year)
            .string(&self.primary_release_date_gte)
            .string(&self.primary_release_date_lte)
            .string(&self.release_date_gte)
            .string(&self.release_date_lte)
            .string(&self.year);
    }

    fn read_fields(input: &mut Reader) -> Result<Self, CodecError> {
        Ok(Self {
            primary_release_year: input.string(),
            primary_release_date_gte: input.string(),
            primary_release_date_lte: input.string(),
            release_date_gte: input.string(),
            release_date_lte: input.string(),
            year: input.string(),
        })
    }
}

/// Air date ranges for TV shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAirDates {
    pub air_date_gte: String,
    pub air_date_lte: String,
    pub first_air_date_year: String,
    pub first_air_date_gte: String,
    pub first_air_date_lte: String,
    pub include_null_first_air_dates: bool,
}

impl Compact for QueryAirDates {
    const DIVIDER: Divider = Divider::Dates;

    fn write_fields(&self, out: &mut Writer) {
        out.string(&self.air_date_gte)
            .string(&self.air_date_lte)
            .string(&self.first_air_date_year)
            .string(&self.first_air_date_gte)
            .string(&self.first_air_date_lte)
            .bool(self.include_null_first_air_dates);
    }

    fn read_fields(input: &mut Reader) -> Result<Self, CodecError> {
        Ok(Self {
            air_date_gte: input.string(),
            air_date_lte: input.string(),
            first_air_date_year: input.string(),
            first_air_date_gte: input.string(),
            first_air_date_lte: input.string(),
            include_null_first_air_dates: input.bool()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryVotes {
    pub vote_average_gte: String,
    pub vote_average_lte: String,
    pub vote_count_gte: String,
    pub vote_count_lte: String,
}

impl Compact for QueryVotes {
    const DIVIDER: Divider = Divider::Votes;

    fn write_fields(&self, out: &mut Writer) {
        out.string(&self.vote_average_gte)
            .string(&self.vote_average_lte)
            .string(&self.vote_count_gte)
            .string(&self.vote_count_lte);
    }

    fn read_fields(input: &mut Reader) -> Result<Self, CodecError> {
        Ok(Self {
            vote_average_gte: input.string(),
            vote_average_lte: input.string(),
            vote_count_gte: input.string(),
            vote_count_lte: input.string(),
        })
    }
}

/// Inclusion filters. Ids are comma (AND) or pipe (OR) separated lists,
/// passed through as typed.
///
/// Movie discovery ignores `networks`, `status` and `show_type`. TV
/// discovery ignores `cast`, `crew`, `people` and `release_type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWith {
    pub cast: String,
    pub companies: String,
    pub crew: String,
    pub genres: String,
    pub keywords: String,
    pub origin_country: String,
    pub original_language: String,
    pub people: String,
    pub release_type: ReleaseType,
    pub runtime_gte: String,
    pub runtime_lte: String,
    pub monetization: MonetizationType,
    pub watch_providers: String,
    pub networks: String,
    pub status: MediaStatus,
    pub show_type: ShowType,
}

impl Compact for QueryWith {
    const DIVIDER: Divider = Divider::With;

    fn write_fields(&self, out: &mut Writer) {
        out.string(&self.cast)
            .string(&self.companies)
            .string(&self.crew)
            .string(&self.genres)
            .string(&self.keywords)
            .string(&self.origin_country)
            .string(&self.original_language)
            .string(&self.people)
            .wire(self.release_type)
            .string(&self.runtime_gte)
            .string(&self.runtime_lte)
            .wire(self.monetization)
            .string(&self.watch_providers)
            .string(&self.networks)
            .wire(self.status)
            .wire(self.show_type);
    }

    fn read_fields(input: &mut Reader) -> Result<Self, CodecError> {
        Ok(Self {
            cast: input.string(),
            companies: input.string(),
            crew: input.string(),
            genres: input.string(),
            keywords: input.string(),
            origin_country: input.string(),
            original_language: input.string(),
            people: input.string(),
            release_type: input.wire()?,
            runtime_gte: input.string(),
            runtime_lte: input.string(),
            monetization: input.wire()?,
            watch_providers: input.string(),
            networks: input.string(),
            status: input.wire()?,
            show_type: input.wire()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWithout {
    pub companies: String,
    pub genres: String,
    pub keywords: String,
    pub watch_providers: String,
}

impl Compact for QueryWithout {
    const DIVIDER: Divider = Divider::Without;

    fn write_fields(&self, out: &mut Writer) {
        out.string(&self.companies)
            .string(&self.genres)
            .string(&self.keywords)
            .string(&self.watch_providers);
    }

    fn read_fields(input: &mut Reader) -> Result<Self, CodecError> {
        Ok(Self {
            companies: input.string(),
            genres: input.string(),
            keywords: input.string(),
            watch_providers: input.string(),
        })
    }
}
