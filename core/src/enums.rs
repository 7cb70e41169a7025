//! Enumerations with fixed wire values.
//!
//! Every enum here serializes to its wire string through serde, renders the
//! same string as a query parameter and round-trips through the compact
//! query codec. Enums that filter a discovery query carry an `Any` variant
//! whose wire value is "", which the URL builder drops.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::url_builder::ParamValue;

/// An enum with a closed set of string wire values.
pub trait WireEnum: Sized + Copy {
    /// Type name reported in decode errors.
    const KIND: &'static str;

    fn from_wire(value: &str) -> Option<Self>;

    fn as_wire(&self) -> &'static str;
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            pub fn from_wire(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl WireEnum for $name {
            const KIND: &'static str = stringify!($name);

            fn from_wire(value: &str) -> Option<Self> {
                $name::from_wire(value)
            }

            fn as_wire(&self) -> &'static str {
                self.as_str()
            }
        }

        impl ParamValue for $name {
            fn to_param(&self) -> String {
                self.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Kind of media an item or endpoint refers to.
    pub enum MediaType {
        Movie => "movie",
        Tv => "tv",
        Person => "person",
    }
}

impl MediaType {
    /// Path segment used by account and guest collections.
    pub fn plural(self) -> &'static str {
        match self {
            MediaType::Movie => "movies",
            MediaType::Tv => "tv",
            MediaType::Person => "people",
        }
    }
}

wire_enum! {
    /// Per-account collections of media.
    pub enum CollectionType {
        Favorite => "favorite",
        Watchlist => "watchlist",
        Rated => "rated",
    }
}

wire_enum! {
    /// Ordering for account collections.
    #[derive(Default)]
    pub enum SortOrder {
        #[default]
        Ascending => "created_at.asc",
        Descending => "created_at.desc",
    }
}

wire_enum! {
    /// Ordering for discovery results.
    #[derive(Default)]
    pub enum SortBy {
        #[default]
        None => "",
        OriginalTitleAsc => "original_title.asc",
        OriginalTitleDesc => "original_title.desc",
        PopularityAsc => "popularity.asc",
        PopularityDesc => "popularity.desc",
        RevenueAsc => "revenue.asc",
        RevenueDesc => "revenue.desc",
        PrimaryReleaseDateAsc => "primary_release_date.asc",
        PrimaryReleaseDateDesc => "primary_release_date.desc",
        TitleAsc => "title.asc",
        TitleDesc => "title.desc",
        VoteAverageAsc => "vote_average.asc",
        VoteAverageDesc => "vote_average.desc",
        VoteCountAsc => "vote_count.asc",
        VoteCountDesc => "vote_count.desc",
    }
}

wire_enum! {
    #[derive(Default)]
    pub enum ReleaseType {
        #[default]
        Any => "",
        Premiere => "1",
        TheatricalLimited => "2",
        Theatrical => "3",
        Digital => "4",
        Physical => "5",
        Tv => "6",
    }
}

wire_enum! {
    #[derive(Default)]
    pub enum MonetizationType {
        #[default]
        Any => "",
        Flatrate => "flatrate",
        Free => "free",
        Ads => "ads",
        Rent => "rent",
        Buy => "buy",
    }
}

wire_enum! {
    /// Production status of a TV show.
    #[derive(Default)]
    pub enum MediaStatus {
        #[default]
        Any => "",
        Rumored => "0",
        Released => "1",
        PostProduction => "2",
        Filming => "3",
        Planned => "4",
        InProduction => "5",
    }
}

wire_enum! {
    #[derive(Default)]
    pub enum ShowType {
        #[default]
        Any => "",
        All => "0",
        Series => "1",
        Miniseries => "2",
        TvMovie => "3",
        ShortSeries => "4",
        TvSpecial => "5",
        TvDocumentary => "6",
    }
}

wire_enum! {
    /// Third-party id sources accepted by `find`.
    pub enum ExternalId {
        Imdb => "imdb_id",
        Facebook => "facebook_id",
        Instagram => "instagram_id",
        Tvdb => "tvdb_id",
        Tiktok => "tiktok_id",
        Twitter => "twitter_id",
        Wikidata => "wikidata_id",
        Youtube => "youtube_id",
    }
}

wire_enum! {
    /// Reference lists under `configuration/`.
    pub enum ConfigurationList {
        Countries => "countries",
        Jobs => "jobs",
        Languages => "languages",
        Timezones => "timezones",
        PrimaryTranslations => "primary_translations",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_round_trip() {
        for value in SortBy::ALL {
            assert_eq!(SortBy::from_wire(value.as_str()), Some(*value));
        }
        for value in ShowType::ALL {
            assert_eq!(ShowType::from_wire(value.as_str()), Some(*value));
        }
        assert_eq!(MediaStatus::from_wire("9"), None);
    }

    #[test]
    fn serde_uses_wire_values() {
        assert_eq!(serde_json::to_string(&MediaType::Tv).unwrap(), r#""tv""#);
        assert_eq!(
            serde_json::from_str::<SortOrder>(r#""created_at.desc""#).unwrap(),
            SortOrder::Descending
        );
        assert_eq!(
            serde_json::to_string(&ExternalId::Imdb).unwrap(),
            r#""imdb_id""#
        );
    }

    #[test]
    fn filter_enums_default_to_empty_wire_value() {
        assert_eq!(SortBy::default().as_str(), "");
        assert_eq!(ReleaseType::default().as_str(), "");
        assert_eq!(MonetizationType::default().as_str(), "");
        assert_eq!(MediaStatus::default().as_str(), "");
        assert_eq!(ShowType::default().as_str(), "");
        assert_eq!(SortOrder::default(), SortOrder::Ascending);
    }

    #[test]
    fn collection_segments() {
        assert_eq!(MediaType::Movie.plural(), "movies");
        assert_eq!(MediaType::Tv.plural(), "tv");
        assert_eq!(CollectionType::Favorite.to_string(), "favorite");
        assert_eq!(ConfigurationList::PrimaryTranslations.to_param(), "primary_translations");
    }
}
