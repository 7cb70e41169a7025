//! Data models mirroring the service's JSON.
//!
//! # Design
//! Field names match the wire (snake_case) so no renames are needed. Most
//! records use `#[serde(default)]`: the service omits fields freely between
//! endpoints, and a missing count or overview is not worth failing a call
//! over. Fields the service sends as `null` are `Option`.

pub mod account;
pub mod auth;
pub mod common;
pub mod configuration;
pub mod find;
pub mod list;
pub mod movie;
pub mod payload;
pub mod person;
pub mod tv;

pub use account::{Account, AccountAvatar, Avatar, Gravatar, GUEST_ACCOUNT_ID};
pub use auth::{GuestSession, NewSession, RequestToken};
pub use common::{
    AlternativeName, AlternativeNames, Company, CompanyImages, Genre, Genres, Image,
    ImageCollection, Keyword, MediaIndex, Page, Present, ResponseFailure, Translation,
    TranslationData, Translations,
};
pub use configuration::{
    Certification, Certifications, Configuration, Country, ImageConfig, Job, Language, Timezone,
};
pub use find::FindResults;
pub use list::{ListDetails, ListResult, UserList};
pub use movie::{
    MediaCollection, Movie, MovieDetails, ProductionCompany, ProductionCountry, SpokenLanguage,
};
pub use payload::{DeleteSession, ListItem, MarkMedia, NewList};
pub use person::{Credit, CreditMedia, Person};
pub use tv::{TvEpisode, TvSeason, TvShow};

/// `configuration/primary_translations` returns bare language tags.
pub type TranslationIndex = Vec<String>;
