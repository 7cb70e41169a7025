//! Client core for The Movie Database (TMDB) v3 API.
//!
//! # Overview
//! `TmdbClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `Tmdb` adds an async
//! `Dispatcher` over a pluggable `Transport` (reqwest by default) and the
//! session store, for callers that want the SDK to do the I/O.
//!
//! # Design
//! - `TmdbClient` is stateless. It holds only its `TmdbConfig`.
//! - Login state is an immutable `SessionContext` passed to each call.
//!   `Tmdb` serializes login and logout so the session and account always
//!   come from the same flow.
//! - Every call returns `Result<T, ApiError>`. Status rules live in
//!   `error::classify_status` and nowhere else.
//! - Discovery queries have a compact string form for storing them.

pub mod body;
pub mod client;
pub mod config;
pub mod discover;
pub mod dispatcher;
pub mod enums;
pub mod error;
pub mod http;
pub mod session;
pub mod tmdb;
pub mod types;
pub mod url_builder;

pub use body::BodyTemplate;
pub use client::TmdbClient;
pub use config::{ConfigError, TmdbConfig};
pub use discover::{Compact, MovieQuery, TvQuery};
pub use dispatcher::{Dispatcher, ReqwestTransport, Transport, TransportError};
pub use enums::{
    CollectionType, ConfigurationList, ExternalId, MediaStatus, MediaType, MonetizationType,
    ReleaseType, ShowType, SortBy, SortOrder,
};
pub use error::{classify_status, ApiError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{Session, SessionContext, SessionState, SessionStore};
pub use tmdb::Tmdb;
pub use url_builder::UrlBuilder;
