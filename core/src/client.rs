//! Stateless request builder and response parser for the TMDB API.
//!
//! # Design
//! `TmdbClient` holds only its `TmdbConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse*` method that consumes an
//! `HttpResponse`. Session-scoped calls take the `SessionContext` to read
//! the session id and account id from, so the client itself never holds
//! login state.
//!
//! Every URL gets the API key from the config. Calls with a `language`
//! parameter use the configured language, except discovery, where the query
//! carries its own.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::TmdbConfig;
use crate::discover::{MovieQuery, TvQuery};
use crate::enums::{CollectionType, ConfigurationList, ExternalId, MediaType, SortOrder};
use crate::error::{classify_status, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::SessionContext;
use crate::types::{
    DeleteSession, GuestSession, ListItem, MarkMedia, NewList, NewSession, Present, RequestToken,
};
use crate::url_builder::UrlBuilder;

/// Decodes a JSON body, keeping the serde message on failure.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// Starts a URL at `base_url/path` with the API key attached.
    pub fn endpoint(&self, path: &str) -> UrlBuilder {
        UrlBuilder::new(format!("{}/{}", self.config.base_url, path), &self.config.api_key)
    }

    fn get(&self, url: UrlBuilder) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: url.build()?,
            headers: Vec::new(),
            body: None,
            timeout: None,
        })
    }

    fn write<B: Serialize>(
        &self,
        method: HttpMethod,
        url: UrlBuilder,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        let url = url.build()?;
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url,
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body,
            timeout: Some(self.config.write_timeout),
        })
    }

    // Authentication

    pub fn build_request_token(&self) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("authentication/token/new"))
    }

    pub fn build_validate_with_login(
        &self,
        request_token: &str,
        username: &str,
        password: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("authentication/token/validate_with_login")
                .param("request_token", request_token)
                .param("username", username)
                .param("password", password),
        )
    }

    pub fn build_new_session(&self, request_token: &str) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("authentication/session/new").param("request_token", request_token))
    }

    pub fn build_guest_session(&self) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("authentication/guest_session/new"))
    }

    pub fn build_delete_session(&self, session_id: &str) -> Result<HttpRequest, ApiError> {
        let body = DeleteSession {
            session_id: session_id.to_string(),
        };
        self.write(HttpMethod::Delete, self.endpoint("authentication/session"), Some(&body))
    }

    pub fn parse_request_token(&self, response: HttpResponse) -> Result<RequestToken, ApiError> {
        let token: RequestToken = self.parse(response)?;
        if !token.success {
            return Err(ApiError::Unsuccessful("request token"));
        }
        Ok(token)
    }

    pub fn parse_new_session(&self, response: HttpResponse) -> Result<NewSession, ApiError> {
        let session: NewSession = self.parse(response)?;
        if !session.success {
            return Err(ApiError::Unsuccessful("session"));
        }
        Ok(session)
    }

    pub fn parse_guest_session(&self, response: HttpResponse) -> Result<GuestSession, ApiError> {
        let session: GuestSession = self.parse(response)?;
        if !session.success {
            return Err(ApiError::Unsuccessful("guest session"));
        }
        Ok(session)
    }

    // Account

    pub fn build_account(&self, context: &SessionContext) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("account").param("session_id", context.session_id()))
    }

    pub fn build_account_collection(
        &self,
        context: &SessionContext,
        collection: CollectionType,
        media: MediaType,
        page: u32,
        sort: SortOrder,
    ) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("account")
                .path(context.account_id())
                .path(collection)
                .path(media.plural())
                .param("session_id", context.session_id())
                .param("page", page)
                .param("sort_by", sort)
                .param("language", &self.config.language),
        )
    }

    /// Items rated under the current guest session.
    pub fn build_guest_rated(
        &self,
        context: &SessionContext,
        media: MediaType,
        page: u32,
        sort: SortOrder,
    ) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("guest_session")
                .path(context.session_id())
                .path(CollectionType::Rated)
                .path(media.plural())
                .param("page", page)
                .param("sort_by", sort)
                .param("language", &self.config.language),
        )
    }

    /// TV episodes the account has rated.
    pub fn build_account_rated_episodes(
        &self,
        context: &SessionContext,
        page: u32,
        sort: SortOrder,
    ) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("account")
                .path(context.account_id())
                .path(CollectionType::Rated)
                .path("tv/episodes")
                .param("session_id", context.session_id())
                .param("page", page)
                .param("sort_by", sort)
                .param("language", &self.config.language),
        )
    }

    pub fn build_guest_rated_episodes(
        &self,
        context: &SessionContext,
        page: u32,
        sort: SortOrder,
    ) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("guest_session")
                .path(context.session_id())
                .path(CollectionType::Rated)
                .path("tv/episodes")
                .param("page", page)
                .param("sort_by", sort)
                .param("language", &self.config.language),
        )
    }

    pub fn build_account_lists(
        &self,
        context: &SessionContext,
        page: u32,
    ) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("account")
                .path(context.account_id())
                .path("lists")
                .param("session_id", context.session_id())
                .param("page", page),
        )
    }

    pub fn build_set_favorite(
        &self,
        context: &SessionContext,
        media: MediaType,
        media_id: i64,
        favorite: bool,
    ) -> Result<HttpRequest, ApiError> {
        self.build_mark(context, CollectionType::Favorite, media, media_id, favorite)
    }

    pub fn build_set_watchlist(
        &self,
        context: &SessionContext,
        media: MediaType,
        media_id: i64,
        on_watchlist: bool,
    ) -> Result<HttpRequest, ApiError> {
        self.build_mark(context, CollectionType::Watchlist, media, media_id, on_watchlist)
    }

    fn build_mark(
        &self,
        context: &SessionContext,
        collection: CollectionType,
        media: MediaType,
        media_id: i64,
        include: bool,
    ) -> Result<HttpRequest, ApiError> {
        let body = MarkMedia {
            media_type: media,
            media_id,
            collection,
            include,
        };
        let url = self
            .endpoint("account")
            .path(context.account_id())
            .path(collection)
            .param("session_id", context.session_id());
        self.write(HttpMethod::Post, url, Some(&body))
    }

    // Lists

    pub fn build_list_details(&self, list_id: i64, page: u32) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("list")
                .path(list_id)
                .param("page", page)
                .param("language", &self.config.language),
        )
    }

    pub fn build_add_list_item(
        &self,
        context: &SessionContext,
        list_id: i64,
        media: MediaType,
        media_id: i64,
    ) -> Result<HttpRequest, ApiError> {
        self.build_list_item(context, list_id, "add_item", media, media_id)
    }

    pub fn build_remove_list_item(
        &self,
        context: &SessionContext,
        list_id: i64,
        media: MediaType,
        media_id: i64,
    ) -> Result<HttpRequest, ApiError> {
        self.build_list_item(context, list_id, "remove_item", media, media_id)
    }

    fn build_list_item(
        &self,
        context: &SessionContext,
        list_id: i64,
        action: &str,
        media: MediaType,
        media_id: i64,
    ) -> Result<HttpRequest, ApiError> {
        let body = ListItem {
            media_type: media,
            media_id,
        };
        let url = self
            .endpoint("list")
            .path(list_id)
            .path(action)
            .param("session_id", context.session_id());
        self.write(HttpMethod::Post, url, Some(&body))
    }

    /// Returns `Ok(None)` for media kinds a list cannot hold; the answer for
    /// those is always "not present".
    pub fn build_item_status(
        &self,
        list_id: i64,
        media: MediaType,
        media_id: i64,
    ) -> Result<Option<HttpRequest>, ApiError> {
        let id_param = match media {
            MediaType::Movie => "movie_id",
            MediaType::Tv => "tv_id",
            MediaType::Person => return Ok(None),
        };
        let url = self
            .endpoint("list")
            .path(list_id)
            .path("item_status")
            .param("language", &self.config.language)
            .param(id_param, media_id);
        self.get(url).map(Some)
    }

    pub fn parse_item_status(&self, response: HttpResponse) -> Result<bool, ApiError> {
        let present: Present = self.parse(response)?;
        Ok(present.item_present)
    }

    pub fn build_clear_list(
        &self,
        context: &SessionContext,
        list_id: i64,
        confirm: bool,
    ) -> Result<HttpRequest, ApiError> {
        let url = self
            .endpoint("list")
            .path(list_id)
            .path("clear")
            .param("session_id", context.session_id())
            .param("confirm", confirm);
        self.write::<()>(HttpMethod::Post, url, None)
    }

    pub fn build_create_list(
        &self,
        context: &SessionContext,
        name: &str,
        description: &str,
    ) -> Result<HttpRequest, ApiError> {
        let body = NewList {
            name: name.to_string(),
            description: description.to_string(),
            language: self.config.language.clone(),
        };
        let url = self.endpoint("list").param("session_id", context.session_id());
        self.write(HttpMethod::Post, url, Some(&body))
    }

    pub fn build_delete_list(
        &self,
        context: &SessionContext,
        list_id: i64,
    ) -> Result<HttpRequest, ApiError> {
        let url = self
            .endpoint("list")
            .path(list_id)
            .param("session_id", context.session_id());
        self.write::<()>(HttpMethod::Delete, url, None)
    }

    // Discovery

    pub fn build_discover_movies(
        &self,
        query: &MovieQuery,
        page: u32,
    ) -> Result<HttpRequest, ApiError> {
        self.get(query.apply(self.endpoint("discover/movie").param("page", page)))
    }

    pub fn build_discover_tv(&self, query: &TvQuery, page: u32) -> Result<HttpRequest, ApiError> {
        self.get(query.apply(self.endpoint("discover/tv").param("page", page)))
    }

    // Details

    pub fn build_movie_details(&self, movie_id: i64) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("movie")
                .path(movie_id)
                .param("language", &self.config.language),
        )
    }

    pub fn build_credit(&self, credit_id: &str) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("credit").path(crate::url_builder::encode_value(credit_id)))
    }

    pub fn build_company(&self, company_id: i64) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("company").path(company_id))
    }

    pub fn build_keyword(&self, keyword_id: i64) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("keyword").path(keyword_id))
    }

    pub fn build_collection_images(&self, collection_id: i64) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("collection")
                .path(collection_id)
                .path("images")
                .param("language", &self.config.language),
        )
    }

    pub fn build_company_images(&self, company_id: i64) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("company").path(company_id).path("images"))
    }

    pub fn build_company_alternative_names(&self, company_id: i64) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("company")
                .path(company_id)
                .path("alternative_names"),
        )
    }

    pub fn build_collection(&self, collection_id: i64) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("collection")
                .path(collection_id)
                .param("language", &self.config.language),
        )
    }

    /// Every translation at once, so no language parameter.
    pub fn build_collection_translations(&self, collection_id: i64) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("collection")
                .path(collection_id)
                .path("translations"),
        )
    }

    /// Looks up movies, shows and people by an id from another database.
    pub fn build_find(&self, external_id: &str, source: ExternalId) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("find")
                .path(crate::url_builder::encode_value(external_id))
                .param("external_source", source)
                .param("language", &self.config.language),
        )
    }

    // Reference data

    pub fn build_genres(&self, media: MediaType) -> Result<HttpRequest, ApiError> {
        self.get(
            self.endpoint("genre")
                .path(media)
                .path("list")
                .param("language", &self.config.language),
        )
    }

    pub fn build_certifications(&self, media: MediaType) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("certification").path(media).path("list"))
    }

    /// Ids of `media` changed in the last day.
    pub fn build_changes(&self, media: MediaType, page: u32) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint(media.as_str()).path("changes").param("page", page))
    }

    pub fn build_configuration(&self) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("configuration"))
    }

    pub fn build_configuration_list(&self, list: ConfigurationList) -> Result<HttpRequest, ApiError> {
        self.get(self.endpoint("configuration").path(list))
    }

    // Parsing

    /// Classifies the status, then decodes the body as `T`.
    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        classify_status(i32::from(response.status))?;
        decode(&response.body)
    }

    /// Classifies the status of a write whose body is not needed.
    pub fn parse_empty(&self, response: HttpResponse) -> Result<(), ApiError> {
        classify_status(i32::from(response.status))
    }
}
