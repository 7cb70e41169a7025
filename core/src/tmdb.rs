//! High-level async API: client, dispatcher and session store in one value.
//!
//! # Design
//! `Tmdb` owns the only `SessionStore`. Login and logout run as a single
//! transition each, so concurrent flows queue up instead of interleaving.
//! `context()` never waits on a flow's network calls.
//! All other calls take a `&SessionContext` (usually from `context()`) and
//! never touch the store.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::client::{decode, TmdbClient};
use crate::config::TmdbConfig;
use crate::discover::{MovieQuery, TvQuery};
use crate::dispatcher::{Dispatcher, ReqwestTransport, Transport};
use crate::enums::{CollectionType, ConfigurationList, ExternalId, MediaType, SortOrder};
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::session::{SessionContext, SessionStore};
use crate::types::{
    Account, AlternativeNames, Certifications, Company, CompanyImages, Configuration, Country,
    Credit, FindResults, Genre, Genres, ImageCollection, Job, Keyword, Language, ListDetails,
    ListResult, MediaCollection, MediaIndex, Movie, MovieDetails, Page, Timezone,
    TranslationIndex, Translations, TvEpisode, TvShow, UserList,
};

pub struct Tmdb {
    client: TmdbClient,
    dispatcher: Dispatcher,
    sessions: SessionStore,
}

impl Tmdb {
    pub fn new(config: TmdbConfig) -> Self {
        let transport = ReqwestTransport::new().with_read_timeout(config.read_timeout);
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: TmdbConfig, transport: impl Transport + 'static) -> Self {
        Self {
            client: TmdbClient::new(config),
            dispatcher: Dispatcher::new(transport),
            sessions: SessionStore::new(),
        }
    }

    pub fn client(&self) -> &TmdbClient {
        &self.client
    }

    /// The current session and account, as one consistent pair.
    pub async fn context(&self) -> Arc<SessionContext> {
        self.sessions.snapshot().await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        request: Result<HttpRequest, ApiError>,
    ) -> Result<T, ApiError> {
        let body = self.dispatcher.get_resource(&request?).await?;
        decode(&body)
    }

    async fn mutate(&self, request: Result<HttpRequest, ApiError>) -> Result<(), ApiError> {
        self.dispatcher.mutate_resource(&request?).await
    }

    // Session flows

    /// Starts a guest session. On failure the previous context stays.
    pub async fn login_guest(&self) -> Result<Arc<SessionContext>, ApiError> {
        let mut transition = self.sessions.begin().await;
        let request = self.client.build_guest_session()?;
        let response = self.dispatcher.fetch(&request).await.map_err(|e| {
            warn!(error = %e, "guest login failed");
            e
        })?;
        let guest = self.client.parse_guest_session(response)?;
        let expires_at = Some(guest.expires_at).filter(|at| !at.is_empty());
        info!("guest session started");
        Ok(transition
            .replace(SessionContext::guest(guest.guest_session_id, expires_at))
            .await)
    }

    /// Logs in with credentials. Any failure leaves the store logged out,
    /// whatever it held before.
    pub async fn login_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Arc<SessionContext>, ApiError> {
        let mut transition = self.sessions.begin().await;
        transition.replace(SessionContext::logged_out()).await;
        match self.user_session(username, password).await {
            Ok(context) => {
                info!(account_id = context.account_id(), "user session started");
                Ok(transition.replace(context).await)
            }
            Err(e) => {
                warn!(error = %e, "user login failed");
                Err(e)
            }
        }
    }

    async fn user_session(&self, username: &str, password: &str) -> Result<SessionContext, ApiError> {
        let response = self.dispatcher.fetch(&self.client.build_request_token()?).await?;
        let token = self.client.parse_request_token(response)?;

        let request =
            self.client
                .build_validate_with_login(&token.request_token, username, password)?;
        let response = self.dispatcher.fetch(&request).await?;
        let validated = self.client.parse_request_token(response)?;

        let request = self.client.build_new_session(&validated.request_token)?;
        let response = self.dispatcher.fetch(&request).await?;
        let session = self.client.parse_new_session(response)?;

        let pending = SessionContext::user(session.session_id.clone(), Account::guest());
        let account: Account = self.get(self.client.build_account(&pending)).await?;
        Ok(SessionContext::user(session.session_id, account))
    }

    /// Ends the active session. Local state changes only once the service
    /// confirms. Without a session this is a no-op.
    pub async fn logout(&self) -> Result<Arc<SessionContext>, ApiError> {
        let mut transition = self.sessions.begin().await;
        let current = transition.current().await;
        let Some(session) = current.session() else {
            return Ok(current);
        };
        let request = self.client.build_delete_session(&session.session_id)?;
        if let Err(e) = self.dispatcher.mutate_resource(&request).await {
            warn!(error = %e, "logout failed, keeping session");
            return Err(e);
        }
        info!("session ended");
        Ok(transition.replace(SessionContext::logged_out()).await)
    }

    // Account

    pub async fn account(&self, context: &SessionContext) -> Result<Account, ApiError> {
        self.get(self.client.build_account(context)).await
    }

    pub async fn account_movies(
        &self,
        context: &SessionContext,
        collection: CollectionType,
        page: u32,
        sort: SortOrder,
    ) -> Result<Page<Movie>, ApiError> {
        let request =
            self.client
                .build_account_collection(context, collection, MediaType::Movie, page, sort);
        self.get(request).await
    }

    pub async fn account_tv(
        &self,
        context: &SessionContext,
        collection: CollectionType,
        page: u32,
        sort: SortOrder,
    ) -> Result<Page<TvShow>, ApiError> {
        let request =
            self.client
                .build_account_collection(context, collection, MediaType::Tv, page, sort);
        self.get(request).await
    }

    pub async fn guest_rated_movies(
        &self,
        context: &SessionContext,
        page: u32,
        sort: SortOrder,
    ) -> Result<Page<Movie>, ApiError> {
        self.get(self.client.build_guest_rated(context, MediaType::Movie, page, sort))
            .await
    }

    pub async fn guest_rated_tv(
        &self,
        context: &SessionContext,
        page: u32,
        sort: SortOrder,
    ) -> Result<Page<TvShow>, ApiError> {
        self.get(self.client.build_guest_rated(context, MediaType::Tv, page, sort))
            .await
    }

    pub async fn account_rated_episodes(
        &self,
        context: &SessionContext,
        page: u32,
        sort: SortOrder,
    ) -> Result<Page<TvEpisode>, ApiError> {
        self.get(self.client.build_account_rated_episodes(context, page, sort))
            .await
    }

    pub async fn guest_rated_episodes(
        &self,
        context: &SessionContext,
        page: u32,
        sort: SortOrder,
    ) -> Result<Page<TvEpisode>, ApiError> {
        self.get(self.client.build_guest_rated_episodes(context, page, sort))
            .await
    }

    pub async fn account_lists(
        &self,
        context: &SessionContext,
        page: u32,
    ) -> Result<Page<UserList>, ApiError> {
        self.get(self.client.build_account_lists(context, page)).await
    }

    pub async fn set_favorite(
        &self,
        context: &SessionContext,
        media: MediaType,
        media_id: i64,
        favorite: bool,
    ) -> Result<(), ApiError> {
        self.mutate(self.client.build_set_favorite(context, media, media_id, favorite))
            .await
    }

    pub async fn set_watchlist(
        &self,
        context: &SessionContext,
        media: MediaType,
        media_id: i64,
        on_watchlist: bool,
    ) -> Result<(), ApiError> {
        self.mutate(self.client.build_set_watchlist(context, media, media_id, on_watchlist))
            .await
    }

    // Lists

    pub async fn list_details(&self, list_id: i64, page: u32) -> Result<ListDetails, ApiError> {
        self.get(self.client.build_list_details(list_id, page)).await
    }

    pub async fn add_list_item(
        &self,
        context: &SessionContext,
        list_id: i64,
        media: MediaType,
        media_id: i64,
    ) -> Result<(), ApiError> {
        self.mutate(self.client.build_add_list_item(context, list_id, media, media_id))
            .await
    }

    pub async fn remove_list_item(
        &self,
        context: &SessionContext,
        list_id: i64,
        media: MediaType,
        media_id: i64,
    ) -> Result<(), ApiError> {
        self.mutate(self.client.build_remove_list_item(context, list_id, media, media_id))
            .await
    }

    pub async fn item_in_list(
        &self,
        list_id: i64,
        media: MediaType,
        media_id: i64,
    ) -> Result<bool, ApiError> {
        let Some(request) = self.client.build_item_status(list_id, media, media_id)? else {
            return Ok(false);
        };
        let response = self.dispatcher.fetch(&request).await?;
        self.client.parse_item_status(response)
    }

    pub async fn clear_list(
        &self,
        context: &SessionContext,
        list_id: i64,
        confirm: bool,
    ) -> Result<(), ApiError> {
        self.mutate(self.client.build_clear_list(context, list_id, confirm))
            .await
    }

    pub async fn create_list(
        &self,
        context: &SessionContext,
        name: &str,
        description: &str,
    ) -> Result<ListResult, ApiError> {
        let request = self.client.build_create_list(context, name, description)?;
        let result: ListResult = self.dispatcher.mutate_and_decode(&request).await?;
        if !result.success {
            return Err(ApiError::Unsuccessful("list creation"));
        }
        Ok(result)
    }

    pub async fn delete_list(&self, context: &SessionContext, list_id: i64) -> Result<(), ApiError> {
        self.mutate(self.client.build_delete_list(context, list_id)).await
    }

    // Discovery

    pub async fn discover_movies(&self, query: &MovieQuery, page: u32) -> Result<Page<Movie>, ApiError> {
        self.get(self.client.build_discover_movies(query, page)).await
    }

    pub async fn discover_tv(&self, query: &TvQuery, page: u32) -> Result<Page<TvShow>, ApiError> {
        self.get(self.client.build_discover_tv(query, page)).await
    }

    // Details

    pub async fn movie_details(&self, movie_id: i64) -> Result<MovieDetails, ApiError> {
        self.get(self.client.build_movie_details(movie_id)).await
    }

    pub async fn credit(&self, credit_id: &str) -> Result<Credit, ApiError> {
        self.get(self.client.build_credit(credit_id)).await
    }

    pub async fn company(&self, company_id: i64) -> Result<Company, ApiError> {
        self.get(self.client.build_company(company_id)).await
    }

    pub async fn company_images(&self, company_id: i64) -> Result<CompanyImages, ApiError> {
        self.get(self.client.build_company_images(company_id)).await
    }

    pub async fn company_alternative_names(
        &self,
        company_id: i64,
    ) -> Result<AlternativeNames, ApiError> {
        self.get(self.client.build_company_alternative_names(company_id))
            .await
    }

    pub async fn keyword(&self, keyword_id: i64) -> Result<Keyword, ApiError> {
        self.get(self.client.build_keyword(keyword_id)).await
    }

    pub async fn collection(&self, collection_id: i64) -> Result<MediaCollection, ApiError> {
        self.get(self.client.build_collection(collection_id)).await
    }

    pub async fn collection_translations(
        &self,
        collection_id: i64,
    ) -> Result<Translations, ApiError> {
        self.get(self.client.build_collection_translations(collection_id))
            .await
    }

    pub async fn collection_images(&self, collection_id: i64) -> Result<ImageCollection, ApiError> {
        self.get(self.client.build_collection_images(collection_id)).await
    }

    pub async fn find(&self, external_id: &str, source: ExternalId) -> Result<FindResults, ApiError> {
        self.get(self.client.build_find(external_id, source)).await
    }

    // Reference data

    pub async fn genres(&self, media: MediaType) -> Result<Vec<Genre>, ApiError> {
        let genres: Genres = self.get(self.client.build_genres(media)).await?;
        Ok(genres.genres)
    }

    pub async fn certifications(&self, media: MediaType) -> Result<Certifications, ApiError> {
        self.get(self.client.build_certifications(media)).await
    }

    pub async fn changes(&self, media: MediaType, page: u32) -> Result<Page<MediaIndex>, ApiError> {
        self.get(self.client.build_changes(media, page)).await
    }

    pub async fn configuration(&self) -> Result<Configuration, ApiError> {
        self.get(self.client.build_configuration()).await
    }

    pub async fn countries(&self) -> Result<Vec<Country>, ApiError> {
        self.get(self.client.build_configuration_list(ConfigurationList::Countries))
            .await
    }

    pub async fn jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.get(self.client.build_configuration_list(ConfigurationList::Jobs))
            .await
    }

    pub async fn languages(&self) -> Result<Vec<Language>, ApiError> {
        self.get(self.client.build_configuration_list(ConfigurationList::Languages))
            .await
    }

    pub async fn timezones(&self) -> Result<Vec<Timezone>, ApiError> {
        self.get(self.client.build_configuration_list(ConfigurationList::Timezones))
            .await
    }

    pub async fn primary_translations(&self) -> Result<TranslationIndex, ApiError> {
        self.get(self.client.build_configuration_list(ConfigurationList::PrimaryTranslations))
            .await
    }
}
