//! In-memory stand-in for the TMDB v3 API.
//!
//! Serves the authentication flow, one user account with its favorite and
//! watchlist marks, user lists, a tiny discovery catalog and the genre
//! lists. Every route requires the configured `api_key` query parameter.
//! Failures answer with the service's `{success, status_code,
//! status_message}` body.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub api_key: String,
    pub username: String,
    pub password: String,
    pub account_id: i64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            api_key: "test-key".to_string(),
            username: "jdoe".to_string(),
            password: "pass123".to_string(),
            account_id: 548,
        }
    }
}

/// A failing answer in the service's error shape.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    code: i32,
    message: &'static str,
}

impl Failure {
    const fn new(status: StatusCode, code: i32, message: &'static str) -> Self {
        Self {
            status,
            code,
            message,
        }
    }
}

const INVALID_API_KEY: Failure = Failure::new(
    StatusCode::UNAUTHORIZED,
    7,
    "Invalid API key: You must be granted a valid key.",
);
const NOT_FOUND: Failure = Failure::new(
    StatusCode::NOT_FOUND,
    34,
    "The resource you requested could not be found.",
);
const BAD_LOGIN: Failure = Failure::new(
    StatusCode::UNAUTHORIZED,
    30,
    "Invalid username and/or password: You did not provide a valid login.",
);
const BAD_TOKEN: Failure = Failure::new(
    StatusCode::UNAUTHORIZED,
    33,
    "Invalid request token: The request token is either expired or invalid.",
);
const NO_SESSION: Failure = Failure::new(
    StatusCode::UNAUTHORIZED,
    3,
    "Authentication failed: You do not have permissions to access the service.",
);
const NEEDS_CONFIRM: Failure = Failure::new(
    StatusCode::BAD_REQUEST,
    29,
    "You must confirm this action: Please provide a confirm=true parameter.",
);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "status_code": self.code,
            "status_message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

fn confirmation(status: StatusCode, code: i32, message: &str) -> Response {
    let body = json!({"success": true, "status_code": code, "status_message": message});
    (status, Json(body)).into_response()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MockList {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub iso_639_1: String,
    pub items: Vec<(String, i64)>,
}

#[derive(Debug, Default)]
pub struct Db {
    /// Request token -> validated with a login.
    tokens: HashMap<String, bool>,
    user_sessions: HashSet<String>,
    guest_sessions: HashSet<String>,
    /// (collection, media_type) -> media ids.
    marks: HashMap<(String, String), Vec<i64>>,
    lists: BTreeMap<i64, MockList>,
    next_list_id: i64,
}

pub struct MockState {
    config: MockConfig,
    db: RwLock<Db>,
}

pub type AppState = Arc<MockState>;

type Params = Query<HashMap<String, String>>;

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let state: AppState = Arc::new(MockState {
        config,
        db: RwLock::new(Db {
            next_list_id: 1,
            ..Db::default()
        }),
    });
    Router::new()
        .route("/authentication/token/new", get(new_token))
        .route("/authentication/token/validate_with_login", get(validate_with_login))
        .route("/authentication/session/new", get(new_session))
        .route("/authentication/guest_session/new", get(new_guest_session))
        .route("/authentication/session", axum::routing::delete(delete_session))
        .route("/account", get(account))
        .route("/account/{account_id}/lists", get(account_lists))
        .route("/account/{account_id}/{collection}", post(mark_media))
        .route("/account/{account_id}/{collection}/{media}", get(account_collection))
        .route("/guest_session/{session_id}/rated/{media}", get(guest_rated))
        .route("/list", post(create_list))
        .route("/list/{list_id}", get(list_details).delete(delete_list))
        .route("/list/{list_id}/add_item", post(add_item))
        .route("/list/{list_id}/remove_item", post(remove_item))
        .route("/list/{list_id}/item_status", get(item_status))
        .route("/list/{list_id}/clear", post(clear_list))
        .route("/discover/{media}", get(discover))
        .route("/genre/{media}/list", get(genres))
        .route("/configuration", get(configuration))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock TMDB listening");
    }
    axum::serve(listener, app_with(config)).await
}

async fn require_api_key(
    State(state): State<AppState>,
    Query(params): Params,
    request: Request,
    next: Next,
) -> Response {
    debug!(method = %request.method(), path = request.uri().path(), "request");
    if params.get("api_key") != Some(&state.config.api_key) {
        return INVALID_API_KEY.into_response();
    }
    next.run(request).await
}

impl MockState {
    /// Resolves the `session_id` parameter to a user session.
    async fn user_session(&self, params: &HashMap<String, String>) -> Result<(), Failure> {
        let session = params.get("session_id").ok_or(NO_SESSION)?;
        if self.db.read().await.user_sessions.contains(session) {
            Ok(())
        } else {
            Err(NO_SESSION)
        }
    }

    fn check_account(&self, account_id: i64) -> Result<(), Failure> {
        if account_id == self.config.account_id {
            Ok(())
        } else {
            Err(NOT_FOUND)
        }
    }
}

fn expiry() -> &'static str {
    "2099-01-01 00:00:00 UTC"
}

// Authentication

async fn new_token(State(state): State<AppState>) -> Json<Value> {
    let token = Uuid::new_v4().simple().to_string();
    state.db.write().await.tokens.insert(token.clone(), false);
    Json(json!({"success": true, "expires_at": expiry(), "request_token": token}))
}

async fn validate_with_login(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<Json<Value>, Failure> {
    let token = params.get("request_token").ok_or(BAD_TOKEN)?;
    let mut db = state.db.write().await;
    let validated = db.tokens.get_mut(token).ok_or(BAD_TOKEN)?;
    let good_login = params.get("username") == Some(&state.config.username)
        && params.get("password") == Some(&state.config.password);
    if !good_login {
        return Err(BAD_LOGIN);
    }
    *validated = true;
    Ok(Json(json!({"success": true, "expires_at": expiry(), "request_token": token})))
}

async fn new_session(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<Json<Value>, Failure> {
    let token = params.get("request_token").ok_or(BAD_TOKEN)?;
    let mut db = state.db.write().await;
    if db.tokens.remove(token) != Some(true) {
        return Err(BAD_TOKEN);
    }
    let session_id = Uuid::new_v4().simple().to_string();
    db.user_sessions.insert(session_id.clone());
    Ok(Json(json!({"success": true, "session_id": session_id})))
}

async fn new_guest_session(State(state): State<AppState>) -> Json<Value> {
    let session_id = Uuid::new_v4().simple().to_string();
    state.db.write().await.guest_sessions.insert(session_id.clone());
    Json(json!({"success": true, "guest_session_id": session_id, "expires_at": expiry()}))
}

#[derive(Deserialize)]
struct SessionBody {
    session_id: String,
}

async fn delete_session(
    State(state): State<AppState>,
    Json(body): Json<SessionBody>,
) -> Result<Json<Value>, Failure> {
    let mut db = state.db.write().await;
    let removed = db.user_sessions.remove(&body.session_id)
        || db.guest_sessions.remove(&body.session_id);
    if !removed {
        return Err(NOT_FOUND);
    }
    Ok(Json(json!({"success": true})))
}

// Account

async fn account(State(state): State<AppState>, Query(params): Params) -> Result<Json<Value>, Failure> {
    state.user_session(&params).await?;
    let config = &state.config;
    Ok(Json(json!({
        "avatar": {"gravatar": {"hash": "c9e9fc152ee756a900db85757c29815d"}, "tmdb": {"avatar_path": null}},
        "id": config.account_id,
        "iso_639_1": "en",
        "iso_3166_1": "US",
        "name": "Jane Doe",
        "include_adult": false,
        "username": config.username,
    })))
}

fn page(results: Vec<Value>) -> Json<Value> {
    let total = results.len();
    Json(json!({
        "page": 1,
        "results": results,
        "total_pages": if total == 0 { 0 } else { 1 },
        "total_results": total,
    }))
}

async fn account_collection(
    State(state): State<AppState>,
    Path((account_id, collection, media)): Path<(i64, String, String)>,
    Query(params): Params,
) -> Result<Json<Value>, Failure> {
    state.check_account(account_id)?;
    state.user_session(&params).await?;
    let media_type = match media.as_str() {
        "movies" => "movie",
        "tv" => "tv",
        _ => return Err(NOT_FOUND),
    };
    let db = state.db.read().await;
    let ids = db
        .marks
        .get(&(collection, media_type.to_string()))
        .cloned()
        .unwrap_or_default();
    Ok(page(ids.into_iter().map(|id| catalog_entry(media_type, id)).collect()))
}

async fn guest_rated(
    State(state): State<AppState>,
    Path((session_id, _media)): Path<(String, String)>,
) -> Result<Json<Value>, Failure> {
    if !state.db.read().await.guest_sessions.contains(&session_id) {
        return Err(NOT_FOUND);
    }
    Ok(page(Vec::new()))
}

async fn account_lists(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    Query(params): Params,
) -> Result<Json<Value>, Failure> {
    state.check_account(account_id)?;
    state.user_session(&params).await?;
    let db = state.db.read().await;
    let lists = db
        .lists
        .values()
        .map(|list| {
            json!({
                "id": list.id,
                "name": list.name,
                "description": list.description,
                "favorite_count": 0,
                "item_count": list.items.len(),
                "iso_639_1": list.iso_639_1,
                "list_type": "movie",
                "poster_path": null,
            })
        })
        .collect();
    Ok(page(lists))
}

async fn mark_media(
    State(state): State<AppState>,
    Path((account_id, collection)): Path<(i64, String)>,
    Query(params): Params,
    Json(body): Json<Value>,
) -> Result<Response, Failure> {
    state.check_account(account_id)?;
    state.user_session(&params).await?;
    if collection != "favorite" && collection != "watchlist" {
        return Err(NOT_FOUND);
    }
    let media_type = body["media_type"].as_str().ok_or(NOT_FOUND)?.to_string();
    let media_id = body["media_id"].as_i64().ok_or(NOT_FOUND)?;
    let include = body[collection.as_str()].as_bool().unwrap_or(false);

    let mut db = state.db.write().await;
    let ids = db.marks.entry((collection, media_type)).or_default();
    ids.retain(|id| *id != media_id);
    if include {
        ids.push(media_id);
        Ok(confirmation(StatusCode::CREATED, 1, "Success."))
    } else {
        Ok(confirmation(StatusCode::OK, 13, "The item/record was deleted successfully."))
    }
}

// Lists

#[derive(Deserialize)]
struct NewListBody {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    language: String,
}

async fn create_list(
    State(state): State<AppState>,
    Query(params): Params,
    Json(body): Json<NewListBody>,
) -> Result<Response, Failure> {
    state.user_session(&params).await?;
    let mut db = state.db.write().await;
    let id = db.next_list_id;
    db.next_list_id += 1;
    db.lists.insert(
        id,
        MockList {
            id,
            name: body.name,
            description: body.description,
            iso_639_1: body.language,
            items: Vec::new(),
        },
    );
    let answer = json!({
        "status_message": "The item/record was created successfully.",
        "success": true,
        "status_code": 1,
        "list_id": id,
    });
    Ok((StatusCode::CREATED, Json(answer)).into_response())
}

async fn list_details(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
) -> Result<Json<Value>, Failure> {
    let db = state.db.read().await;
    let list = db.lists.get(&list_id).ok_or(NOT_FOUND)?;
    let items: Vec<Value> = list
        .items
        .iter()
        .map(|(media_type, id)| catalog_entry(media_type, *id))
        .collect();
    Ok(Json(json!({
        "id": list.id.to_string(),
        "name": list.name,
        "description": list.description,
        "created_by": state.config.username,
        "favorite_count": 0,
        "item_count": items.len(),
        "iso_639_1": list.iso_639_1,
        "poster_path": null,
        "items": items,
    })))
}

#[derive(Deserialize)]
struct ListItemBody {
    #[serde(default = "default_media_type")]
    media_type: String,
    media_id: i64,
}

fn default_media_type() -> String {
    "movie".to_string()
}

async fn add_item(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Query(params): Params,
    Json(body): Json<ListItemBody>,
) -> Result<Response, Failure> {
    state.user_session(&params).await?;
    let mut db = state.db.write().await;
    let list = db.lists.get_mut(&list_id).ok_or(NOT_FOUND)?;
    let item = (body.media_type, body.media_id);
    if list.items.contains(&item) {
        return Err(Failure::new(
            StatusCode::FORBIDDEN,
            8,
            "Duplicate entry: The data you tried to submit already exists.",
        ));
    }
    list.items.push(item);
    Ok(confirmation(StatusCode::CREATED, 12, "The item/record was updated successfully."))
}

async fn remove_item(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Query(params): Params,
    Json(body): Json<ListItemBody>,
) -> Result<Response, Failure> {
    state.user_session(&params).await?;
    let mut db = state.db.write().await;
    let list = db.lists.get_mut(&list_id).ok_or(NOT_FOUND)?;
    let item = (body.media_type, body.media_id);
    let before = list.items.len();
    list.items.retain(|existing| *existing != item);
    if list.items.len() == before {
        return Err(NOT_FOUND);
    }
    Ok(confirmation(StatusCode::OK, 13, "The item/record was deleted successfully."))
}

async fn item_status(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Query(params): Params,
) -> Result<Json<Value>, Failure> {
    let (media_type, raw_id) = match (params.get("movie_id"), params.get("tv_id")) {
        (Some(id), _) => ("movie", id),
        (None, Some(id)) => ("tv", id),
        (None, None) => return Err(NOT_FOUND),
    };
    let media_id: i64 = raw_id.parse().map_err(|_| NOT_FOUND)?;
    let db = state.db.read().await;
    let list = db.lists.get(&list_id).ok_or(NOT_FOUND)?;
    let present = list
        .items
        .iter()
        .any(|(kind, id)| kind == media_type && *id == media_id);
    Ok(Json(json!({"id": list.id, "item_present": present})))
}

async fn clear_list(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Query(params): Params,
) -> Result<Response, Failure> {
    state.user_session(&params).await?;
    if params.get("confirm").map(String::as_str) != Some("true") {
        return Err(NEEDS_CONFIRM);
    }
    let mut db = state.db.write().await;
    db.lists.get_mut(&list_id).ok_or(NOT_FOUND)?.items.clear();
    Ok(confirmation(StatusCode::CREATED, 12, "The item/record was updated successfully."))
}

async fn delete_list(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Query(params): Params,
) -> Result<Response, Failure> {
    state.user_session(&params).await?;
    let mut db = state.db.write().await;
    db.lists.remove(&list_id).ok_or(NOT_FOUND)?;
    Ok(confirmation(StatusCode::OK, 13, "The item/record was deleted successfully."))
}

// Catalog

/// (id, title, genre ids) for movies and shows.
const MOVIES: &[(i64, &str, &[i64])] = &[
    (550, "Fight Club", &[18]),
    (603, "The Matrix", &[28, 878]),
    (475557, "Joker", &[80, 53, 18]),
];
const SHOWS: &[(i64, &str, &[i64])] = &[(1399, "Game of Thrones", &[10765, 18]), (1396, "Breaking Bad", &[18, 80])];

fn catalog_entry(media_type: &str, id: i64) -> Value {
    let (table, title_key) = if media_type == "tv" {
        (SHOWS, "name")
    } else {
        (MOVIES, "title")
    };
    let (title, genre_ids) = table
        .iter()
        .find(|(entry_id, _, _)| *entry_id == id)
        .map(|(_, title, genres)| (title.to_string(), genres.to_vec()))
        .unwrap_or_else(|| (format!("Untitled {id}"), Vec::new()));
    let mut entry = json!({
        "id": id,
        "genre_ids": genre_ids,
        "overview": "",
        "popularity": 1.0,
        "vote_average": 7.0,
        "vote_count": 100,
    });
    entry[title_key] = Value::String(title);
    entry
}

async fn discover(Path(media): Path<String>, Query(params): Params) -> Result<Json<Value>, Failure> {
    let (media_type, table) = match media.as_str() {
        "movie" => ("movie", MOVIES),
        "tv" => ("tv", SHOWS),
        _ => return Err(NOT_FOUND),
    };
    // Comma means all of, pipe means any of.
    let wanted = params.get("with_genres").cloned().unwrap_or_default();
    let matches = |genres: &[i64]| -> bool {
        if wanted.is_empty() {
            return true;
        }
        let has = |raw: &str| raw.parse::<i64>().map(|id| genres.contains(&id)).unwrap_or(false);
        if wanted.contains('|') {
            wanted.split('|').any(has)
        } else {
            wanted.split(',').all(has)
        }
    };
    let results = table
        .iter()
        .filter(|(_, _, genres)| matches(*genres))
        .map(|(id, _, _)| catalog_entry(media_type, *id))
        .collect();
    Ok(page(results))
}

async fn genres(Path(media): Path<String>) -> Result<Json<Value>, Failure> {
    let genres = match media.as_str() {
        "movie" => json!([
            {"id": 18, "name": "Drama"},
            {"id": 28, "name": "Action"},
            {"id": 53, "name": "Thriller"},
            {"id": 80, "name": "Crime"},
            {"id": 878, "name": "Science Fiction"},
        ]),
        "tv" => json!([
            {"id": 18, "name": "Drama"},
            {"id": 80, "name": "Crime"},
            {"id": 10765, "name": "Sci-Fi & Fantasy"},
        ]),
        _ => return Err(NOT_FOUND),
    };
    Ok(Json(json!({"genres": genres})))
}

async fn configuration() -> Json<Value> {
    Json(json!({
        "change_keys": ["adult", "air_date", "title"],
        "images": {
            "base_url": "http://image.tmdb.org/t/p/",
            "secure_base_url": "https://image.tmdb.org/t/p/",
            "backdrop_sizes": ["w300", "w780", "w1280", "original"],
            "logo_sizes": ["w45", "w92", "original"],
            "poster_sizes": ["w92", "w185", "w500", "original"],
            "profile_sizes": ["w45", "h632", "original"],
            "still_sizes": ["w92", "w300", "original"],
        }
    }))
}
