//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and drives the SDK over real
//! HTTP twice: once through `Tmdb` (reqwest transport, session store), and
//! once host-does-IO style with ureq executing the `HttpRequest` values the
//! `TmdbClient` builds.

use std::net::SocketAddr;

use tmdb_core::discover::QueryWith;
use tmdb_core::{
    ApiError, CollectionType, HttpMethod, HttpRequest, HttpResponse, MediaType, MovieQuery,
    SessionState, SortOrder, Tmdb, TmdbClient, TmdbConfig, TvQuery,
};

/// Runs the mock server on its own thread and returns its address.
fn start_mock_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

fn config(addr: SocketAddr) -> TmdbConfig {
    TmdbConfig::new("test-key").with_base_url(&format!("http://{addr}"))
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Non-2xx answers come back as data so the client does the classifying.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Delete, Some(body)) => agent
            .delete(&req.url)
            .force_send_body()
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Delete, None) => agent.delete(&req.url).call(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_vec().unwrap_or_default();
    HttpResponse::new(status, body)
}

// --- Tmdb over reqwest ---

#[tokio::test]
async fn guest_login_then_logout() {
    let tmdb = Tmdb::new(config(start_mock_server()));
    assert_eq!(tmdb.context().await.state(), SessionState::LoggedOut);

    let context = tmdb.login_guest().await.unwrap();
    assert_eq!(context.state(), SessionState::GuestActive);
    assert!(!context.session_id().is_empty());
    assert!(context.account().is_guest());

    let context = tmdb.logout().await.unwrap();
    assert_eq!(context.state(), SessionState::LoggedOut);
    assert_eq!(context.session_id(), "");
}

#[tokio::test]
async fn user_login_loads_account() {
    let tmdb = Tmdb::new(config(start_mock_server()));
    let context = tmdb.login_user("jdoe", "pass123").await.unwrap();

    assert_eq!(context.state(), SessionState::UserActive);
    assert_eq!(context.account_id(), 548);
    assert_eq!(context.account().username, "jdoe");
    assert_eq!(tmdb.context().await.session_id(), context.session_id());

    let account = tmdb.account(&context).await.unwrap();
    assert_eq!(account.id, 548);
}

#[tokio::test]
async fn wrong_password_leaves_store_logged_out() {
    let tmdb = Tmdb::new(config(start_mock_server()));
    tmdb.login_guest().await.unwrap();

    let err = tmdb.login_user("jdoe", "wrong").await.unwrap_err();
    assert_eq!(err, ApiError::InvalidStatusCode(401));
    assert_eq!(tmdb.context().await.state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn wrong_api_key_is_a_401() {
    let addr = start_mock_server();
    let tmdb = Tmdb::new(TmdbConfig::new("nope").with_base_url(&format!("http://{addr}")));
    let err = tmdb.configuration().await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn unreachable_host_reports_no_status() {
    // Bind then drop so the port is very likely closed.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let tmdb = Tmdb::new(config(addr));
    let err = tmdb.login_guest().await.unwrap_err();
    assert_eq!(err, ApiError::InvalidStatusCode(-1));
    assert_eq!(tmdb.context().await.state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn favorites_and_watchlist() {
    let tmdb = Tmdb::new(config(start_mock_server()));
    let context = tmdb.login_user("jdoe", "pass123").await.unwrap();

    tmdb.set_favorite(&context, MediaType::Movie, 603, true)
        .await
        .unwrap();
    tmdb.set_watchlist(&context, MediaType::Tv, 1396, true)
        .await
        .unwrap();

    let favorites = tmdb
        .account_movies(&context, CollectionType::Favorite, 1, SortOrder::Ascending)
        .await
        .unwrap();
    assert_eq!(favorites.total_results, 1);
    assert_eq!(favorites.results[0].title, "The Matrix");

    let watchlist = tmdb
        .account_tv(&context, CollectionType::Watchlist, 1, SortOrder::Descending)
        .await
        .unwrap();
    assert_eq!(watchlist.results[0].name, "Breaking Bad");

    tmdb.set_favorite(&context, MediaType::Movie, 603, false)
        .await
        .unwrap();
    let favorites = tmdb
        .account_movies(&context, CollectionType::Favorite, 1, SortOrder::Ascending)
        .await
        .unwrap();
    assert!(favorites.results.is_empty());
}

#[tokio::test]
async fn list_lifecycle() {
    let tmdb = Tmdb::new(config(start_mock_server()));
    let context = tmdb.login_user("jdoe", "pass123").await.unwrap();

    let created = tmdb
        .create_list(&context, "Heists", "Slow burns")
        .await
        .unwrap();
    let id = created.list_id;
    assert!(created.success);

    tmdb.add_list_item(&context, id, MediaType::Movie, 550)
        .await
        .unwrap();
    let duplicate = tmdb
        .add_list_item(&context, id, MediaType::Movie, 550)
        .await
        .unwrap_err();
    assert_eq!(duplicate, ApiError::InvalidStatusCode(403));

    assert!(tmdb.item_in_list(id, MediaType::Movie, 550).await.unwrap());
    assert!(!tmdb.item_in_list(id, MediaType::Tv, 550).await.unwrap());
    assert!(!tmdb.item_in_list(id, MediaType::Person, 550).await.unwrap());

    let lists = tmdb.account_lists(&context, 1).await.unwrap();
    assert_eq!(lists.results.len(), 1);
    assert_eq!(lists.results[0].item_count, 1);

    let details = tmdb.list_details(id, 1).await.unwrap();
    assert_eq!(details.id, id.to_string());
    assert_eq!(details.items[0].title, "Fight Club");

    let unconfirmed = tmdb.clear_list(&context, id, false).await.unwrap_err();
    assert_eq!(unconfirmed, ApiError::InvalidStatusCode(400));
    tmdb.clear_list(&context, id, true).await.unwrap();
    assert_eq!(tmdb.list_details(id, 1).await.unwrap().item_count, 0);

    tmdb.delete_list(&context, id).await.unwrap();
    let gone = tmdb.list_details(id, 1).await.unwrap_err();
    assert_eq!(gone, ApiError::InvalidStatusCode(404));
}

#[tokio::test]
async fn discover_and_genres() {
    let tmdb = Tmdb::new(config(start_mock_server()));

    let query = MovieQuery {
        with: QueryWith {
            genres: "28,878".to_string(),
            ..QueryWith::default()
        },
        ..MovieQuery::default()
    };
    let movies = tmdb.discover_movies(&query, 1).await.unwrap();
    assert_eq!(movies.results.len(), 1);
    assert_eq!(movies.results[0].id, 603);

    let shows = tmdb.discover_tv(&TvQuery::default(), 1).await.unwrap();
    assert_eq!(shows.total_results, 2);

    let genres = tmdb.genres(MediaType::Tv).await.unwrap();
    assert!(genres.iter().any(|g| g.name == "Sci-Fi & Fantasy"));

    let config = tmdb.configuration().await.unwrap();
    assert_eq!(
        config.images.image_url("w500", "/poster.jpg"),
        "https://image.tmdb.org/t/p/w500/poster.jpg"
    );
}

// --- host-does-IO with ureq ---

#[test]
fn host_driven_session_flow() {
    let client = TmdbClient::new(config(start_mock_server()));

    let token = client
        .parse_request_token(execute(client.build_request_token().unwrap()))
        .unwrap();

    let req = client
        .build_validate_with_login(&token.request_token, "jdoe", "pass123")
        .unwrap();
    let validated = client.parse_request_token(execute(req)).unwrap();
    assert_eq!(validated.request_token, token.request_token);

    let req = client.build_new_session(&validated.request_token).unwrap();
    let session = client.parse_new_session(execute(req)).unwrap();
    assert!(!session.session_id.is_empty());

    // The token was spent on the first session.
    let req = client.build_new_session(&validated.request_token).unwrap();
    let err = client.parse_new_session(execute(req)).unwrap_err();
    assert_eq!(err, ApiError::InvalidStatusCode(401));

    let req = client.build_delete_session(&session.session_id).unwrap();
    client.parse_empty(execute(req)).unwrap();

    let req = client.build_delete_session(&session.session_id).unwrap();
    let err = client.parse_empty(execute(req)).unwrap_err();
    assert_eq!(err, ApiError::InvalidStatusCode(404));
}

#[test]
fn host_driven_guest_session() {
    let client = TmdbClient::new(config(start_mock_server()));
    let guest = client
        .parse_guest_session(execute(client.build_guest_session().unwrap()))
        .unwrap();
    assert!(guest.success);
    assert!(!guest.guest_session_id.is_empty());
}
