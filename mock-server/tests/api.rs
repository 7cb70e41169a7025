use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::{Service, ServiceExt};

const KEY: &str = "api_key=test-key";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

/// Sends a request through a router that keeps its state between calls.
async fn call(app: &mut Router, request: Request<String>) -> (StatusCode, Value) {
    let response = ServiceExt::<Request<String>>::ready(app)
        .await
        .unwrap()
        .call(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn user_session(app: &mut Router) -> String {
    let (_, token) = call(app, get(&format!("/authentication/token/new?{KEY}"))).await;
    let token = token["request_token"].as_str().unwrap().to_string();
    let (status, _) = call(
        app,
        get(&format!(
            "/authentication/token/validate_with_login?{KEY}&request_token={token}&username=jdoe&password=pass123"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, session) = call(
        app,
        get(&format!("/authentication/session/new?{KEY}&request_token={token}")),
    )
    .await;
    session["session_id"].as_str().unwrap().to_string()
}

// --- api key ---

#[tokio::test]
async fn missing_api_key_is_rejected() {
    let resp = app().oneshot(get("/configuration")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["status_code"], 7);
}

#[tokio::test]
async fn wrong_api_key_is_rejected() {
    let resp = app()
        .oneshot(get("/configuration?api_key=nope"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- authentication ---

#[tokio::test]
async fn guest_session_is_issued() {
    let resp = app()
        .oneshot(get(&format!("/authentication/guest_session/new?{KEY}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(!body["guest_session_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn bad_password_fails_validation() {
    let mut app = app();
    let (_, token) = call(&mut app, get(&format!("/authentication/token/new?{KEY}"))).await;
    let token = token["request_token"].as_str().unwrap();
    let (status, body) = call(
        &mut app,
        get(&format!(
            "/authentication/token/validate_with_login?{KEY}&request_token={token}&username=jdoe&password=wrong"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status_code"], 30);
}

#[tokio::test]
async fn unvalidated_token_cannot_open_a_session() {
    let mut app = app();
    let (_, token) = call(&mut app, get(&format!("/authentication/token/new?{KEY}"))).await;
    let token = token["request_token"].as_str().unwrap();
    let (status, _) = call(
        &mut app,
        get(&format!("/authentication/session/new?{KEY}&request_token={token}")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_lifecycle() {
    let mut app = app();
    let session = user_session(&mut app).await;

    let (status, account) = call(&mut app, get(&format!("/account?{KEY}&session_id={session}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["id"], 548);
    assert_eq!(account["username"], "jdoe");

    let body = format!(r#"{{"session_id":"{session}"}}"#);
    let (status, _) = call(
        &mut app,
        json_request("DELETE", &format!("/authentication/session?{KEY}"), &body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&mut app, get(&format!("/account?{KEY}&session_id={session}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// --- account collections ---

#[tokio::test]
async fn favorites_follow_marks() {
    let mut app = app();
    let session = user_session(&mut app).await;
    let mark = format!("/account/548/favorite?{KEY}&session_id={session}");

    let (status, _) = call(
        &mut app,
        json_request("POST", &mark, r#"{"media_type":"movie","media_id":603,"favorite":true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, page) = call(
        &mut app,
        get(&format!("/account/548/favorite/movies?{KEY}&session_id={session}&page=1")),
    )
    .await;
    assert_eq!(page["total_results"], 1);
    assert_eq!(page["results"][0]["title"], "The Matrix");

    let (status, _) = call(
        &mut app,
        json_request("POST", &mark, r#"{"media_type":"movie","media_id":603,"favorite":false}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, page) = call(
        &mut app,
        get(&format!("/account/548/favorite/movies?{KEY}&session_id={session}")),
    )
    .await;
    assert_eq!(page["total_results"], 0);
}

#[tokio::test]
async fn other_accounts_are_not_found() {
    let mut app = app();
    let session = user_session(&mut app).await;
    let (status, _) = call(
        &mut app,
        get(&format!("/account/1/watchlist/tv?{KEY}&session_id={session}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- lists ---

#[tokio::test]
async fn list_lifecycle() {
    let mut app = app();
    let session = user_session(&mut app).await;
    let auth = format!("{KEY}&session_id={session}");

    let (status, created) = call(
        &mut app,
        json_request(
            "POST",
            &format!("/list?{auth}"),
            r#"{"name":"Heists","description":"","language":"en"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    let id = created["list_id"].as_i64().unwrap();

    let item = r#"{"media_type":"movie","media_id":550}"#;
    let (status, _) = call(
        &mut app,
        json_request("POST", &format!("/list/{id}/add_item?{auth}"), item),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = call(
        &mut app,
        json_request("POST", &format!("/list/{id}/add_item?{auth}"), item),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status_code"], 8);

    let (_, present) = call(
        &mut app,
        get(&format!("/list/{id}/item_status?{KEY}&movie_id=550")),
    )
    .await;
    assert_eq!(present["item_present"], true);

    let (status, _) = call(
        &mut app,
        json_request("POST", &format!("/list/{id}/clear?{auth}&confirm=false"), ""),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(
        &mut app,
        json_request("POST", &format!("/list/{id}/clear?{auth}&confirm=true"), ""),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, details) = call(&mut app, get(&format!("/list/{id}?{KEY}"))).await;
    assert_eq!(details["item_count"], 0);

    let (status, _) = call(
        &mut app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/list/{id}?{auth}"))
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&mut app, get(&format!("/list/{id}?{KEY}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- discovery and reference data ---

#[tokio::test]
async fn discover_filters_by_genre() {
    let resp = app()
        .oneshot(get(&format!("/discover/movie?{KEY}&with_genres=28%2C878")))
        .await
        .unwrap();
    let page = body_json(resp).await;
    assert_eq!(page["total_results"], 1);
    assert_eq!(page["results"][0]["id"], 603);

    let resp = app()
        .oneshot(get(&format!("/discover/tv?{KEY}&with_genres=80%7C10765")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["total_results"], 2);
}

#[tokio::test]
async fn genre_lists() {
    let resp = app()
        .oneshot(get(&format!("/genre/tv/list?{KEY}&language=en-US")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["genres"][2]["name"], "Sci-Fi & Fantasy");

    let resp = app()
        .oneshot(get(&format!("/genre/person/list?{KEY}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
