use super::*;
use axum::{
    http::{HeaderMap as AxumHeaders, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

fn header(headers: &AxumHeaders, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| Value::String(value.to_string()))
        .unwrap_or(Value::Null)
}

async fn echo_post(headers: AxumHeaders, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "authorization": header(&headers, "authorization"),
        "content_type": header(&headers, "content-type"),
        "body": body,
    }))
}

async fn echo_get(headers: AxumHeaders) -> Json<Value> {
    Json(json!({ "authorization": header(&headers, "authorization") }))
}

async fn conflict() -> (StatusCode, Json<Value>) {
    (
        StatusCode::CONFLICT,
        Json(json!({ "message": "user already exists" })),
    )
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn spawn_echo_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/cards", post(echo_post))
        .route("/users/me", get(echo_get))
        .route("/signup", post(conflict))
        .route("/cards/:id", delete(no_content));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn attaches_shared_headers_and_json_body() {
    let base = spawn_echo_server().await;
    let client = HttpClient::new(&base, Some("fixed-token")).expect("client");

    let request = ApiRequest::post("/cards")
        .json(&json!({ "name": "Lake", "link": "https://img/lake.jpg" }))
        .expect("encode");
    let echoed = client.send(request).await.expect("send");

    assert_eq!(echoed["authorization"], "fixed-token");
    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["body"]["name"], "Lake");
}

#[tokio::test]
async fn bearer_token_replaces_fixed_authorization() {
    let base = spawn_echo_server().await;
    let client = HttpClient::new(&format!("{base}/"), Some("fixed-token")).expect("client");

    let echoed = client
        .send(ApiRequest::get("users/me").bearer("jwt-123"))
        .await
        .expect("send");

    assert_eq!(echoed["authorization"], "Bearer jwt-123");
}

#[tokio::test]
async fn omits_authorization_when_not_configured() {
    let base = spawn_echo_server().await;
    let client = HttpClient::new(&base, None).expect("client");

    let echoed = client
        .send(ApiRequest::get("/users/me"))
        .await
        .expect("send");

    assert_eq!(echoed["authorization"], Value::Null);
}

#[tokio::test]
async fn non_success_status_maps_to_http_error() {
    let base = spawn_echo_server().await;
    let client = HttpClient::new(&base, None).expect("client");

    let err = client
        .send(ApiRequest::post("/signup"))
        .await
        .expect_err("conflict must fail");

    match err {
        ClientError::Http(http) => {
            assert_eq!(http.status, 409);
            assert_eq!(http.method, Method::POST);
            assert_eq!(http.url, format!("{base}/signup"));
            assert_eq!(http.message.as_deref(), Some("user already exists"));
            assert_eq!(http.code(), shared::error::ErrorCode::Conflict);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_success_body_decodes_as_null() {
    let base = spawn_echo_server().await;
    let client = HttpClient::new(&base, None).expect("client");

    let value = client
        .send(ApiRequest::delete("/cards/abc"))
        .await
        .expect("send");

    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpClient::new(&format!("http://{addr}"), None).expect("client");
    let err = client
        .send(ApiRequest::get("/cards"))
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, ClientError::Network { .. }), "got {err}");
    assert!(err.is_remote());
}

#[test]
fn rejects_unusable_base_urls() {
    assert!(HttpClient::new("not a url", None).is_err());
    assert!(HttpClient::new("ftp://example.com", None).is_err());
}

#[test]
fn joins_paths_against_base() {
    let client = HttpClient::new("https://mesto.example/v1/cohort/", None).expect("client");
    assert_eq!(
        client.url_for("/cards/42/likes"),
        "https://mesto.example/v1/cohort/cards/42/likes"
    );
}
