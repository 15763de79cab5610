use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::*;

async fn spawn_users_server(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}/users"))
}

fn sample_users(count: i64) -> Value {
    let users: Vec<Value> = (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("User {id}"),
                "username": format!("user{id}"),
                "email": format!("user{id}@example.org"),
                "address": { "city": "Gwenborough" },
                "phone": format!("1-770-736-80{id:02}"),
                "website": "hildegard.org",
            })
        })
        .collect();
    Value::Array(users)
}

#[tokio::test]
async fn fetch_keeps_only_the_first_page() {
    let app = Router::new().route("/users", get(|| async { Json(sample_users(10)) }));
    let url = spawn_users_server(app).await.expect("spawn server");

    let remote = HttpRemoteDirectory::new(url, Duration::from_secs(5)).expect("client");
    let users = remote.fetch_users().await.expect("users");
    assert_eq!(users.len(), REMOTE_PAGE_SIZE);
    assert_eq!(users[0].id, 1);
    assert_eq!(users[5].email, "user6@example.org");
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let app = Router::new().route(
        "/users",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let url = spawn_users_server(app).await.expect("spawn server");

    let remote = HttpRemoteDirectory::new(url, Duration::from_secs(5)).expect("client");
    let err = remote.fetch_users().await.expect_err("should fail");
    assert_eq!(err, FetchError::Status(500));
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn non_array_body_is_a_decode_error() {
    let app = Router::new().route("/users", get(|| async { Json(json!({"users": []})) }));
    let url = spawn_users_server(app).await.expect("spawn server");

    let remote = HttpRemoteDirectory::new(url, Duration::from_secs(5)).expect("client");
    let err = remote.fetch_users().await.expect_err("should fail");
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

fn page_with_broken_tail() -> Value {
    let Value::Array(mut users) = sample_users(6) else {
        unreachable!("sample_users builds an array");
    };
    users.push(json!({ "id": 7, "name": "Broken" }));
    users.push(json!({ "id": "eight", "name": null }));
    Value::Array(users)
}

#[tokio::test]
async fn malformed_items_past_the_page_are_never_decoded() {
    let app = Router::new().route("/users", get(|| async { Json(page_with_broken_tail()) }));
    let url = spawn_users_server(app).await.expect("spawn server");

    let remote = HttpRemoteDirectory::new(url, Duration::from_secs(5)).expect("client");
    let users = remote.fetch_users().await.expect("first page is valid");
    assert_eq!(users.len(), 6);
    assert_eq!(users[5].id, 6);

    let store = storage::MemoryStore::new();
    let mut view = crate::DirectoryView::new();
    view.load(&store, &remote).await;
    let crate::DirectoryRender::Ready { entries } = view.render() else {
        panic!("expected ready state, got {:?}", view.render());
    };
    assert_eq!(entries.len(), 6);
}

#[tokio::test]
async fn malformed_item_inside_the_page_is_a_decode_error() {
    let app = Router::new().route(
        "/users",
        get(|| async {
            let Value::Array(mut users) = sample_users(6) else {
                unreachable!("sample_users builds an array");
            };
            users[2] = json!({ "id": "three" });
            Json(Value::Array(users))
        }),
    );
    let url = spawn_users_server(app).await.expect("spawn server");

    let remote = HttpRemoteDirectory::new(url, Duration::from_secs(5)).expect("client");
    let err = remote.fetch_users().await.expect_err("should fail");
    assert!(
        matches!(&err, FetchError::Decode(reason) if reason.contains("index 2")),
        "got {err:?}"
    );
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let remote = HttpRemoteDirectory::new(format!("http://{addr}/users"), Duration::from_secs(2))
        .expect("client");
    let err = remote.fetch_users().await.expect_err("should fail");
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
}
