//! End-to-end over a real socket

use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{redirect, Client, StatusCode};
use std::sync::Arc;
use todo_api_http::{AppState, HttpServer, HttpServerConfig, HttpServerHandle};
use todo_core::port::id_provider::UuidProvider;
use todo_core::port::time_provider::SystemTimeProvider;
use todo_core::port::TimeProvider;
use todo_infra_sqlite::{create_pool, run_migrations, SqliteKvStore};

async fn start_server() -> (HttpServerHandle, String) {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let state = AppState::new(
        Arc::new(SqliteKvStore::new(pool, time_provider.clone())),
        Arc::new(UuidProvider),
        time_provider,
    );

    let handle = HttpServer::new(
        HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        state,
    )
    .start()
    .await
    .unwrap();
    let base = format!("http://{}", handle.local_addr());
    (handle, base)
}

fn client() -> Client {
    Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_new_list_then_round_trip_over_http() {
    let (handle, base) = start_server().await;
    let client = client();

    let response = client.get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let list_path = response.headers()[LOCATION].to_str().unwrap().to_string();
    assert!(list_path.len() > 1);

    let list_url = format!("{}{}", base, list_path);

    // Browser-style submit is answered with a redirect back to the list
    let response = client
        .post(&list_url)
        .form(&[("intent", "create"), ("text", "write tests")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION].to_str().unwrap(), list_path);

    let body: serde_json::Value = client
        .get(&list_url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let todos = body["todos"].as_array().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["text"], "write tests");
    let id = todos[0]["id"].as_str().unwrap().to_string();

    let response = client
        .post(&list_url)
        .header(ACCEPT, "application/json")
        .form(&[("intent", "toggle"), ("id", id.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = client.get(&list_url).send().await.unwrap().text().await.unwrap();
    assert!(html.contains(r#"<span class="done">write tests</span>"#));

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_bad_request_over_http() {
    let (handle, base) = start_server().await;

    let response = client()
        .post(format!("{}/some-list", base))
        .form(&[("intent", "create"), ("text", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid text");

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_stopped_server_refuses_connections() {
    let (handle, base) = start_server().await;
    let health = client()
        .get(format!("{}/healthz", base))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    handle.stop().await.unwrap();

    let result = client().get(format!("{}/healthz", base)).send().await;
    assert!(result.is_err());
}
