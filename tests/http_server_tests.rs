//! End-to-end test of the HTTP front end on a real socket.

use std::net::SocketAddr;
use std::sync::Arc;

use redis_proxy::{api::create_router, cache::SharedCache, store::MemoryStore, AppState, Resolver};
use reqwest::StatusCode;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_lookup_over_http() {
    let store = MemoryStore::with_entries([("greeting", "hello world")]);
    let state = AppState::new(Resolver::new(SharedCache::new(10, None), Arc::new(store)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            create_router(state).into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/", addr))
        .query(&[("key", "greeting")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let value: String = response.json().await.unwrap();
    assert_eq!(value, "hello world");

    let response = client
        .get(format!("http://{}/", addr))
        .query(&[("key", "missing")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text().await.unwrap(), "key not found");
}
