//! End-to-end tests over a loopback listener.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use metricsink_core::store::{MemStorage, MetricStore};
use metricsink_core::StoreError;
use metricsink_server::app_state::AppState;
use metricsink_server::config::ServerConfig;
use metricsink_server::router::build_router;
use metricsink_server::transport::http::split_update_path;

async fn spawn_with(store: Arc<dyn MetricStore>) -> (SocketAddr, AppState) {
    let state = AppState::with_store(ServerConfig::default(), store).unwrap();
    let app = build_router(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

/// Send one HTTP/1.1 request, return (status, body).
async fn request(addr: SocketAddr, method: &str, path: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    );
    stream.write_all(req.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let text = String::from_utf8_lossy(&raw).into_owned();

    let status = text
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("status line");
    let body = text
        .split_once("\r\n\r\n")
        .map(|(_, b)| b.to_string())
        .unwrap_or_default();
    (status, body)
}

#[tokio::test]
async fn valid_updates_return_ok_and_apply() {
    let store = Arc::new(MemStorage::new());
    let (addr, _) = spawn_with(store.clone()).await;

    assert_eq!(request(addr, "POST", "/update/gauge/Alloc/12.5").await.0, 200);
    assert_eq!(request(addr, "POST", "/update/gauge/Alloc/1e2").await.0, 200);
    assert_eq!(request(addr, "POST", "/update/counter/PollCount/3").await.0, 200);
    assert_eq!(request(addr, "POST", "/update/counter/PollCount/4").await.0, 200);

    assert_eq!(request(addr, "POST", "/update/gauge/Hex/0x1.8p1").await.0, 200);

    assert_eq!(store.gauge("Alloc"), Some(100.0));
    assert_eq!(store.gauge("Hex"), Some(3.0));
    assert_eq!(store.counter("PollCount"), Some(7));
}

#[tokio::test]
async fn rejections_map_to_statuses() {
    let store = Arc::new(MemStorage::new());
    let (addr, _) = spawn_with(store.clone()).await;

    let (status, body) = request(addr, "POST", "/update/gauge//1.0").await;
    assert_eq!(status, 404);
    assert!(body.contains("NOT_FOUND"), "{body}");

    let (status, body) = request(addr, "POST", "/update/summary/x/1").await;
    assert_eq!(status, 400);
    assert!(body.contains("BAD_REQUEST"), "{body}");

    assert_eq!(request(addr, "POST", "/update/gauge/x/abc").await.0, 400);
    assert_eq!(request(addr, "POST", "/update/counter/x/1.5").await.0, 400);
    assert_eq!(request(addr, "POST", "/update/gauge/x/1e400").await.0, 400);

    // Wrong segment count.
    assert_eq!(request(addr, "POST", "/update/gauge/x").await.0, 400);
    assert_eq!(request(addr, "POST", "/update/gauge/x/1/extra").await.0, 400);

    assert!(store.is_empty());
}

#[tokio::test]
async fn non_post_is_method_not_allowed() {
    let store = Arc::new(MemStorage::new());
    let (addr, _) = spawn_with(store.clone()).await;

    assert_eq!(request(addr, "GET", "/update/gauge/x/1.0").await.0, 405);
    assert_eq!(request(addr, "PUT", "/update/counter/x/1").await.0, 405);
    assert!(store.is_empty());
}

struct BrokenStore;

#[async_trait]
impl MetricStore for BrokenStore {
    async fn update_gauge(&self, _name: &str, _value: f64) -> Result<(), StoreError> {
        Err(StoreError::Backend("unavailable".into()))
    }

    async fn update_counter(&self, _name: &str, _delta: i64) -> Result<(), StoreError> {
        Err(StoreError::Backend("unavailable".into()))
    }
}

#[tokio::test]
async fn storage_failure_is_internal_error() {
    let (addr, _) = spawn_with(Arc::new(BrokenStore)).await;

    let (status, body) = request(addr, "POST", "/update/counter/x/1").await;
    assert_eq!(status, 500);
    assert!(body.contains("INTERNAL"), "{body}");

    // Validation still short-circuits before the store.
    assert_eq!(request(addr, "POST", "/update/counter/x/nan").await.0, 400);
}

#[tokio::test]
async fn readiness_flips_when_draining() {
    let (addr, state) = spawn_with(Arc::new(MemStorage::new())).await;

    assert_eq!(request(addr, "GET", "/healthz").await.0, 200);
    assert_eq!(request(addr, "GET", "/readyz").await.0, 200);

    state.set_draining();
    let (status, body) = request(addr, "GET", "/readyz").await;
    assert_eq!(status, 503);
    assert_eq!(body, "draining");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_lose_no_increments() {
    const N: usize = 200;
    let store = Arc::new(MemStorage::new());
    let (addr, _) = spawn_with(store.clone()).await;

    let handles: Vec<_> = (0..N)
        .map(|_| {
            tokio::spawn(async move { request(addr, "POST", "/update/counter/hits/1").await.0 })
        })
        .collect();
    for h in handles {
        assert_eq!(h.await.unwrap(), 200);
    }

    assert_eq!(store.counter("hits"), Some(N as i64));
}

#[test]
fn split_keeps_empty_segments() {
    assert_eq!(split_update_path("gauge/x/1"), Some(("gauge", "x", "1")));
    assert_eq!(split_update_path("/gauge/x/1"), Some(("gauge", "x", "1")));
    assert_eq!(split_update_path("gauge//1"), Some(("gauge", "", "1")));
    assert_eq!(split_update_path("gauge/x"), None);
    assert_eq!(split_update_path("gauge/x/1/"), None);
}
