//! In-process and on-the-wire drivers for the objectd router.
//!
//! [`TestApp`] pushes requests straight through the `axum::Router` with
//! `tower::ServiceExt::oneshot`; no sockets are involved. [`TestServer`]
//! binds the router to a random TCP port on 127.0.0.1 and talks to it with a
//! `hyper` client, for tests that need real connections.
//!
//! # Example
//!
//! ```rust,ignore
//! let app = TestApp::seeded();
//! let resp = app.get("/object/3343").await;
//! assert_status!(resp, StatusCode::OK);
//! ```

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::{client::legacy::Client, rt::TokioExecutor};
use objectd_core::{Record, RecordStore, SharedStore};
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// TestResponse
// ---------------------------------------------------------------------------

/// A fully-buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("response body is not the expected JSON ({e}): {}", self.text()))
    }

    pub fn record(&self) -> Record {
        self.json()
    }

    pub fn records(&self) -> Vec<Record> {
        self.json()
    }
}

// ---------------------------------------------------------------------------
// TestApp
// ---------------------------------------------------------------------------

/// Router plus a handle to the store behind it, for white-box assertions.
pub struct TestApp {
    pub store: SharedStore,
    router: Router,
}

impl TestApp {
    pub fn new(store: RecordStore) -> Self {
        let store = SharedStore::new(store);
        Self {
            router: objectd::router(store.clone()),
            store,
        }
    }

    pub fn seeded() -> Self {
        Self::new(RecordStore::with_seed())
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
        let body = body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty);
        let req = Request::builder().method(method).uri(uri).body(body).unwrap();

        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &str) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: &str) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: &str) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// `GET /objects`, decoded.
    pub async fn list(&self) -> Vec<Record> {
        self.get("/objects").await.records()
    }
}

// ---------------------------------------------------------------------------
// TestServer
// ---------------------------------------------------------------------------

/// Handle to a running objectd server. The server stops when dropped.
pub struct TestServer {
    addr: SocketAddr,
    pub store: SharedStore,
    client: Client<hyper_util::client::legacy::connect::HttpConnector, Full<Bytes>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Start a seeded server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let store = SharedStore::new(RecordStore::with_seed());
        let (tx, rx) = oneshot::channel::<()>();

        let served = store.clone();
        tokio::spawn(async move {
            objectd::serve(listener, served, async {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });

        Ok(Self {
            addr,
            store,
            client: Client::builder(TokioExecutor::new()).build_http(),
            shutdown: Some(tx),
        })
    }

    /// Base URL (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn request(&self, method: Method, path: &str, body: Option<&str>) -> TestResponse {
        send(&self.client, method, &format!("{}{}", self.base_url(), path), body).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Send one request with a fresh `hyper` client. Used by the process harness.
pub async fn http_request(method: Method, url: &str, body: Option<&str>) -> Result<TestResponse, String> {
    let client: Client<_, Full<Bytes>> = Client::builder(TokioExecutor::new()).build_http();
    try_send(&client, method, url, body).await
}

async fn send(
    client: &Client<hyper_util::client::legacy::connect::HttpConnector, Full<Bytes>>,
    method: Method,
    url: &str,
    body: Option<&str>,
) -> TestResponse {
    try_send(client, method, url, body).await.unwrap()
}

async fn try_send(
    client: &Client<hyper_util::client::legacy::connect::HttpConnector, Full<Bytes>>,
    method: Method,
    url: &str,
    body: Option<&str>,
) -> Result<TestResponse, String> {
    let body = Full::new(Bytes::from(body.unwrap_or_default().to_owned()));
    let req = Request::builder()
        .method(method)
        .uri(url)
        .body(body)
        .map_err(|e| e.to_string())?;

    let resp = client.request(req).await.map_err(|e| e.to_string())?;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp
        .into_body()
        .collect()
        .await
        .map_err(|e| e.to_string())?
        .to_bytes();
    Ok(TestResponse { status, headers, body })
}
