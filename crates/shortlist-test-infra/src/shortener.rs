use crate::Result;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct MockConfig {
    /// Prefix of the sequential ids minted by `POST /create`.
    #[builder(default = "id".to_string(), setter(into))]
    id_prefix: String,
}

/// A request the mock shortener has received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRequest {
    Create { url: String },
    Delete { id: String },
}

#[derive(Debug, Clone)]
struct ScriptedResponse {
    status: StatusCode,
    body: String,
}

struct MockState {
    id_prefix: String,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    links: HashMap<String, String>,
    requests: Vec<RecordedRequest>,
    create_response: Option<ScriptedResponse>,
    delete_status: Option<StatusCode>,
}

#[derive(Deserialize)]
struct CreateBody {
    url: String,
}

/// Test fixture for a disposable HTTP shortening service.
///
/// Listens on an ephemeral localhost port and speaks the same API as the
/// real service: `POST /create` mints sequential ids (`id0`, `id1`, ...) and
/// `DELETE /delete/{id}` answers `204` or `404`. Responses can be scripted
/// to exercise failure paths. The server stops when the fixture is dropped.
pub struct MockShortener {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockShortener {
    /// Starts the mock service on `127.0.0.1` with an OS-assigned port.
    pub async fn start(config: MockConfig) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = Arc::new(MockState {
            id_prefix: config.id_prefix,
            inner: Mutex::default(),
        });

        let router = Router::new()
            .route("/create", post(create_handler))
            .route("/delete/{id}", delete(delete_handler))
            .with_state(Arc::clone(&state));

        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("mock shortener server failed");
        });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    /// Returns the base url to configure a client with, e.g. `http://127.0.0.1:41234`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Makes every following `POST /create` answer with `status` and a raw `body`.
    pub fn respond_to_create_with(&self, status: u16, body: impl Into<String>) {
        self.state.inner.lock().create_response = Some(ScriptedResponse {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: body.into(),
        });
    }

    /// Makes every following `DELETE /delete/{id}` answer with `status`.
    pub fn respond_to_delete_with(&self, status: u16) {
        self.state.inner.lock().delete_status =
            Some(StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR));
    }

    /// Returns to the default minting behavior.
    pub fn reset_responses(&self) {
        let mut inner = self.state.inner.lock();
        inner.create_response = None;
        inner.delete_status = None;
    }

    /// Registers a link as if it had been created through the API.
    pub fn seed(&self, id: impl Into<String>, url: impl Into<String>) {
        self.state.inner.lock().links.insert(id.into(), url.into());
    }

    /// Returns `true` if the service currently knows `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.state.inner.lock().links.contains_key(id)
    }

    /// Returns the original url stored for `id`.
    pub fn original_url(&self, id: &str) -> Option<String> {
        self.state.inner.lock().links.get(id).cloned()
    }

    /// Returns every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.inner.lock().requests.clone()
    }
}

impl Drop for MockShortener {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn create_handler(
    State(state): State<Arc<MockState>>,
    Json(body): Json<CreateBody>,
) -> Response {
    let mut inner = state.inner.lock();
    inner.requests.push(RecordedRequest::Create {
        url: body.url.clone(),
    });

    if let Some(scripted) = inner.create_response.clone() {
        return (
            scripted.status,
            [(header::CONTENT_TYPE, "application/json")],
            scripted.body,
        )
            .into_response();
    }

    let id = format!("{}{}", state.id_prefix, inner.next_id);
    inner.next_id += 1;
    inner.links.insert(id.clone(), body.url);

    Json(serde_json::json!({ "id": id })).into_response()
}

async fn delete_handler(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut inner = state.inner.lock();
    inner.requests.push(RecordedRequest::Delete { id: id.clone() });

    if let Some(status) = inner.delete_status {
        return status;
    }

    match inner.links.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
