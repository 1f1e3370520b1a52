//! Integration test support for the preorder storefront.
//!
//! [`MockApi`] serves the REST resources the gateway talks to from an
//! in-process axum router on an ephemeral port. Records live in memory as
//! raw JSON, so tests can seed exactly the wire shapes they care about and
//! inspect what the client sent.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p preorder-integration-tests
//! ```
//!
//! # Knobs
//!
//! - [`MockApi::fail`] makes every request to one collection return 500
//! - [`MockApi::start_camel_case`] names server-assigned fields in `camelCase`
//! - [`MockApi::request_count`] counts requests by method and path prefix

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use preorder_storefront::ApiClient;
use preorder_storefront::api::conversions::WireConvention;
use preorder_storefront::config::ApiConfig;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// `created_at` given to every record the mock creates.
pub const CREATED_AT: &str = "2024-01-15T10:30:00.000Z";
/// `updated_at` given to every package the mock updates.
pub const UPDATED_AT: &str = "2024-02-01T08:00:00.000Z";

const COLLECTIONS: [&str; 4] = ["products", "categories", "packages", "orders"];

#[derive(Default)]
struct MockState {
    records: Mutex<HashMap<String, Vec<Value>>>,
    failing: Mutex<HashSet<String>>,
    requests: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    camel_case: bool,
}

impl MockState {
    fn key(&self, snake: &str, camel: &str) -> String {
        let key = if self.camel_case { camel } else { snake };
        key.to_string()
    }

    /// Record the request and decide whether it may proceed.
    async fn admit(&self, method: &Method, collection: &str, path: &str) -> Option<Response> {
        self.requests.lock().await.push(format!("{method} {path}"));

        if !COLLECTIONS.contains(&collection) {
            return Some((StatusCode::NOT_FOUND, "unknown collection").into_response());
        }
        if self.failing.lock().await.contains(collection) {
            return Some(
                (StatusCode::INTERNAL_SERVER_ERROR, "injected failure").into_response(),
            );
        }
        None
    }
}

/// A running mock of the REST API.
///
/// The server task is aborted on drop.
pub struct MockApi {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockApi {
    /// Start a mock that names server-assigned fields in `snake_case`.
    pub async fn start() -> Self {
        Self::start_with(false).await
    }

    /// Start a mock that names server-assigned fields in `camelCase`.
    pub async fn start_camel_case() -> Self {
        Self::start_with(true).await
    }

    async fn start_with(camel_case: bool) -> Self {
        let state = Arc::new(MockState {
            camel_case,
            ..MockState::default()
        });
        let app = Router::new()
            .nest("/api", routes())
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Mock API has no address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            server,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Gateway configuration pointing at this mock.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        let convention = if self.state.camel_case {
            WireConvention::CamelCase
        } else {
            WireConvention::SnakeCase
        };
        ApiConfig::new(&self.base_url())
            .expect("Mock API URL is valid")
            .with_wire_convention(convention)
    }

    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.api_config()).expect("Failed to build API client")
    }

    /// Replace a collection's records.
    pub async fn seed(&self, collection: &str, records: Vec<Value>) {
        self.state
            .records
            .lock()
            .await
            .insert(collection.to_string(), records);
    }

    /// Current records of a collection, newest first.
    pub async fn records(&self, collection: &str) -> Vec<Value> {
        self.state
            .records
            .lock()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Make every request to `collection` fail with a 500.
    pub async fn fail(&self, collection: &str) {
        self.state
            .failing
            .lock()
            .await
            .insert(collection.to_string());
    }

    pub async fn recover(&self, collection: &str) {
        self.state.failing.lock().await.remove(collection);
    }

    /// Requests received so far, as `METHOD /path`.
    pub async fn requests(&self) -> Vec<String> {
        self.state.requests.lock().await.clone()
    }

    /// Number of requests starting with `prefix`, e.g. `"DELETE /categories"`.
    pub async fn request_count(&self, prefix: &str) -> usize {
        self.state
            .requests
            .lock()
            .await
            .iter()
            .filter(|r| r.starts_with(prefix))
            .count()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// =============================================================================
// Routes
// =============================================================================

fn routes() -> Router<Arc<MockState>> {
    Router::new()
        .route("/packages/track/{code}", get(track))
        .route("/{collection}", get(list).post(create))
        .route("/{collection}/{id}", get(fetch).put(update).delete(remove))
}

fn id_of(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn not_found(collection: &str, id: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("{collection} {id} not found")).into_response()
}

async fn list(
    State(state): State<Arc<MockState>>,
    method: Method,
    Path(collection): Path<String>,
) -> Response {
    let path = format!("/{collection}");
    if let Some(refusal) = state.admit(&method, &collection, &path).await {
        return refusal;
    }

    let records = state.records.lock().await;
    Json(Value::Array(
        records.get(&collection).cloned().unwrap_or_default(),
    ))
    .into_response()
}

async fn fetch(
    State(state): State<Arc<MockState>>,
    method: Method,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    let path = format!("/{collection}/{id}");
    if let Some(refusal) = state.admit(&method, &collection, &path).await {
        return refusal;
    }

    let records = state.records.lock().await;
    records
        .get(&collection)
        .and_then(|items| items.iter().find(|r| id_of(r) == Some(id.as_str())))
        .map_or_else(
            || not_found(&collection, &id),
            |record| Json(record.clone()).into_response(),
        )
}

async fn create(
    State(state): State<Arc<MockState>>,
    method: Method,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("/{collection}");
    if let Some(refusal) = state.admit(&method, &collection, &path).await {
        return refusal;
    }
    let Value::Object(mut record) = body else {
        return (StatusCode::BAD_REQUEST, "expected a JSON object").into_response();
    };

    let n = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    record.insert("id".to_string(), json!(format!("{collection}-{n}")));
    record.insert(state.key("created_at", "createdAt"), json!(CREATED_AT));
    if collection == "packages" {
        record.insert(state.key("updated_at", "updatedAt"), json!(CREATED_AT));
    }

    let record = Value::Object(record);
    state
        .records
        .lock()
        .await
        .entry(collection)
        .or_default()
        .insert(0, record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update(
    State(state): State<Arc<MockState>>,
    method: Method,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("/{collection}/{id}");
    if let Some(refusal) = state.admit(&method, &collection, &path).await {
        return refusal;
    }
    let Value::Object(changes) = body else {
        return (StatusCode::BAD_REQUEST, "expected a JSON object").into_response();
    };
    let updated_key = state.key("updated_at", "updatedAt");

    let mut records = state.records.lock().await;
    let Some(Value::Object(record)) = records
        .get_mut(&collection)
        .and_then(|items| items.iter_mut().find(|r| id_of(r) == Some(id.as_str())))
    else {
        return not_found(&collection, &id);
    };

    for (key, value) in changes {
        if key != "id" {
            record.insert(key, value);
        }
    }
    if collection == "packages" {
        record.insert(updated_key, json!(UPDATED_AT));
    }
    Json(Value::Object(record.clone())).into_response()
}

async fn remove(
    State(state): State<Arc<MockState>>,
    method: Method,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    let path = format!("/{collection}/{id}");
    if let Some(refusal) = state.admit(&method, &collection, &path).await {
        return refusal;
    }

    let mut records = state.records.lock().await;
    let Some(items) = records.get_mut(&collection) else {
        return not_found(&collection, &id);
    };
    let before = items.len();
    items.retain(|r| id_of(r) != Some(id.as_str()));
    if items.len() == before {
        return not_found(&collection, &id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn track(
    State(state): State<Arc<MockState>>,
    method: Method,
    Path(code): Path<String>,
) -> Response {
    let path = format!("/packages/track/{code}");
    if let Some(refusal) = state.admit(&method, "packages", &path).await {
        return refusal;
    }

    let key = state.key("tracking_id", "trackingId");
    let records = state.records.lock().await;
    records
        .get("packages")
        .and_then(|items| {
            items.iter().find(|r| {
                r.get(&key)
                    .and_then(Value::as_str)
                    .is_some_and(|c| c.eq_ignore_ascii_case(code.trim()))
            })
        })
        .map_or_else(
            || not_found("packages", &code),
            |record| Json(record.clone()).into_response(),
        )
}

// =============================================================================
// Fixtures
// =============================================================================

/// A product record in `snake_case`.
#[must_use]
pub fn product_json(id: &str, name: &str, category_id: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "price_estimate": price,
        "category_id": category_id,
        "image_url": format!("https://img.example.com/{id}.jpg"),
        "is_featured": false,
        "created_at": CREATED_AT,
        "status": "in_stock",
        "stock": 0
    })
}

/// A category record.
#[must_use]
pub fn category_json(id: &str, name: &str, slug: &str) -> Value {
    json!({ "id": id, "name": name, "slug": slug })
}

/// A package record in `snake_case`.
#[must_use]
pub fn package_json(id: &str, tracking_code: &str, location: &str) -> Value {
    json!({
        "id": id,
        "tracking_id": tracking_code,
        "status": "In Transit to Ghana",
        "shipping_route": "sea",
        "current_location": location,
        "origin": "China",
        "destination": "Ghana",
        "created_at": CREATED_AT,
        "updated_at": CREATED_AT
    })
}
