//! Integration-test support for Amberleaf.
//!
//! Provides an in-process `axum` mock of the remote store API so the real
//! client stack (API client, cart session, catalog) can be exercised
//! end-to-end without external services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p amberleaf-integration-tests
//! ```
//!
//! The mock binds an ephemeral port on localhost; each test gets its own
//! isolated server and state.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

use amberleaf_storefront::api::ApiClient;
use amberleaf_storefront::auth::BearerToken;

/// Bearer token the mock store accepts.
pub const TEST_TOKEN: &str = "integration-test-token";

/// The accepted token wrapped for client use.
#[must_use]
pub fn test_token() -> BearerToken {
    BearerToken::new(TEST_TOKEN)
}

/// Initialize test logging once per process (respects `RUST_LOG`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Seed Data
// =============================================================================

/// A product record as the mock store serves it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub rating: f64,
    pub review_count: u32,
    pub image_url: Option<String>,
    pub botanical_name: Option<String>,
    pub origin: Option<String>,
    pub extraction_method: Option<String>,
    pub benefits: Vec<String>,
    pub uses: Vec<String>,
    pub in_stock: bool,
    pub organic: bool,
}

/// Convenience constructor for a minimal seed product.
#[must_use]
pub fn oil(id: &str, name: &str, price: f64) -> MockProduct {
    MockProduct {
        id: id.to_string(),
        name: name.to_string(),
        price,
        rating: 4.5,
        review_count: 12,
        image_url: None,
        botanical_name: None,
        origin: None,
        extraction_method: Some("Steam distillation".to_string()),
        benefits: Vec::new(),
        uses: Vec::new(),
        in_stock: true,
        organic: false,
    }
}

// =============================================================================
// Mock Store
// =============================================================================

struct StoreState {
    products: Vec<MockProduct>,
    cart: Vec<CartLine>,
    fail_once: bool,
}

struct CartLine {
    product_id: String,
    quantity: u32,
}

type SharedState = Arc<Mutex<StoreState>>;

/// Handle to a running mock store.
pub struct MockStore {
    /// Base URL of the mock API.
    pub base_url: Url,
    state: SharedState,
}

impl MockStore {
    /// API client pointed at this mock.
    #[must_use]
    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }

    /// Make the next cart request fail with HTTP 500 and a `detail` string.
    pub fn fail_next_request(&self) {
        self.lock().fail_once = true;
    }

    /// Change a product's price server-side (for cache-staleness tests).
    pub fn set_price(&self, product_id: &str, price: f64) {
        if let Some(product) = self
            .lock()
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
        {
            product.price = price;
        }
    }

    /// Number of lines in the server-side cart.
    #[must_use]
    pub fn server_cart_len(&self) -> usize {
        self.lock().cart.len()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("mock store state poisoned")
    }
}

/// Start a mock store on an ephemeral localhost port.
///
/// # Panics
///
/// Panics if the listener cannot be bound; tests cannot proceed without it.
pub async fn spawn_mock_store(products: Vec<MockProduct>) -> MockStore {
    let state: SharedState = Arc::new(Mutex::new(StoreState {
        products,
        cart: Vec::new(),
        fail_once: false,
    }));

    let app = Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/cart", get(get_cart))
        .route("/cart/add", post(add_line))
        .route("/cart/update", put(update_line))
        .route("/cart/remove/{id}", delete(remove_line))
        .route("/cart/clear", delete(clear_cart))
        .with_state(Arc::clone(&state));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock store listener");
    let addr = listener.local_addr().expect("listener has no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock store server error");
    });

    MockStore {
        base_url: Url::parse(&format!("http://{addr}/")).expect("mock store addr is a valid URL"),
        state,
    }
}

// =============================================================================
// Handlers
// =============================================================================

fn failure(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn is_authenticated(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TEST_TOKEN}"))
}

/// Consume the one-shot failure flag.
fn take_failure(state: &mut StoreState) -> bool {
    std::mem::take(&mut state.fail_once)
}

fn cart_json(state: &StoreState) -> Value {
    let mut items = Vec::new();
    let mut total = 0.0;
    for line in &state.cart {
        let Some(product) = state.products.iter().find(|p| p.id == line.product_id) else {
            continue;
        };
        let subtotal = product.price * f64::from(line.quantity);
        total += subtotal;
        items.push(json!({
            "productId": product.id,
            "name": product.name,
            "unitPrice": product.price,
            "imageUrl": product.image_url,
            "quantity": line.quantity,
            "subtotal": subtotal,
        }));
    }
    json!({ "items": items, "total": total })
}

/// Shared guard for cart handlers: auth check plus one-shot failure.
fn cart_guard(headers: &HeaderMap, state: &mut StoreState) -> Option<Response> {
    if !is_authenticated(headers) {
        return Some(failure(StatusCode::UNAUTHORIZED, "Not authenticated"));
    }
    if take_failure(state) {
        return Some(failure(StatusCode::INTERNAL_SERVER_ERROR, "Simulated outage"));
    }
    None
}

async fn list_products(State(state): State<SharedState>) -> Response {
    let state = state.lock().expect("mock store state poisoned");
    Json(state.products.clone()).into_response()
}

async fn get_product(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.lock().expect("mock store state poisoned");
    state.products.iter().find(|p| p.id == id).map_or_else(
        || failure(StatusCode::NOT_FOUND, "Product not found"),
        |product| Json(product.clone()).into_response(),
    )
}

async fn get_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = state.lock().expect("mock store state poisoned");
    if let Some(rejection) = cart_guard(&headers, &mut state) {
        return rejection;
    }
    Json(cart_json(&state)).into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineBody {
    product_id: String,
    quantity: u32,
}

async fn add_line(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<LineBody>,
) -> Response {
    let mut state = state.lock().expect("mock store state poisoned");
    if let Some(rejection) = cart_guard(&headers, &mut state) {
        return rejection;
    }
    if !state.products.iter().any(|p| p.id == body.product_id) {
        return failure(StatusCode::NOT_FOUND, "Product not found");
    }

    if let Some(line) = state
        .cart
        .iter_mut()
        .find(|line| line.product_id == body.product_id)
    {
        line.quantity += body.quantity;
    } else {
        state.cart.push(CartLine {
            product_id: body.product_id,
            quantity: body.quantity,
        });
    }
    Json(cart_json(&state)).into_response()
}

async fn update_line(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<LineBody>,
) -> Response {
    let mut state = state.lock().expect("mock store state poisoned");
    if let Some(rejection) = cart_guard(&headers, &mut state) {
        return rejection;
    }

    let Some(line) = state
        .cart
        .iter_mut()
        .find(|line| line.product_id == body.product_id)
    else {
        return failure(StatusCode::NOT_FOUND, "Item not in cart");
    };
    line.quantity = body.quantity;
    Json(cart_json(&state)).into_response()
}

async fn remove_line(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.lock().expect("mock store state poisoned");
    if let Some(rejection) = cart_guard(&headers, &mut state) {
        return rejection;
    }
    state.cart.retain(|line| line.product_id != id);
    Json(cart_json(&state)).into_response()
}

async fn clear_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = state.lock().expect("mock store state poisoned");
    if let Some(rejection) = cart_guard(&headers, &mut state) {
        return rejection;
    }
    state.cart.clear();
    Json(cart_json(&state)).into_response()
}
