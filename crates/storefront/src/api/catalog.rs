//! Product catalog endpoints and wire payloads.

use amberleaf_core::{Currency, Price, ProductId};
use reqwest::Method;
use serde::Deserialize;
use tracing::instrument;

use crate::error::ApiError;
use crate::types::Product;

use super::ApiClient;

// =============================================================================
// Wire Types
// =============================================================================

/// A product record on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductPayload {
    id: String,
    name: String,
    description: Option<String>,
    price: f64,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    review_count: u32,
    image_url: Option<String>,
    botanical_name: Option<String>,
    origin: Option<String>,
    extraction_method: Option<String>,
    #[serde(default)]
    benefits: Vec<String>,
    #[serde(default)]
    uses: Vec<String>,
    #[serde(default = "default_in_stock")]
    in_stock: bool,
    #[serde(default)]
    organic: bool,
}

/// Products default to in stock when the backend omits the flag.
const fn default_in_stock() -> bool {
    true
}

// =============================================================================
// Conversions
// =============================================================================

fn convert_product(payload: ProductPayload) -> Product {
    Product {
        id: ProductId::new(payload.id),
        name: payload.name,
        description: payload.description,
        price: Price::from_f64(payload.price, Currency::USD)
            .unwrap_or_else(|| Price::zero(Currency::USD)),
        rating: payload.rating,
        review_count: payload.review_count,
        image_url: payload.image_url,
        botanical_name: payload.botanical_name,
        origin: payload.origin,
        extraction_method: payload.extraction_method,
        benefits: payload.benefits,
        uses: payload.uses,
        in_stock: payload.in_stock,
        organic: payload.organic,
    }
}

// =============================================================================
// Catalog Endpoints
// =============================================================================

impl ApiClient {
    /// List all products in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let payloads: Vec<ProductPayload> = self
            .execute_json(self.request(Method::GET, &["products"], None))
            .await?;
        Ok(payloads.into_iter().map(convert_product).collect())
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown product, or another
    /// variant if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: &ProductId) -> Result<Product, ApiError> {
        let result: Result<ProductPayload, ApiError> = self
            .execute_json(self.request(Method::GET, &["products", product_id.as_str()], None))
            .await;

        match result {
            Ok(payload) => Ok(convert_product(payload)),
            Err(ApiError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND => {
                Err(ApiError::NotFound(format!("Product {product_id}")))
            }
            Err(e) => Err(e),
        }
    }
}
