//! Cached read-only access to the product catalog.
//!
//! The compare list (and anything else that renders product records) reads
//! through this collaborator rather than hitting the API directly. Responses
//! are cached with `moka` (bounded capacity, TTL from config), matching the
//! read-mostly nature of the catalog.

use std::sync::Arc;
use std::time::Duration;

use amberleaf_core::ProductId;
use moka::future::Cache;
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::types::Product;

const CACHE_CAPACITY: u64 = 1000;

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Product(ProductId),
    Products,
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Arc<Vec<Product>>),
}

/// Read-only product catalog backed by the store API.
#[derive(Clone)]
pub struct Catalog {
    api: ApiClient,
    cache: Cache<CacheKey, CacheValue>,
}

impl Catalog {
    /// Create a new catalog with the given cache TTL.
    #[must_use]
    pub fn new(api: ApiClient, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(cache_ttl)
            .build();

        Self { api, cache }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Arc<Vec<Product>>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.cache.get(&CacheKey::Products).await {
            debug!("cache hit for product list");
            return Ok(products);
        }

        let products = Arc::new(self.api.list_products().await?);
        self.cache
            .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&products)))
            .await;
        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown product, or another
    /// variant if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get(&self, product_id: &ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(product_id.clone());

        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            debug!("cache hit for product");
            return Ok(*product);
        }

        let product = self.api.get_product(product_id).await?;
        self.cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Drop all cached entries, forcing fresh reads.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}
