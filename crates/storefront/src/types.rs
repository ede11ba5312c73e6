//! Domain types for the storefront.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! payloads in [`crate::api`]; conversions live next to the endpoints.

use amberleaf_core::{Currency, Price, ProductId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog Types
// =============================================================================

/// A full product record from the catalog.
///
/// This is what the compare list holds; it is a read-only snapshot of the
/// catalog entry, not an owned entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display name (e.g., "Lavender Essential Oil").
    pub name: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Current price.
    pub price: Price,
    /// Average review rating (0.0 - 5.0).
    pub rating: f64,
    /// Total number of reviews.
    pub review_count: u32,
    /// Primary image URL.
    pub image_url: Option<String>,
    /// Botanical (Latin) name, e.g. "Lavandula angustifolia".
    pub botanical_name: Option<String>,
    /// Country or region of origin.
    pub origin: Option<String>,
    /// Extraction method, e.g. "Steam distillation".
    pub extraction_method: Option<String>,
    /// Claimed benefits.
    pub benefits: Vec<String>,
    /// Suggested uses.
    pub uses: Vec<String>,
    /// Whether the product is currently in stock.
    pub in_stock: bool,
    /// Whether the product is certified organic.
    pub organic: bool,
}

// =============================================================================
// Cart Types
// =============================================================================

/// One product-quantity pairing inside a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product display name at the time the line was created.
    pub name: String,
    /// Server-computed unit price.
    pub unit_price: Price,
    /// Primary image URL.
    pub image_url: Option<String>,
    /// Quantity, always >= 1.
    pub quantity: u32,
    /// Server-computed line subtotal (`unit_price` x `quantity`).
    pub subtotal: Price,
}

/// A cart: line items in insertion order plus the running total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Line items in insertion order.
    pub items: Vec<CartItem>,
    /// Sum of all line subtotals.
    pub total: Price,
}

impl Cart {
    /// An empty cart with a zero total.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Price::zero(Currency::USD),
        }
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// True when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::empty()
    }
}
