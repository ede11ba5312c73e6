//! Cart endpoints and wire payloads.
//!
//! Success shape for cart reads: `{ "items": [...], "total": number }`.
//! Mutation responses are ignored on success; callers resynchronize with a
//! full fetch instead of patching local state.

use amberleaf_core::{Currency, Price, ProductId};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::auth::BearerToken;
use crate::error::ApiError;
use crate::types::{Cart, CartItem};

use super::ApiClient;

// =============================================================================
// Wire Types
// =============================================================================

/// `GET /cart` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartPayload {
    #[serde(default)]
    items: Vec<CartLinePayload>,
    #[serde(default)]
    total: f64,
}

/// One cart line on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLinePayload {
    product_id: String,
    name: String,
    unit_price: f64,
    image_url: Option<String>,
    quantity: u32,
    subtotal: f64,
}

/// `POST /cart/add` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddLineBody<'a> {
    product_id: &'a str,
    quantity: u32,
}

/// `PUT /cart/update` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateLineBody<'a> {
    product_id: &'a str,
    quantity: u32,
}

// =============================================================================
// Conversions
// =============================================================================

/// Convert a wire money value (JSON number) into a `Price`.
///
/// Non-finite values cannot come out of valid JSON but the conversion is
/// total anyway; they collapse to zero with a warning.
fn convert_money(value: f64) -> Price {
    Price::from_f64(value, Currency::USD).unwrap_or_else(|| {
        tracing::warn!(value, "unrepresentable money value in cart payload");
        Price::zero(Currency::USD)
    })
}

fn convert_line(line: CartLinePayload) -> CartItem {
    CartItem {
        product_id: ProductId::new(line.product_id),
        name: line.name,
        unit_price: convert_money(line.unit_price),
        image_url: line.image_url,
        quantity: line.quantity.max(1),
        subtotal: convert_money(line.subtotal),
    }
}

fn convert_cart(payload: CartPayload) -> Cart {
    Cart {
        items: payload.items.into_iter().map(convert_line).collect(),
        total: convert_money(payload.total),
    }
}

// =============================================================================
// Cart Endpoints
// =============================================================================

impl ApiClient {
    /// Fetch the authoritative cart for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self, token))]
    pub async fn fetch_cart(&self, token: &BearerToken) -> Result<Cart, ApiError> {
        let payload: CartPayload = self
            .execute_json(self.request(Method::GET, &["cart"], Some(token)))
            .await?;
        Ok(convert_cart(payload))
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn add_cart_line(
        &self,
        token: &BearerToken,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let body = AddLineBody {
            product_id: product_id.as_str(),
            quantity,
        };
        self.execute(
            self.request(Method::POST, &["cart", "add"], Some(token))
                .json(&body),
        )
        .await?;
        Ok(())
    }

    /// Set the quantity of an existing cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn update_cart_line(
        &self,
        token: &BearerToken,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let body = UpdateLineBody {
            product_id: product_id.as_str(),
            quantity,
        };
        self.execute(
            self.request(Method::PUT, &["cart", "update"], Some(token))
                .json(&body),
        )
        .await?;
        Ok(())
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn remove_cart_line(
        &self,
        token: &BearerToken,
        product_id: &ProductId,
    ) -> Result<(), ApiError> {
        self.execute(self.request(
            Method::DELETE,
            &["cart", "remove", product_id.as_str()],
            Some(token),
        ))
        .await?;
        Ok(())
    }

    /// Empty the server-side cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn clear_cart(&self, token: &BearerToken) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &["cart", "clear"], Some(token)))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_convert_cart_payload() {
        let payload: CartPayload = serde_json::from_str(
            r#"{
                "items": [
                    {
                        "productId": "p1",
                        "name": "Lavender Essential Oil",
                        "unitPrice": 10.0,
                        "imageUrl": "https://cdn.amberleaf.shop/lavender.jpg",
                        "quantity": 2,
                        "subtotal": 20.0
                    }
                ],
                "total": 20.0
            }"#,
        )
        .unwrap();

        let cart = convert_cart(payload);
        assert_eq!(cart.items.len(), 1);

        let line = &cart.items[0];
        assert_eq!(line.product_id, ProductId::new("p1"));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price.amount, Decimal::new(10, 0));
        assert_eq!(line.subtotal.amount, Decimal::new(20, 0));
        assert_eq!(cart.total.amount, Decimal::new(20, 0));
    }

    #[test]
    fn test_convert_empty_cart_payload() {
        let payload: CartPayload = serde_json::from_str("{}").unwrap();
        let cart = convert_cart(payload);
        assert!(cart.is_empty());
        assert!(cart.total.is_zero());
    }

    #[test]
    fn test_convert_line_never_stores_zero_quantity() {
        let payload: CartPayload = serde_json::from_str(
            r#"{
                "items": [
                    {
                        "productId": "p1",
                        "name": "Lavender Essential Oil",
                        "unitPrice": 10.0,
                        "imageUrl": null,
                        "quantity": 0,
                        "subtotal": 0.0
                    }
                ],
                "total": 0.0
            }"#,
        )
        .unwrap();

        let cart = convert_cart(payload);
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_money_conversion_rounds_to_cents() {
        let price = convert_money(12.994_999);
        assert_eq!(price.amount, Decimal::new(1299, 2));
    }

    #[test]
    fn test_request_bodies_are_camel_case() {
        let body = AddLineBody {
            product_id: "p1",
            quantity: 2,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"productId":"p1","quantity":2}"#);
    }
}
