//! Cart session container.
//!
//! Holds the signed-in user's line items and running total, synchronized with
//! the remote service after every mutation. The server is the source of
//! truth: every successful mutation is followed by a full [`CartSession::fetch`]
//! instead of an optimistic local patch, so server-computed pricing and stock
//! can never diverge from what the user sees. Correctness over latency.
//!
//! Overlapping mutations are not coordinated; operations are sequential and
//! user-triggered, and a caller issuing rapid concurrent mutations gets
//! last-response-wins.

use amberleaf_core::{Price, ProductId};
use tracing::{instrument, warn};

use crate::api::ApiClient;
use crate::auth::BearerToken;
use crate::error::CartError;
use crate::types::{Cart, CartItem};

/// Per-session cart state, owned by a single controller per user session.
///
/// Inject this into consumers; do not share it behind a global.
pub struct CartSession {
    api: ApiClient,
    credential: Option<BearerToken>,
    cart: Cart,
}

impl CartSession {
    /// Create a signed-out session with an empty cart.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            credential: None,
            cart: Cart::empty(),
        }
    }

    /// Store the user's credential and load their cart.
    ///
    /// This is the session-start fetch; a load failure is logged and leaves
    /// the cart empty until the next successful [`fetch`](Self::fetch).
    pub async fn sign_in(&mut self, token: BearerToken) {
        self.credential = Some(token);
        self.fetch().await;
    }

    /// Drop the credential and destroy local cart state.
    pub fn sign_out(&mut self) {
        self.credential = None;
        self.cart = Cart::empty();
    }

    /// True when a credential is present.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.credential.is_some()
    }

    /// Load the authoritative cart from the remote service.
    ///
    /// With no signed-in user the cart resets to empty. A network or server
    /// failure is logged and prior state is left unchanged.
    #[instrument(skip(self))]
    pub async fn fetch(&mut self) {
        let Some(token) = self.credential.clone() else {
            self.cart = Cart::empty();
            return;
        };

        match self.api.fetch_cart(&token).await {
            Ok(mut cart) => {
                cart.total = derive_total(&cart.items, cart.total);
                self.cart = cart;
            }
            Err(e) => warn!(error = %e, "cart refresh failed, keeping previous state"),
        }
    }

    /// Add a product to the cart, then resynchronize.
    ///
    /// `quantity` is clamped to at least 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotSignedIn` (before any network call) when no
    /// user is signed in, or `CartError::Api` when the remote call fails; in
    /// both cases local state is unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&mut self, product_id: &ProductId, quantity: u32) -> Result<(), CartError> {
        let token = self.require_credential()?;
        self.api
            .add_cart_line(&token, product_id, clamp_quantity(quantity))
            .await?;
        self.fetch().await;
        Ok(())
    }

    /// Set the quantity of an existing line, then resynchronize.
    ///
    /// `quantity` is clamped to at least 1; removal is [`remove`](Self::remove),
    /// not an update to zero.
    ///
    /// # Errors
    ///
    /// Same contract as [`add`](Self::add).
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        let token = self.require_credential()?;
        self.api
            .update_cart_line(&token, product_id, clamp_quantity(quantity))
            .await?;
        self.fetch().await;
        Ok(())
    }

    /// Remove a line from the cart, then resynchronize.
    ///
    /// # Errors
    ///
    /// Same contract as [`add`](Self::add).
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove(&mut self, product_id: &ProductId) -> Result<(), CartError> {
        let token = self.require_credential()?;
        self.api.remove_cart_line(&token, product_id).await?;
        self.fetch().await;
        Ok(())
    }

    /// Empty the server-side cart and reset local state.
    ///
    /// The result of a clear is known, so no resync round-trip is made.
    ///
    /// # Errors
    ///
    /// Same contract as [`add`](Self::add).
    #[instrument(skip(self))]
    pub async fn clear(&mut self) -> Result<(), CartError> {
        let token = self.require_credential()?;
        self.api.clear_cart(&token).await?;
        self.cart = Cart::empty();
        Ok(())
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.cart.items
    }

    /// Running total; always equals the sum of line subtotals.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.cart.total
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// True when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn require_credential(&self) -> Result<BearerToken, CartError> {
        self.credential.clone().ok_or(CartError::NotSignedIn)
    }
}

/// Clamp a requested quantity to the minimum of 1.
const fn clamp_quantity(quantity: u32) -> u32 {
    if quantity == 0 { 1 } else { quantity }
}

/// Re-derive the cart total from line subtotals.
///
/// The server sends its own total, but the invariant "total equals the sum of
/// subtotals" is enforced locally; a disagreement is logged and the derived
/// value wins. A currency mismatch between lines falls back to the server
/// total.
fn derive_total(items: &[CartItem], server_total: Price) -> Price {
    let mut total = Price::zero(server_total.currency);
    for item in items {
        match total.checked_add(item.subtotal) {
            Ok(sum) => total = sum,
            Err(e) => {
                warn!(error = %e, "mixed currencies in cart, trusting server total");
                return server_total;
            }
        }
    }

    if total != server_total {
        warn!(%total, %server_total, "server cart total disagrees with derived total");
    }
    total
}
