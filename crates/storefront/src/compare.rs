//! Compare list container.
//!
//! A bounded, ordered, deduplicated set of product records selected for
//! side-by-side comparison, plus the visibility flag of the comparison panel.
//! Purely client-local: no persistence, no network; state is gone on session
//! end.
//!
//! Overflow and duplicate adds are logical no-ops, not errors.

use amberleaf_core::ProductId;

use crate::config::DEFAULT_COMPARE_LIMIT;
use crate::types::Product;

/// Per-session compare state, owned by a single controller per session.
#[derive(Debug, Clone)]
pub struct CompareList {
    entries: Vec<Product>,
    limit: usize,
    panel_open: bool,
}

impl CompareList {
    /// Create an empty compare list with the default limit of 4.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limit(DEFAULT_COMPARE_LIMIT)
    }

    /// Create an empty compare list with a custom limit.
    ///
    /// A limit of 0 is treated as 1; an empty-capacity compare list is
    /// meaningless.
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: if limit == 0 { 1 } else { limit },
            panel_open: false,
        }
    }

    /// Add a product to the compare set.
    ///
    /// No-op when the product is already present or the set is full; returns
    /// whether the product was added. Order is selection order.
    pub fn add(&mut self, product: Product) -> bool {
        if self.entries.len() >= self.limit || self.contains(&product.id) {
            return false;
        }
        self.entries.push(product);
        true
    }

    /// Remove a product from the compare set; no-op when absent.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.entries.retain(|entry| &entry.id != product_id);
    }

    /// Empty the set and close the panel.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.panel_open = false;
    }

    /// Membership test. O(n) over a set of at most `limit` entries.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|entry| &entry.id == product_id)
    }

    /// Products in selection order.
    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// Number of selected products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of products the set holds.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// True when the set is at its limit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    /// Comparison needs at least two products to be meaningful.
    #[must_use]
    pub fn can_compare(&self) -> bool {
        self.entries.len() >= 2
    }

    /// Open the comparison panel; gated on [`can_compare`](Self::can_compare).
    ///
    /// Returns whether the panel is now open.
    pub fn open_panel(&mut self) -> bool {
        if self.can_compare() {
            self.panel_open = true;
        }
        self.panel_open
    }

    /// Close the comparison panel without touching the selection.
    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    /// Current panel visibility.
    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel_open
    }
}

impl Default for CompareList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use amberleaf_core::{Currency, Price};

    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_string(),
            description: None,
            price: Price::from_f64(10.0, Currency::USD).unwrap(),
            rating: 4.5,
            review_count: 10,
            image_url: None,
            botanical_name: None,
            origin: None,
            extraction_method: None,
            benefits: Vec::new(),
            uses: Vec::new(),
            in_stock: true,
            organic: false,
        }
    }

    fn ids(list: &CompareList) -> Vec<&str> {
        list.entries().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_add_preserves_selection_order() {
        let mut list = CompareList::new();
        assert!(list.add(product("p1")));
        assert!(list.add(product("p2")));
        assert!(list.add(product("p3")));
        assert_eq!(ids(&list), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut list = CompareList::new();
        assert!(list.add(product("p1")));
        assert!(!list.add(product("p1")));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_beyond_limit_is_noop() {
        let mut list = CompareList::new();
        for id in ["p1", "p2", "p3", "p4"] {
            assert!(list.add(product(id)));
        }
        assert!(list.is_full());

        // Fifth distinct product: no-op, existing four unchanged
        assert!(!list.add(product("p5")));
        assert_eq!(list.len(), 4);
        assert!(!list.contains(&ProductId::new("p5")));
        assert_eq!(ids(&list), vec!["p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_add_stays_bounded_under_volume() {
        let mut list = CompareList::new();
        for i in 0..100 {
            list.add(product(&format!("p{i}")));
        }
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_remove_keeps_order_of_rest() {
        let mut list = CompareList::new();
        for id in ["p1", "p2", "p3", "p4"] {
            list.add(product(id));
        }
        list.remove(&ProductId::new("p2"));
        assert_eq!(ids(&list), vec!["p1", "p3", "p4"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut list = CompareList::new();
        list.add(product("p1"));
        list.remove(&ProductId::new("p9"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_clear_empties_and_closes_panel() {
        let mut list = CompareList::new();
        list.add(product("p1"));
        list.add(product("p2"));
        assert!(list.open_panel());

        list.clear();
        assert!(list.is_empty());
        assert!(!list.is_panel_open());
    }

    #[test]
    fn test_open_panel_requires_two_entries() {
        let mut list = CompareList::new();
        list.add(product("p1"));
        assert!(!list.can_compare());
        assert!(!list.open_panel());

        list.add(product("p2"));
        assert!(list.can_compare());
        assert!(list.open_panel());

        list.close_panel();
        assert!(!list.is_panel_open());
    }

    #[test]
    fn test_custom_limit() {
        let mut list = CompareList::with_limit(2);
        assert!(list.add(product("p1")));
        assert!(list.add(product("p2")));
        assert!(!list.add(product("p3")));
        assert_eq!(list.limit(), 2);
    }

    #[test]
    fn test_zero_limit_is_treated_as_one() {
        let list = CompareList::with_limit(0);
        assert_eq!(list.limit(), 1);
    }
}
