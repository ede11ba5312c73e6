//! Compare list driven by real catalog records.
//!
//! The compare container itself is client-local; this exercises the intended
//! flow of opting catalog products into the comparison panel.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use amberleaf_core::ProductId;
use amberleaf_integration_tests::{init_tracing, oil, spawn_mock_store};
use amberleaf_storefront::api::ApiClient;
use amberleaf_storefront::catalog::Catalog;
use amberleaf_storefront::compare::CompareList;
use amberleaf_storefront::config::StoreConfig;

#[tokio::test]
async fn compare_selection_from_catalog() {
    init_tracing();
    let store = spawn_mock_store(vec![
        oil("p1", "Lavender Essential Oil", 12.5),
        oil("p2", "Tea Tree Essential Oil", 8.0),
        oil("p3", "Peppermint Essential Oil", 9.0),
        oil("p4", "Eucalyptus Essential Oil", 7.5),
        oil("p5", "Frankincense Essential Oil", 24.0),
    ])
    .await;
    let catalog = Catalog::new(store.api_client(), Duration::from_secs(300));
    let mut compare = CompareList::new();

    for id in ["p1", "p2", "p3", "p4"] {
        let product = catalog.get(&ProductId::new(id)).await.unwrap();
        assert!(compare.add(product));
    }
    assert_eq!(compare.len(), 4);

    // Fifth distinct product is a no-op; the existing four are unchanged
    let p5 = catalog.get(&ProductId::new("p5")).await.unwrap();
    assert!(!compare.add(p5));
    assert_eq!(compare.len(), 4);
    assert!(!compare.contains(&ProductId::new("p5")));

    assert!(compare.open_panel());
    compare.remove(&ProductId::new("p2"));
    let remaining: Vec<&str> = compare.entries().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(remaining, vec!["p1", "p3", "p4"]);

    compare.clear();
    assert!(compare.is_empty());
    assert!(!compare.is_panel_open());
}

#[tokio::test]
async fn stack_wires_up_from_config() {
    init_tracing();
    let store = spawn_mock_store(vec![
        oil("p1", "Lavender Essential Oil", 12.5),
        oil("p2", "Tea Tree Essential Oil", 8.0),
        oil("p3", "Peppermint Essential Oil", 9.0),
    ])
    .await;

    // The documented wiring: config drives the client, the catalog cache
    // TTL, and the compare limit.
    let config = StoreConfig {
        api_base_url: store.base_url.clone(),
        compare_limit: 2,
        catalog_cache_ttl: Duration::from_secs(300),
    };

    let catalog = Catalog::new(ApiClient::from_config(&config), config.catalog_cache_ttl);
    let mut compare = CompareList::with_limit(config.compare_limit);

    for id in ["p1", "p2"] {
        let product = catalog.get(&ProductId::new(id)).await.unwrap();
        assert!(compare.add(product));
    }

    // The configured limit of 2 bounds the set
    let p3 = catalog.get(&ProductId::new("p3")).await.unwrap();
    assert!(!compare.add(p3));
    assert_eq!(compare.len(), 2);
    assert!(compare.can_compare());
}
