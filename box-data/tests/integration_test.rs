//! Integration tests for catalog loading against an in-memory store.

use box_core::{
    EstimatorStore, MaterialPricing, MemoryStore, NewQuote, NewQuoteLine, PaperType,
};
use box_data::{CatalogLoader, CatalogLoaderError};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const TEST_CATALOG: &str = include_str!("../test-data/catalog.csv");

fn test_pricing() -> MaterialPricing {
    MaterialPricing {
        kraft_cost_per_kg: dec!(30),
        virgin_cost_per_kg: dec!(50),
        conversion_cost_per_kg: dec!(5),
    }
}

async fn loaded_store() -> MemoryStore {
    let store = MemoryStore::new();
    let records = CatalogLoader::parse(TEST_CATALOG.as_bytes()).expect("Failed to parse catalog");
    CatalogLoader::load(&store, &records)
        .await
        .expect("Failed to load catalog");
    store
}

#[tokio::test]
async fn test_load_full_catalog() {
    let store = MemoryStore::new();
    let records = CatalogLoader::parse(TEST_CATALOG.as_bytes()).expect("Failed to parse catalog");

    let upserted = CatalogLoader::load(&store, &records)
        .await
        .expect("Failed to load catalog");

    assert_eq!(upserted, 6);

    let products = store.list_products().await.expect("Failed to list");
    let codes: Vec<&str> = products.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(
        codes,
        vec!["EXP-900", "HD-700", "LID-300", "PART-450", "RSC-300", "RSC-450"]
    );
}

#[tokio::test]
async fn test_loaded_product_round_trips_the_specification() {
    let store = loaded_store().await;

    let product = store.get_product("RSC-450").await.expect("Missing product");

    assert_eq!(product.name, "Regular slotted carton 450");
    assert_eq!(product.spec.ply, 5);
    assert_eq!(product.spec.paper_type, PaperType::VirginAndKraft);
    assert_eq!(product.spec.wastage_percent, dec!(4));
    assert_eq!(product.spec.layers.top, 150);
    assert_eq!(product.spec.layers.middle, 120);
    assert_eq!(product.spec.layers.liner2, 0);
    assert_eq!(product.burst_factor, Some(dec!(28)));
}

#[tokio::test]
async fn test_reload_is_idempotent() {
    let store = MemoryStore::new();
    let records = CatalogLoader::parse(TEST_CATALOG.as_bytes()).expect("Failed to parse catalog");

    CatalogLoader::load(&store, &records)
        .await
        .expect("First load failed");
    let upserted = CatalogLoader::load(&store, &records)
        .await
        .expect("Second load failed");

    assert_eq!(upserted, 6);
    assert_eq!(store.list_products().await.expect("Failed to list").len(), 6);
}

#[tokio::test]
async fn test_reload_applies_catalog_changes() {
    let store = loaded_store().await;

    let mut records =
        CatalogLoader::parse(TEST_CATALOG.as_bytes()).expect("Failed to parse catalog");
    records[0].name = "Regular slotted carton 300 (revised)".to_string();
    CatalogLoader::load(&store, &records)
        .await
        .expect("Reload failed");

    let product = store.get_product("RSC-300").await.expect("Missing product");
    assert_eq!(product.name, "Regular slotted carton 300 (revised)");
}

#[tokio::test]
async fn test_load_rejects_duplicate_codes_without_writing() {
    let store = MemoryStore::new();
    let mut records =
        CatalogLoader::parse(TEST_CATALOG.as_bytes()).expect("Failed to parse catalog");
    records[1].code = "RSC-300".to_string();

    let err = CatalogLoader::load(&store, &records)
        .await
        .expect_err("Duplicate codes should fail the load");

    match err {
        CatalogLoaderError::DuplicateCode(ref code) => assert_eq!(code, "RSC-300"),
        other => panic!("expected DuplicateCode, got {other:?}"),
    }
    assert!(store.list_products().await.expect("Failed to list").is_empty());
}

#[tokio::test]
async fn test_load_rejects_bad_paper_type_without_writing() {
    let store = MemoryStore::new();
    let mut records =
        CatalogLoader::parse(TEST_CATALOG.as_bytes()).expect("Failed to parse catalog");
    records[3].paper = "Z".to_string();

    let err = CatalogLoader::load(&store, &records)
        .await
        .expect_err("Unknown paper type should fail the load");

    assert!(matches!(err, CatalogLoaderError::UnknownPaperType { .. }));
    assert!(store.list_products().await.expect("Failed to list").is_empty());
}

#[tokio::test]
async fn test_quote_built_from_a_loaded_product() {
    let store = loaded_store().await;

    let product = store.get_product("RSC-300").await.expect("Missing product");
    let mut spec = product.spec;
    spec.pieces = 1000;

    let quote = store
        .create_quote(NewQuote {
            party_name: "Sharma Packaging".to_string(),
            pricing: test_pricing(),
            lines: vec![NewQuoteLine {
                product_name: product.name,
                spec,
                accessories: Vec::new(),
            }],
        })
        .await
        .expect("Failed to create quote");

    assert_eq!(quote.lines()[0].breakdown.total_gsm, dec!(378));
    assert_eq!(quote.subtotal(), dec!(5380.55));
}
