use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewParty, Party, Product};
use crate::quote::{NewQuote, Quote};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Persistence seam for the estimator. Stores keep specifications, parties
/// and pricing snapshots; cost breakdowns are derived state that callers
/// recompute after loading (see [`Quote::recompute_all`]).
#[async_trait]
pub trait EstimatorStore: Send + Sync {
    // Party master
    async fn create_party(&self, party: NewParty) -> Result<Party, StoreError>;
    async fn get_party(&self, id: i64) -> Result<Party, StoreError>;
    async fn list_parties(&self) -> Result<Vec<Party>, StoreError>;

    // Product catalog, keyed by product code
    async fn upsert_product(&self, product: &Product) -> Result<(), StoreError>;
    async fn get_product(&self, code: &str) -> Result<Product, StoreError>;
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    // Quotations
    async fn create_quote(&self, quote: NewQuote) -> Result<Quote, StoreError>;

    async fn get_quote(&self, id: i64) -> Result<Quote, StoreError>;

    async fn update_quote(&self, quote: &Quote) -> Result<(), StoreError>;

    async fn delete_quote(&self, id: i64) -> Result<(), StoreError>;

    async fn list_quotes(&self) -> Result<Vec<Quote>, StoreError>;
}
