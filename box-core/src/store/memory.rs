//! In-memory store used by the CLI and by tests.
//!
//! Rows live in hash maps behind one `RwLock`; ids are assigned from
//! monotonic counters, starting at 1. Nothing survives the process, but
//! the trait contract matches what a database-backed store would expose.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::repository::{EstimatorStore, StoreError};
use crate::models::{NewParty, Party, Product};
use crate::quote::{NewQuote, Quote};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    parties: HashMap<i64, Party>,
    products: HashMap<String, Product>,
    quotes: HashMap<i64, Quote>,
    next_party_id: i64,
    next_quote_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl EstimatorStore for MemoryStore {
    async fn create_party(&self, party: NewParty) -> Result<Party, StoreError> {
        let mut tables = self.write()?;
        tables.next_party_id += 1;
        let party = Party {
            id: tables.next_party_id,
            name: party.name,
            gstin: party.gstin,
        };
        tables.parties.insert(party.id, party.clone());
        Ok(party)
    }

    async fn get_party(&self, id: i64) -> Result<Party, StoreError> {
        self.read()?
            .parties
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_parties(&self) -> Result<Vec<Party>, StoreError> {
        let mut parties: Vec<Party> = self.read()?.parties.values().cloned().collect();
        parties.sort_by_key(|party| party.id);
        Ok(parties)
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), StoreError> {
        self.write()?
            .products
            .insert(product.code.clone(), product.clone());
        Ok(())
    }

    async fn get_product(&self, code: &str) -> Result<Product, StoreError> {
        self.read()?
            .products
            .get(code)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self.read()?.products.values().cloned().collect();
        products.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(products)
    }

    async fn create_quote(&self, quote: NewQuote) -> Result<Quote, StoreError> {
        let mut tables = self.write()?;
        tables.next_quote_id += 1;
        let quote = Quote::from_new(quote, tables.next_quote_id);
        tables.quotes.insert(quote.id, quote.clone());
        Ok(quote)
    }

    async fn get_quote(&self, id: i64) -> Result<Quote, StoreError> {
        self.read()?
            .quotes
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_quote(&self, quote: &Quote) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        if !tables.quotes.contains_key(&quote.id) {
            return Err(StoreError::NotFound);
        }
        tables.quotes.insert(quote.id, quote.clone());
        Ok(())
    }

    async fn delete_quote(&self, id: i64) -> Result<(), StoreError> {
        self.write()?
            .quotes
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn list_quotes(&self) -> Result<Vec<Quote>, StoreError> {
        let mut quotes: Vec<Quote> = self.read()?.quotes.values().cloned().collect();
        quotes.sort_by_key(|quote| quote.id);
        Ok(quotes)
    }
}
