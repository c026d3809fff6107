pub mod calculations;
pub mod models;
pub mod pricing;
pub mod quote;
pub mod store;

pub use models::*;
pub use pricing::PricingFeed;
pub use quote::{Accessory, NewQuote, NewQuoteLine, Quote, QuoteError, QuoteLine};
pub use store::{EstimatorStore, MemoryStore, StoreError};
