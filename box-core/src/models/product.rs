use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BoxSpecification;

/// Catalog entry: a named, reusable box specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub code: String,
    pub name: String,
    pub spec: BoxSpecification,
    /// Burst factor of the board. Documentation only; costing never reads it.
    pub burst_factor: Option<Decimal>,
}
