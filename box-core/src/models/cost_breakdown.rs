use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived costing figures for one specification at one set of rates.
///
/// A breakdown is produced as a whole by the cost engine and never mutated
/// field by field; callers cache it next to the specification and replace
/// it wholesale whenever either input changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Flat sheet length before folding, mm.
    pub sheet_length_mm: Decimal,
    /// Flat sheet breadth before folding, mm.
    pub sheet_breadth_mm: Decimal,
    /// Flat sheet area, m².
    pub sheet_area_m2: Decimal,
    /// Aggregated board substance with flute take-up included, g/m².
    pub total_gsm: Decimal,
    /// Paper weight for the full quantity before wastage, grams.
    pub paper_weight_g: Decimal,
    /// Paper weight inflated by wastage, grams.
    pub total_weight_g: Decimal,
    /// Blended paper rate plus conversion, per kg, rounded to 2 decimals.
    pub paper_rate_per_kg: Decimal,
    /// Cost for the full quantity, rounded to 2 decimals.
    pub total_cost: Decimal,
}

impl CostBreakdown {
    /// The all-zero breakdown reported for specifications that cannot be
    /// costed yet.
    pub fn zero() -> Self {
        Self::default()
    }

    /// True when the specification could not be costed at all, as opposed
    /// to a genuine zero-cost result. Display layers show a placeholder
    /// instead of a price for incomplete breakdowns.
    pub fn is_incomplete(&self) -> bool {
        self.total_cost.is_zero() && self.total_gsm.is_zero()
    }
}
