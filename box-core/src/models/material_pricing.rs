use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw-material rates shared by every quotation, all in currency per kg.
///
/// `conversion_cost_per_kg` is the processing charge added on top of the
/// blended paper rate regardless of paper type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialPricing {
    pub kraft_cost_per_kg: Decimal,
    pub virgin_cost_per_kg: Decimal,
    pub conversion_cost_per_kg: Decimal,
}
