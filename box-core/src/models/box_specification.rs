use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PaperType;

/// Paper substance of each board layer, in grams per square metre.
///
/// Every field defaults to zero, meaning "not entered". The `middle` and
/// `liner2` slots occupy the same structural position in the board:
/// 5-ply board reads `middle`, 7- and 9-ply board read `liner2`. Which
/// slots participate in costing is decided by [`BoxSpecification::ply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    pub top: u32,
    pub flute1: u32,
    pub middle: u32,
    pub liner2: u32,
    pub flute2: u32,
    pub liner3: u32,
    pub flute3: u32,
    pub liner4: u32,
    pub flute4: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSpecification {
    // Internal box dimensions in millimetres
    pub length_mm: Decimal,
    pub breadth_mm: Decimal,
    pub height_mm: Decimal,

    /// Number of paper layers in the board. 3, 5, 7 and 9 can be costed;
    /// any other value yields no board weight and therefore no cost.
    pub ply: u32,
    /// Quantity of boxes being quoted.
    pub pieces: u32,
    pub paper_type: PaperType,
    /// Production wastage applied as a weight uplift, e.g. `3.5` for 3.5%.
    pub wastage_percent: Decimal,
    pub layers: LayerStack,
}
