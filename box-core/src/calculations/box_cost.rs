//! Cost engine for corrugated box quotations.
//!
//! This module turns one [`BoxSpecification`] plus one [`MaterialPricing`]
//! into a complete [`CostBreakdown`]. The computation is a fixed pipeline
//! of arithmetic steps with no hidden state: the same inputs always give
//! the same breakdown.
//!
//! # Pipeline
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Validity gate: dimensions, ply and pieces must all be positive |
//! | 2    | Sheet geometry: flat sheet length, breadth and area |
//! | 3    | Board substance: layer GSMs summed, fluted layers at 1.38 take-up |
//! | 4    | Weights: paper weight for the quantity, then wastage uplift |
//! | 5    | Paper rate: kraft, virgin or a top/body blend, plus conversion |
//! | 6    | Total cost: chargeable weight in kg times the effective rate |
//!
//! An input that fails the gate produces the all-zero breakdown rather than
//! an error; display layers treat it as "not yet computable". A supported
//! gate with an unsupported ply count still reports the sheet geometry but
//! carries zero substance, weight and cost.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use box_core::calculations::CostEngine;
//! use box_core::{BoxSpecification, LayerStack, MaterialPricing, PaperType};
//!
//! let pricing = MaterialPricing {
//!     kraft_cost_per_kg: dec!(30),
//!     virgin_cost_per_kg: dec!(0),
//!     conversion_cost_per_kg: dec!(5),
//! };
//!
//! let spec = BoxSpecification {
//!     length_mm: dec!(300),
//!     breadth_mm: dec!(200),
//!     height_mm: dec!(150),
//!     ply: 3,
//!     pieces: 1000,
//!     paper_type: PaperType::Kraft,
//!     wastage_percent: dec!(3.5),
//!     layers: LayerStack {
//!         top: 120,
//!         flute1: 100,
//!         bottom: 120,
//!         ..LayerStack::default()
//!     },
//! };
//!
//! let breakdown = CostEngine::new(&pricing).compute(&spec);
//!
//! assert_eq!(breakdown.sheet_length_mm, dec!(370));
//! assert_eq!(breakdown.sheet_breadth_mm, dec!(1062));
//! assert_eq!(breakdown.total_gsm, dec!(378));
//! assert_eq!(breakdown.paper_rate_per_kg, dec!(35.00));
//! assert_eq!(breakdown.total_cost, dec!(5380.55));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::round_half_up;
use crate::models::{BoxSpecification, CostBreakdown, LayerStack, MaterialPricing, PaperType};

/// Calculator for box cost breakdowns.
///
/// This struct borrows the material rates and provides the single
/// [`compute`](CostEngine::compute) entry point. It is cheap to construct,
/// so callers typically create one per recomputation rather than caching it.
#[derive(Debug, Clone)]
pub struct CostEngine<'a> {
    pricing: &'a MaterialPricing,
}

impl<'a> CostEngine<'a> {
    /// Creates a new cost engine over the given material rates.
    pub fn new(pricing: &'a MaterialPricing) -> Self {
        Self { pricing }
    }

    /// Computes the full cost breakdown for a specification.
    ///
    /// Never fails: incomplete input yields [`CostBreakdown::zero`], and an
    /// unsupported ply count yields a breakdown with geometry populated but
    /// zero substance and cost.
    pub fn compute(&self, spec: &BoxSpecification) -> CostBreakdown {
        if !self.is_computable(spec) {
            debug!(
                ply = spec.ply,
                pieces = spec.pieces,
                "specification incomplete, returning zero breakdown"
            );
            return CostBreakdown::zero();
        }

        // Flat sheet geometry
        let (sheet_length_mm, sheet_breadth_mm) = self.sheet_dimensions(spec);
        let sheet_area_m2 = self.sheet_area_m2(sheet_length_mm, sheet_breadth_mm);

        // Board substance across all layers
        let total_gsm = self.total_gsm(spec);

        // Paper weight for the quantity, then the wastage uplift
        let paper_weight_g = self.paper_weight_g(sheet_area_m2, total_gsm, spec.pieces);
        let total_weight_g = self.apply_wastage(paper_weight_g, spec.wastage_percent);

        // Effective per-kg rate and the final cost
        let paper_rate_per_kg = self.paper_rate_per_kg(spec);
        let total_cost = self.total_cost(total_weight_g, paper_rate_per_kg);

        CostBreakdown {
            sheet_length_mm,
            sheet_breadth_mm,
            sheet_area_m2,
            total_gsm,
            paper_weight_g,
            total_weight_g,
            paper_rate_per_kg,
            total_cost,
        }
    }

    /// Checks the validity gate: all dimensions, the ply count and the
    /// quantity must be positive before anything is worth computing.
    fn is_computable(
        &self,
        spec: &BoxSpecification,
    ) -> bool {
        spec.length_mm > Decimal::ZERO
            && spec.breadth_mm > Decimal::ZERO
            && spec.height_mm > Decimal::ZERO
            && spec.ply > 0
            && spec.pieces > 0
    }

    /// Calculates the flat sheet dimensions, adding the 20 mm deckle
    /// allowance to the length and the 62 mm flap and glue-lap allowance
    /// to the breadth.
    fn sheet_dimensions(
        &self,
        spec: &BoxSpecification,
    ) -> (Decimal, Decimal) {
        let sheet_length_mm = spec.breadth_mm + spec.height_mm + Decimal::from(20);
        let sheet_breadth_mm =
            Decimal::TWO * spec.length_mm + Decimal::TWO * spec.breadth_mm + Decimal::from(62);

        (sheet_length_mm, sheet_breadth_mm)
    }

    /// Calculates the flat sheet area in square metres.
    fn sheet_area_m2(
        &self,
        sheet_length_mm: Decimal,
        sheet_breadth_mm: Decimal,
    ) -> Decimal {
        sheet_length_mm * sheet_breadth_mm / Decimal::from(1_000_000)
    }

    /// Sums the board substance for the configured ply count.
    ///
    /// Flat layers count at face value, fluted layers at 1.38 take-up.
    /// A ply count outside 3/5/7/9 contributes no substance at all.
    fn total_gsm(
        &self,
        spec: &BoxSpecification,
    ) -> Decimal {
        let l = &spec.layers;
        match spec.ply {
            3 => flat(l.top) + fluted(l.flute1) + flat(l.bottom),
            5 => {
                flat(l.top)
                    + fluted(l.flute1)
                    + flat(l.middle)
                    + fluted(l.flute2)
                    + flat(l.bottom)
            }
            7 => {
                flat(l.top)
                    + fluted(l.flute1)
                    + flat(l.liner2)
                    + fluted(l.flute2)
                    + flat(l.liner3)
                    + fluted(l.flute3)
                    + flat(l.bottom)
            }
            9 => {
                flat(l.top)
                    + fluted(l.flute1)
                    + flat(l.liner2)
                    + fluted(l.flute2)
                    + flat(l.liner3)
                    + fluted(l.flute3)
                    + flat(l.liner4)
                    + fluted(l.flute4)
                    + flat(l.bottom)
            }
            other => {
                warn!(ply = other, "unsupported ply count, board substance unknown");
                Decimal::ZERO
            }
        }
    }

    /// Calculates the paper weight in grams for the full quantity.
    fn paper_weight_g(
        &self,
        sheet_area_m2: Decimal,
        total_gsm: Decimal,
        pieces: u32,
    ) -> Decimal {
        sheet_area_m2 * total_gsm * Decimal::from(pieces)
    }

    /// Inflates the paper weight by the wastage percentage.
    fn apply_wastage(
        &self,
        paper_weight_g: Decimal,
        wastage_percent: Decimal,
    ) -> Decimal {
        paper_weight_g * (Decimal::ONE + wastage_percent / Decimal::ONE_HUNDRED)
    }

    /// Selects the paper rate for the specification and adds the conversion
    /// charge, rounded to two decimal places.
    fn paper_rate_per_kg(
        &self,
        spec: &BoxSpecification,
    ) -> Decimal {
        let paper_rate = match spec.paper_type {
            PaperType::Kraft => self.pricing.kraft_cost_per_kg,
            PaperType::Virgin => self.virgin_or_fallback(),
            PaperType::VirginAndKraft => self.blended_rate(&spec.layers, spec.ply),
        };

        round_half_up(paper_rate + self.pricing.conversion_cost_per_kg)
    }

    /// Returns the virgin rate, or the kraft rate when no virgin rate is
    /// configured.
    fn virgin_or_fallback(&self) -> Decimal {
        if self.pricing.virgin_cost_per_kg > Decimal::ZERO {
            self.pricing.virgin_cost_per_kg
        } else {
            warn!("virgin rate not configured, using kraft rate");
            self.pricing.kraft_cost_per_kg
        }
    }

    /// Blends the virgin top-layer rate with the kraft rate for the rest of
    /// the board, weighted by substance.
    ///
    /// The blend denominator is top + flute1 + bottom, extended by middle and
    /// flute2 for 5-ply board only; the inner layers of 7- and 9-ply board
    /// are priced without entering the blend. Falls back to the plain kraft
    /// rate when the blend weight or top layer is zero, or when no virgin
    /// rate is configured.
    fn blended_rate(
        &self,
        layers: &LayerStack,
        ply: u32,
    ) -> Decimal {
        let top_gsm = flat(layers.top);
        let mut blend_gsm = top_gsm + fluted(layers.flute1) + flat(layers.bottom);
        if ply == 5 {
            blend_gsm += flat(layers.middle) + fluted(layers.flute2);
        }

        let virgin = self.pricing.virgin_cost_per_kg;
        if blend_gsm.is_zero() || top_gsm.is_zero() || virgin <= Decimal::ZERO {
            warn!(
                blend_gsm = %blend_gsm,
                top_gsm = %top_gsm,
                "blend not computable, using kraft rate"
            );
            return self.pricing.kraft_cost_per_kg;
        }

        let kraft_gsm = blend_gsm - top_gsm;
        (top_gsm * virgin + kraft_gsm * self.pricing.kraft_cost_per_kg) / blend_gsm
    }

    /// Calculates the final cost: chargeable weight in kg times the
    /// effective rate, rounded to two decimal places.
    fn total_cost(
        &self,
        total_weight_g: Decimal,
        paper_rate_per_kg: Decimal,
    ) -> Decimal {
        round_half_up(total_weight_g / Decimal::ONE_THOUSAND * paper_rate_per_kg)
    }
}

/// A flat layer's substance at face value.
fn flat(gsm: u32) -> Decimal {
    Decimal::from(gsm)
}

/// A fluted layer's substance with the 1.38 corrugation take-up applied.
fn fluted(gsm: u32) -> Decimal {
    Decimal::from(gsm) * Decimal::new(138, 2)
}
