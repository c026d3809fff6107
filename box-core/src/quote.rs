//! Quotation state: priced line items with cached cost breakdowns.
//!
//! A [`Quote`] owns the [`MaterialPricing`] snapshot it was computed with.
//! Breakdowns are derived state: every mutation of a line or of the
//! snapshot recomputes the affected breakdowns synchronously, so a quote
//! never exposes a stale figure. Stores persist specifications and the
//! snapshot only; a quote loaded from a store is brought back to life with
//! [`Quote::recompute_all`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::CostEngine;
use crate::models::{BoxSpecification, CostBreakdown, MaterialPricing};

/// Errors raised by quote mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// The quote has no line with the given id.
    #[error("no line with id {0} in this quote")]
    UnknownLine(i64),
}

/// A secondary item priced alongside a quote line, such as a lid, a
/// partition set or an extra sleeve. Costed by the same engine as the
/// parent box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessory {
    pub name: String,
    pub spec: BoxSpecification,
}

/// One priced product on a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub id: i64,
    pub product_name: String,
    pub spec: BoxSpecification,
    pub accessories: Vec<Accessory>,

    /// Engine output for `spec`. Derived, never persisted.
    #[serde(skip)]
    pub breakdown: CostBreakdown,
    /// Engine output per accessory, parallel to `accessories`. Derived,
    /// never persisted.
    #[serde(skip)]
    pub accessory_breakdowns: Vec<CostBreakdown>,
}

impl QuoteLine {
    fn recompute(&mut self, pricing: &MaterialPricing) {
        let engine = CostEngine::new(pricing);
        self.breakdown = engine.compute(&self.spec);
        self.accessory_breakdowns = self
            .accessories
            .iter()
            .map(|accessory| engine.compute(&accessory.spec))
            .collect();
    }

    /// The displayed line total: the parent box plus every accessory.
    pub fn line_total(&self) -> Decimal {
        self.breakdown.total_cost
            + self
                .accessory_breakdowns
                .iter()
                .map(|breakdown| breakdown.total_cost)
                .sum::<Decimal>()
    }
}

/// For creating new quote lines (no id yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuoteLine {
    pub product_name: String,
    pub spec: BoxSpecification,
    pub accessories: Vec<Accessory>,
}

/// For creating new quotes (no id or timestamp yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub party_name: String,
    pub pricing: MaterialPricing,
    pub lines: Vec<NewQuoteLine>,
}

/// A quotation for one party: a pricing snapshot plus priced lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub party_name: String,
    pub quoted_at: DateTime<Utc>,
    /// The rates every breakdown on this quote was computed with. Replaced
    /// only by [`Quote::reprice`].
    pub pricing: MaterialPricing,
    lines: Vec<QuoteLine>,
}

impl Quote {
    /// Creates an empty, unsaved quote (id 0) stamped with the current time.
    pub fn new(party_name: impl Into<String>, pricing: MaterialPricing) -> Self {
        Self {
            id: 0,
            party_name: party_name.into(),
            quoted_at: Utc::now(),
            pricing,
            lines: Vec::new(),
        }
    }

    /// Builds a full quote from its creation record, assigning line ids
    /// sequentially and computing every breakdown.
    pub fn from_new(new: NewQuote, id: i64) -> Self {
        let lines = new
            .lines
            .into_iter()
            .zip(1i64..)
            .map(|(line, line_id)| QuoteLine {
                id: line_id,
                product_name: line.product_name,
                spec: line.spec,
                accessories: line.accessories,
                breakdown: CostBreakdown::zero(),
                accessory_breakdowns: Vec::new(),
            })
            .collect();

        let mut quote = Self {
            id,
            party_name: new.party_name,
            quoted_at: Utc::now(),
            pricing: new.pricing,
            lines,
        };
        quote.recompute_all();
        quote
    }

    /// Adds a line for a product and returns its id. The breakdown is
    /// computed before this returns.
    pub fn add_line(&mut self, product_name: impl Into<String>, spec: BoxSpecification) -> i64 {
        let id = self.lines.iter().map(|line| line.id).max().unwrap_or(0) + 1;
        let mut line = QuoteLine {
            id,
            product_name: product_name.into(),
            spec,
            accessories: Vec::new(),
            breakdown: CostBreakdown::zero(),
            accessory_breakdowns: Vec::new(),
        };
        line.recompute(&self.pricing);
        self.lines.push(line);
        id
    }

    /// Attaches an accessory to a line and recomputes that line.
    pub fn add_accessory(&mut self, line_id: i64, accessory: Accessory) -> Result<(), QuoteError> {
        let pricing = self.pricing.clone();
        let line = self.line_mut(line_id)?;
        line.accessories.push(accessory);
        line.recompute(&pricing);
        Ok(())
    }

    /// Replaces a line's specification and recomputes that line.
    pub fn update_spec(
        &mut self,
        line_id: i64,
        spec: BoxSpecification,
    ) -> Result<(), QuoteError> {
        let pricing = self.pricing.clone();
        let line = self.line_mut(line_id)?;
        line.spec = spec;
        line.recompute(&pricing);
        Ok(())
    }

    /// Removes a line from the quote.
    pub fn remove_line(&mut self, line_id: i64) -> Result<(), QuoteError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.id == line_id)
            .ok_or(QuoteError::UnknownLine(line_id))?;
        self.lines.remove(index);
        Ok(())
    }

    /// Replaces the pricing snapshot and recomputes every breakdown on the
    /// quote. Lines are never repriced individually against mixed rates.
    pub fn reprice(&mut self, pricing: MaterialPricing) {
        debug!(quote_id = self.id, "repricing quote against new rates");
        self.pricing = pricing;
        self.recompute_all();
    }

    /// Recomputes every breakdown from the current specifications and
    /// snapshot. Called after loading a stored quote, whose derived state
    /// is deserialized empty.
    pub fn recompute_all(&mut self) {
        let pricing = self.pricing.clone();
        for line in &mut self.lines {
            line.recompute(&pricing);
        }
    }

    pub fn lines(&self) -> &[QuoteLine] {
        &self.lines
    }

    pub fn line(&self, line_id: i64) -> Option<&QuoteLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    /// The sum of every line total. Line totals are already rounded money,
    /// so the sum is exact.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(QuoteLine::line_total).sum()
    }

    fn line_mut(&mut self, line_id: i64) -> Result<&mut QuoteLine, QuoteError> {
        self.lines
            .iter_mut()
            .find(|line| line.id == line_id)
            .ok_or(QuoteError::UnknownLine(line_id))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{LayerStack, PaperType};

    fn test_pricing() -> MaterialPricing {
        MaterialPricing {
            kraft_cost_per_kg: dec!(30),
            virgin_cost_per_kg: dec!(50),
            conversion_cost_per_kg: dec!(5),
        }
    }

    fn kraft_carton() -> BoxSpecification {
        BoxSpecification {
            length_mm: dec!(300),
            breadth_mm: dec!(200),
            height_mm: dec!(150),
            ply: 3,
            pieces: 1000,
            paper_type: PaperType::Kraft,
            wastage_percent: dec!(3.5),
            layers: LayerStack {
                top: 120,
                flute1: 100,
                bottom: 120,
                ..LayerStack::default()
            },
        }
    }

    // =========================================================================
    // construction tests
    // =========================================================================

    #[test]
    fn from_new_assigns_line_ids_and_computes_breakdowns() {
        let new = NewQuote {
            party_name: "Sharma Packaging".to_string(),
            pricing: test_pricing(),
            lines: vec![
                NewQuoteLine {
                    product_name: "RSC carton".to_string(),
                    spec: kraft_carton(),
                    accessories: Vec::new(),
                },
                NewQuoteLine {
                    product_name: "RSC carton, single".to_string(),
                    spec: BoxSpecification {
                        pieces: 1,
                        ..kraft_carton()
                    },
                    accessories: Vec::new(),
                },
            ],
        };

        let quote = Quote::from_new(new, 7);

        assert_eq!(quote.id, 7);
        assert_eq!(quote.lines()[0].id, 1);
        assert_eq!(quote.lines()[1].id, 2);
        assert_eq!(quote.lines()[0].breakdown.total_cost, dec!(5380.55));
        assert_eq!(quote.lines()[1].breakdown.total_cost, dec!(5.38));
        assert_eq!(quote.subtotal(), dec!(5385.93));
    }

    #[test]
    fn add_line_computes_the_breakdown_immediately() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());

        let line_id = quote.add_line("RSC carton", kraft_carton());

        assert_eq!(line_id, 1);
        let line = quote.line(line_id).unwrap();
        assert_eq!(line.breakdown.total_cost, dec!(5380.55));
        assert_eq!(line.line_total(), dec!(5380.55));
    }

    #[test]
    fn add_line_assigns_increasing_ids() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());

        let first = quote.add_line("RSC carton", kraft_carton());
        let second = quote.add_line("RSC carton", kraft_carton());

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    // =========================================================================
    // accessory tests
    // =========================================================================

    #[test]
    fn accessories_are_added_into_the_line_total() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());
        let line_id = quote.add_line("RSC carton", kraft_carton());

        quote
            .add_accessory(
                line_id,
                Accessory {
                    name: "Lid".to_string(),
                    spec: kraft_carton(),
                },
            )
            .unwrap();

        let line = quote.line(line_id).unwrap();
        assert_eq!(line.accessory_breakdowns.len(), 1);
        assert_eq!(line.accessory_breakdowns[0].total_cost, dec!(5380.55));
        assert_eq!(line.line_total(), dec!(10761.10));
    }

    #[test]
    fn add_accessory_to_missing_line_is_an_error() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());

        let result = quote.add_accessory(
            99,
            Accessory {
                name: "Lid".to_string(),
                spec: kraft_carton(),
            },
        );

        assert_eq!(result, Err(QuoteError::UnknownLine(99)));
    }

    #[test]
    fn incomplete_accessory_contributes_nothing() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());
        let line_id = quote.add_line("RSC carton", kraft_carton());

        quote
            .add_accessory(
                line_id,
                Accessory {
                    name: "Lid".to_string(),
                    spec: BoxSpecification::default(),
                },
            )
            .unwrap();

        let line = quote.line(line_id).unwrap();
        assert!(line.accessory_breakdowns[0].is_incomplete());
        assert_eq!(line.line_total(), dec!(5380.55));
    }

    // =========================================================================
    // mutation tests
    // =========================================================================

    #[test]
    fn update_spec_recomputes_the_line() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());
        let line_id = quote.add_line("RSC carton", kraft_carton());

        let mut smaller = kraft_carton();
        smaller.pieces = 1;
        quote.update_spec(line_id, smaller).unwrap();

        assert_eq!(quote.line(line_id).unwrap().line_total(), dec!(5.38));
    }

    #[test]
    fn update_spec_on_missing_line_is_an_error() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());

        let result = quote.update_spec(3, kraft_carton());

        assert_eq!(result, Err(QuoteError::UnknownLine(3)));
    }

    #[test]
    fn remove_line_drops_it_from_the_subtotal() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());
        let first = quote.add_line("RSC carton", kraft_carton());
        quote.add_line("RSC carton", kraft_carton());

        quote.remove_line(first).unwrap();

        assert_eq!(quote.lines().len(), 1);
        assert_eq!(quote.subtotal(), dec!(5380.55));
    }

    #[test]
    fn incomplete_line_contributes_zero_to_the_subtotal() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());
        quote.add_line("RSC carton", kraft_carton());
        let incomplete = quote.add_line("Unfinished", BoxSpecification::default());

        assert!(quote.line(incomplete).unwrap().breakdown.is_incomplete());
        assert_eq!(quote.subtotal(), dec!(5380.55));
    }

    // =========================================================================
    // reprice tests
    // =========================================================================

    #[test]
    fn reprice_replaces_the_snapshot_and_recomputes_every_line() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());
        let first = quote.add_line("RSC carton", kraft_carton());
        let second = quote.add_line("RSC carton, single", {
            let mut spec = kraft_carton();
            spec.pieces = 1;
            spec
        });

        let mut new_pricing = test_pricing();
        new_pricing.kraft_cost_per_kg = dec!(40);
        quote.reprice(new_pricing.clone());

        assert_eq!(quote.pricing, new_pricing);
        let line = quote.line(first).unwrap();
        assert_eq!(line.breakdown.paper_rate_per_kg, dec!(45.00));
        assert_eq!(line.breakdown.total_cost, dec!(6917.85));
        // The second line is repriced against the same snapshot, never left
        // at the old rates
        assert_eq!(
            quote.line(second).unwrap().breakdown.paper_rate_per_kg,
            dec!(45.00)
        );
    }

    #[test]
    fn reprice_covers_accessories_too() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());
        let line_id = quote.add_line("RSC carton", kraft_carton());
        quote
            .add_accessory(
                line_id,
                Accessory {
                    name: "Lid".to_string(),
                    spec: kraft_carton(),
                },
            )
            .unwrap();

        let mut new_pricing = test_pricing();
        new_pricing.kraft_cost_per_kg = dec!(40);
        quote.reprice(new_pricing);

        let line = quote.line(line_id).unwrap();
        assert_eq!(line.accessory_breakdowns[0].paper_rate_per_kg, dec!(45.00));
        assert_eq!(line.line_total(), dec!(13835.70));
    }

    #[test]
    fn recompute_all_repopulates_cleared_breakdowns() {
        let mut quote = Quote::new("Sharma Packaging", test_pricing());
        let line_id = quote.add_line("RSC carton", kraft_carton());

        // Simulate a quote freshly deserialized from a store
        quote.lines[0].breakdown = CostBreakdown::zero();
        quote.lines[0].accessory_breakdowns.clear();
        assert_eq!(quote.subtotal(), Decimal::ZERO);

        quote.recompute_all();

        assert_eq!(quote.line(line_id).unwrap().line_total(), dec!(5380.55));
    }
}
