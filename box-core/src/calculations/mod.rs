//! Costing calculations for corrugated box quotations.
//!
//! This module provides the cost engine that prices a single box
//! specification, together with the document-level arithmetic layered on
//! top of quotation subtotals.

pub mod box_cost;
pub mod common;
pub mod invoice;

pub use box_cost::CostEngine;
pub use invoice::{InvoiceTotals, invoice_totals, tds_amount};
