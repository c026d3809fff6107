//! Plain-text tables for the estimator CLI.
//!
//! All output goes to stdout as fixed-width columns; logging stays on
//! stderr. Cells derived from an incomplete breakdown render as "—",
//! never as a zero amount.

use std::fmt::Write as _;

use box_core::calculations::InvoiceTotals;
use box_core::{CostBreakdown, MaterialPricing, Product, Quote};

use crate::utils::{cost_cell, kg, money, opt_decimal_display, rate_cell};

fn dims_cell(breakdown: &CostBreakdown) -> String {
    if breakdown.sheet_length_mm.is_zero() {
        "—".to_string()
    } else {
        format!(
            "{} x {}",
            breakdown.sheet_length_mm, breakdown.sheet_breadth_mm
        )
    }
}

fn area_cell(breakdown: &CostBreakdown) -> String {
    if breakdown.sheet_area_m2.is_zero() {
        "—".to_string()
    } else {
        breakdown.sheet_area_m2.to_string()
    }
}

fn gsm_cell(breakdown: &CostBreakdown) -> String {
    if breakdown.total_gsm.is_zero() {
        "—".to_string()
    } else {
        breakdown.total_gsm.normalize().to_string()
    }
}

fn weight_cell(breakdown: &CostBreakdown) -> String {
    if breakdown.total_weight_g.is_zero() {
        "—".to_string()
    } else {
        format!("{:.3}", kg(breakdown.total_weight_g))
    }
}

fn breakdown_columns(symbol: &str, breakdown: &CostBreakdown) -> String {
    format!(
        "{:<12} {:<10} {:<7} {:<11} {:<9} {}",
        dims_cell(breakdown),
        area_cell(breakdown),
        gsm_cell(breakdown),
        weight_cell(breakdown),
        rate_cell(symbol, breakdown),
        cost_cell(symbol, breakdown),
    )
}

/// Renders a quote as a table: one row per line, indented rows for
/// accessories, then the subtotal.
pub fn quote_table(symbol: &str, quote: &Quote) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Quote #{} for {}", quote.id, quote.party_name);
    let _ = writeln!(
        out,
        "{:<4} {:<30} {:<5} {:<12} {:<10} {:<7} {:<11} {:<9} {}",
        "#", "Product", "Paper", "Sheet mm", "Area m2", "GSM", "Weight kg", "Rate/kg", "Amount"
    );

    for line in quote.lines() {
        let _ = writeln!(
            out,
            "{:<4} {:<30} {:<5} {}",
            line.id,
            line.product_name,
            line.spec.paper_type.as_str(),
            breakdown_columns(symbol, &line.breakdown),
        );

        for (accessory, breakdown) in line.accessories.iter().zip(&line.accessory_breakdowns) {
            let _ = writeln!(
                out,
                "{:<4} {:<30} {:<5} {}",
                "",
                format!("+ {}", accessory.name),
                accessory.spec.paper_type.as_str(),
                breakdown_columns(symbol, breakdown),
            );
        }
    }

    let has_incomplete = quote
        .lines()
        .iter()
        .any(|line| line.breakdown.is_incomplete());
    let subtotal = if quote.subtotal().is_zero() && has_incomplete {
        "—".to_string()
    } else {
        money(symbol, quote.subtotal())
    };
    let _ = writeln!(out, "{:>92} {}", "Subtotal:", subtotal);

    out
}

/// Renders the invoice totals block under a quote table.
pub fn totals_block(symbol: &str, totals: &InvoiceTotals) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:>92} {}",
        format!("Tax @ {}%:", totals.tax_percent.normalize()),
        money(symbol, totals.tax_amount)
    );
    let _ = writeln!(
        out,
        "{:>92} {}",
        "Grand total:",
        money(symbol, totals.grand_total)
    );

    out
}

/// Renders the product catalog as a table.
pub fn products_table(products: &[Product]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<10} {:<30} {:<16} {:<4} {:<21} {:<9} {}",
        "Code", "Name", "Size mm", "Ply", "Paper", "Wastage %", "BF"
    );

    for product in products {
        let spec = &product.spec;
        let _ = writeln!(
            out,
            "{:<10} {:<30} {:<16} {:<4} {:<21} {:<9} {}",
            product.code,
            product.name,
            format!("{}x{}x{}", spec.length_mm, spec.breadth_mm, spec.height_mm),
            spec.ply,
            spec.paper_type.label(),
            spec.wastage_percent,
            opt_decimal_display(&product.burst_factor),
        );
    }

    out
}

/// Renders the current material rates.
pub fn pricing_block(symbol: &str, pricing: &MaterialPricing) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Material rates");
    let _ = writeln!(
        out,
        "  Kraft:      {}/kg",
        money(symbol, pricing.kraft_cost_per_kg)
    );
    let _ = writeln!(
        out,
        "  Virgin:     {}/kg",
        money(symbol, pricing.virgin_cost_per_kg)
    );
    let _ = writeln!(
        out,
        "  Conversion: {}/kg",
        money(symbol, pricing.conversion_cost_per_kg)
    );

    out
}
