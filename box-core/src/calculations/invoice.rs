//! Estimate invoice and TDS voucher arithmetic.
//!
//! A quotation subtotal feeds two plain percentage layers: tax added on top
//! for an estimate invoice, and tax deducted at source for a payment
//! voucher. Document numbering, layout and filing are outside this crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{percent_of, round_half_up};

/// Totals block of an estimate invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_percent: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

/// Computes estimate invoice totals from a quotation subtotal.
///
/// The subtotal is rounded to two decimal places first, then the tax is
/// taken as a plain percentage of it.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use box_core::calculations::invoice_totals;
///
/// let totals = invoice_totals(dec!(5380.55), dec!(18));
///
/// assert_eq!(totals.tax_amount, dec!(968.50));
/// assert_eq!(totals.grand_total, dec!(6349.05));
/// ```
pub fn invoice_totals(subtotal: Decimal, tax_percent: Decimal) -> InvoiceTotals {
    let subtotal = round_half_up(subtotal);
    let tax_amount = percent_of(subtotal, tax_percent);

    InvoiceTotals {
        subtotal,
        tax_percent,
        tax_amount,
        grand_total: round_half_up(subtotal + tax_amount),
    }
}

/// Computes the tax deducted at source on a payment amount.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use box_core::calculations::tds_amount;
///
/// assert_eq!(tds_amount(dec!(100000), dec!(2)), dec!(2000.00));
/// ```
pub fn tds_amount(base: Decimal, tds_percent: Decimal) -> Decimal {
    percent_of(base, tds_percent)
}
