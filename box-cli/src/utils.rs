use box_core::CostBreakdown;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when an `--accessory` argument cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid accessory '{input}': expected CODE or CODE:PIECES")]
pub struct ParseAccessoryError {
    input: String,
}

/// Parses an `--accessory` argument of the form `CODE` or `CODE:PIECES`.
///
/// Returns the product code and the explicit quantity, if one was given.
/// Callers fall back to the parent line's quantity when it was not.
pub fn parse_accessory_arg(s: &str) -> Result<(String, Option<u32>), ParseAccessoryError> {
    let err = || ParseAccessoryError {
        input: s.to_string(),
    };

    match s.split_once(':') {
        None => {
            let code = s.trim();
            if code.is_empty() {
                return Err(err());
            }
            Ok((code.to_string(), None))
        }
        Some((code, pieces)) => {
            let code = code.trim();
            if code.is_empty() {
                return Err(err());
            }
            let pieces = pieces.trim().parse::<u32>().map_err(|_| err())?;
            Ok((code.to_string(), Some(pieces)))
        }
    }
}

/// Formats a money amount with the configured currency symbol and two
/// decimal places.
pub fn money(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{amount:.2}")
}

/// Converts grams to kilograms rounded half-up to three decimal places,
/// for display only.
pub fn kg(grams: Decimal) -> Decimal {
    (grams / Decimal::ONE_THOUSAND).round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an optional [`Decimal`] for display, using "—" when `None`.
pub fn opt_decimal_display(d: &Option<Decimal>) -> String {
    d.as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Formats a breakdown's total cost, using "—" when the specification
/// could not be costed. An incomplete line never prints as 0.00.
pub fn cost_cell(symbol: &str, breakdown: &CostBreakdown) -> String {
    if breakdown.is_incomplete() {
        "—".to_string()
    } else {
        money(symbol, breakdown.total_cost)
    }
}

/// Formats a breakdown's per-kg rate, using "—" for incomplete breakdowns.
pub fn rate_cell(symbol: &str, breakdown: &CostBreakdown) -> String {
    if breakdown.is_incomplete() {
        "—".to_string()
    } else {
        money(symbol, breakdown.paper_rate_per_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_accessory_arg_accepts_a_bare_code() {
        assert_eq!(
            parse_accessory_arg("LID-300"),
            Ok(("LID-300".to_string(), None))
        );
    }

    #[test]
    fn parse_accessory_arg_accepts_code_with_pieces() {
        assert_eq!(
            parse_accessory_arg("LID-300:500"),
            Ok(("LID-300".to_string(), Some(500)))
        );
    }

    #[test]
    fn parse_accessory_arg_trims_whitespace() {
        assert_eq!(
            parse_accessory_arg(" LID-300 : 500 "),
            Ok(("LID-300".to_string(), Some(500)))
        );
    }

    #[test]
    fn parse_accessory_arg_rejects_bad_pieces() {
        assert!(parse_accessory_arg("LID-300:lots").is_err());
    }

    #[test]
    fn parse_accessory_arg_rejects_empty_code() {
        assert!(parse_accessory_arg("").is_err());
        assert!(parse_accessory_arg(":500").is_err());
    }

    #[test]
    fn money_pads_to_two_decimals() {
        assert_eq!(money("₹", dec!(35)), "₹35.00");
        assert_eq!(money("₹", dec!(5380.55)), "₹5380.55");
    }

    #[test]
    fn kg_rounds_grams_to_three_decimals() {
        assert_eq!(kg(dec!(153729.9162)), dec!(153.730));
        assert_eq!(kg(dec!(1000)), dec!(1.000));
    }

    #[test]
    fn cost_cell_shows_a_placeholder_for_incomplete_breakdowns() {
        assert_eq!(cost_cell("₹", &CostBreakdown::zero()), "—");
    }

    #[test]
    fn cost_cell_shows_money_for_costed_breakdowns() {
        let breakdown = CostBreakdown {
            total_gsm: dec!(378),
            total_cost: dec!(5380.55),
            ..CostBreakdown::zero()
        };

        assert_eq!(cost_cell("₹", &breakdown), "₹5380.55");
    }

    #[test]
    fn rate_cell_shows_a_placeholder_for_incomplete_breakdowns() {
        assert_eq!(rate_cell("₹", &CostBreakdown::zero()), "—");
    }
}
