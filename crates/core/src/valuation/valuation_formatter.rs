use std::str::FromStr;

use clankermon_execution::ResultRow;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::constants::{ETH_DECIMAL_PLACES, USD_DECIMAL_PLACES};
use crate::valuation::valuation_model::{EvaluationResult, ValuationRow};

const CATEGORY_FIELD: &str = "category";
const USD_FIELD: &str = "usd_valuation";
const ETH_FIELD: &str = "eth_valuation";

/// Maps raw result rows to an [`EvaluationResult`].
///
/// Total: anything that is not a usable number formats as zero.
pub fn format_result(
    level: &str,
    cm_type: &str,
    rows: &[ResultRow],
    donation_address: Option<&str>,
) -> EvaluationResult {
    EvaluationResult {
        level: level.to_string(),
        cm_type: cm_type.to_string(),
        valuations: rows.iter().map(format_row).collect(),
        donation_address: donation_address.map(str::to_string),
    }
}

pub fn format_row(row: &ResultRow) -> ValuationRow {
    ValuationRow {
        category: category_of(row.get(CATEGORY_FIELD)),
        usd_valuation: to_fixed(coerce_amount(row.get(USD_FIELD)), USD_DECIMAL_PLACES),
        eth_valuation: to_fixed(coerce_amount(row.get(ETH_FIELD)), ETH_DECIMAL_PLACES),
    }
}

fn category_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Lenient numeric coercion of a raw amount.
pub fn coerce_amount(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => parse_leading_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_leading_decimal(s),
        _ => None,
    };
    parsed.unwrap_or(Decimal::ZERO)
}

/// Parses the longest numeric prefix of `raw` ("12.3abc" is 12.3).
fn parse_leading_decimal(raw: &str) -> Option<Decimal> {
    let prefix = numeric_prefix(raw.trim());
    if prefix.is_empty() {
        return None;
    }

    let (negative, unsigned) = match prefix.as_bytes()[0] {
        b'-' => (true, &prefix[1..]),
        b'+' => (false, &prefix[1..]),
        _ => (false, prefix),
    };
    let mut normalized = String::with_capacity(unsigned.len() + 2);
    if negative {
        normalized.push('-');
    }
    if unsigned.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(unsigned);

    let parsed = match normalized.find(['e', 'E']) {
        Some(pos) => {
            let (mantissa, exponent) = normalized.split_at(pos);
            let mantissa = mantissa.trim_end_matches('.');
            Decimal::from_scientific(&format!("{}{}", mantissa, exponent)).ok()
        }
        None => Decimal::from_str(normalized.trim_end_matches('.')).ok(),
    };
    parsed.map(|d| d.normalize())
}

/// Byte length of `[+-]? digits* (. digits*)? ([eE] [+-]? digits+)?` with at
/// least one mantissa digit, or empty when there is none.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Fixed-point rendering, rounding half away from zero.
pub fn to_fixed(amount: Decimal, places: u32) -> String {
    let rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{:.*}", places as usize, rounded)
}
