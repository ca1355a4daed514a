//! Valuation module - formatted valuation rows and results.

mod valuation_formatter;
mod valuation_model;

pub use valuation_formatter::{coerce_amount, format_result, format_row, to_fixed};
pub use valuation_model::{EvaluationResult, ValuationRow};
