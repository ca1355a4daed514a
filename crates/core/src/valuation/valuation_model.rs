//! Valuation domain models.

use serde::{Deserialize, Serialize};

use crate::constants::FINAL_CATEGORY;

/// One formatted valuation line.
///
/// Amounts are fixed-point strings: 2 decimals for USD, 6 for ETH.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValuationRow {
    pub category: String,
    pub usd_valuation: String,
    pub eth_valuation: String,
}

impl ValuationRow {
    pub fn is_final(&self) -> bool {
        self.category == FINAL_CATEGORY
    }
}

/// Outcome of evaluating one Clankermon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationResult {
    pub level: String,
    #[serde(rename = "type")]
    pub cm_type: String,
    pub valuations: Vec<ValuationRow>,
    /// Configured donation address, passed through untouched.
    pub donation_address: Option<String>,
}

impl EvaluationResult {
    /// The summary row, if the remote query produced one.
    pub fn final_valuation(&self) -> Option<&ValuationRow> {
        self.valuations.iter().find(|row| row.is_final())
    }
}
