use clankermon_core::frames::{DonationParams, DonationTransaction};
use clankermon_core::valuation::{EvaluationResult, ValuationRow};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of `POST /api/evaluate`. Fields are loose JSON so numbers are accepted too.
#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct EvaluateBody {
    #[schema(value_type = Option<String>, example = "42")]
    pub level: Option<Value>,
    #[schema(value_type = Option<String>, example = "Water")]
    pub cm_type: Option<Value>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ValuationRowResponse {
    pub category: String,
    pub usd_valuation: String,
    pub eth_valuation: String,
}

impl From<ValuationRow> for ValuationRowResponse {
    fn from(r: ValuationRow) -> Self {
        Self {
            category: r.category,
            usd_valuation: r.usd_valuation,
            eth_valuation: r.eth_valuation,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct EvaluationResponse {
    pub level: String,
    #[serde(rename = "type")]
    pub cm_type: String,
    pub valuations: Vec<ValuationRowResponse>,
    pub donation_address: Option<String>,
}

impl From<EvaluationResult> for EvaluationResponse {
    fn from(r: EvaluationResult) -> Self {
        Self {
            level: r.level,
            cm_type: r.cm_type,
            valuations: r.valuations.into_iter().map(Into::into).collect(),
            donation_address: r.donation_address,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct DonationParamsResponse {
    #[schema(value_type = Vec<Object>)]
    pub abi: Vec<Value>,
    pub to: Option<String>,
    pub value: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub chain_id: String,
    pub method: String,
    pub params: DonationParamsResponse,
}

impl From<DonationTransaction> for DonationResponse {
    fn from(tx: DonationTransaction) -> Self {
        let DonationParams { abi, to, value } = tx.params;
        Self {
            chain_id: tx.chain_id,
            method: tx.method,
            params: DonationParamsResponse { abi, to, value },
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Value) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}
