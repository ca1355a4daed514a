//! Clankermon Core - valuation formatting, evaluation and frame cards.
//!
//! The evaluation pipeline (submit, poll, format) lives behind
//! [`EvaluationServiceTrait`]; both the JSON API and the interactive frame
//! protocol drive it. Nothing in this crate keeps state between requests.

pub mod constants;
pub mod errors;
pub mod evaluation;
pub mod frames;
pub mod valuation;

pub use evaluation::{EvaluationRequest, EvaluationService, EvaluationServiceTrait};
pub use frames::{CardStage, CardStepController, DonationTransaction, FrameCard, FrameInput};
pub use valuation::{format_result, EvaluationResult, ValuationRow};

// Re-export error types
pub use errors::Error;
pub use errors::ErrorKind;
pub use errors::Result;
