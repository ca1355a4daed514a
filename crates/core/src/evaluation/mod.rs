//! Evaluation module - request model, service trait and the submit/poll/format pipeline.

mod evaluation_model;
mod evaluation_service;
mod evaluation_traits;


pub use evaluation_model::EvaluationRequest;
pub use evaluation_service::EvaluationService;
pub use evaluation_traits::EvaluationServiceTrait;
