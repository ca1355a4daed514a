use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::constants::{DEFAULT_FRAME_LEVEL, DEFAULT_FRAME_TYPE};
use crate::evaluation::{EvaluationRequest, EvaluationServiceTrait};
use crate::frames::frames_input::FrameInput;
use crate::frames::frames_model::{
    CardStage, DonationTransaction, FrameButton, FrameCard, FrameImages,
};
use crate::valuation::EvaluationResult;

/// Stateless driver of the frame flow.
///
/// Every card is derived from the current request alone: the level travels
/// in the evaluate continuation URL, the type arrives as the user's text.
#[derive(Clone)]
pub struct CardStepController {
    service: Arc<dyn EvaluationServiceTrait>,
    images: FrameImages,
    donation_address: Option<String>,
}

impl CardStepController {
    pub fn new(
        service: Arc<dyn EvaluationServiceTrait>,
        images: FrameImages,
        donation_address: Option<String>,
    ) -> Self {
        Self {
            service,
            images,
            donation_address,
        }
    }

    /// START: prompt for the level.
    pub fn start(&self, base_url: &str) -> FrameCard {
        FrameCard {
            stage: CardStage::Start,
            image: self.images.level_prompt.clone(),
            title: "Step 1: Enter Level".to_string(),
            lines: Vec::new(),
            input_placeholder: Some("Enter Clankermon Level (1-100)".to_string()),
            buttons: vec![FrameButton::post("Next")],
            post_url: Some(stage_url(base_url, CardStage::GetType)),
        }
    }

    /// GET_TYPE: prompt for the type, carrying the level forward.
    pub fn get_type(&self, base_url: &str, input: &FrameInput) -> FrameCard {
        let level = input.text_or(DEFAULT_FRAME_LEVEL);
        FrameCard {
            stage: CardStage::GetType,
            image: self.images.type_prompt.clone(),
            title: "Step 2: Enter Type".to_string(),
            lines: Vec::new(),
            input_placeholder: Some("Enter Clankermon Type (e.g., Fire, Water)".to_string()),
            buttons: vec![FrameButton::post("Evaluate")],
            post_url: Some(evaluate_url(base_url, level)),
        }
    }

    /// EVALUATE: run the evaluation and render its result, or the error card.
    pub async fn evaluate(
        &self,
        base_url: &str,
        level: Option<&str>,
        input: &FrameInput,
        cancel: &CancellationToken,
    ) -> FrameCard {
        let cm_type = input.text_or(DEFAULT_FRAME_TYPE);
        let request = match EvaluationRequest::new(level.unwrap_or_default(), cm_type) {
            Ok(request) => request,
            Err(e) => {
                warn!("Frame evaluation rejected: {}", e);
                return self.error(base_url);
            }
        };

        match self.service.evaluate(&request, cancel).await {
            Ok(result) => self.result_card(base_url, &result),
            Err(e) => {
                warn!("Frame evaluation failed ({:?}): {}", e.kind(), e);
                self.error(base_url)
            }
        }
    }

    /// DONATE: the fixed transaction descriptor.
    pub fn donate(&self) -> DonationTransaction {
        DonationTransaction::new(self.donation_address.as_deref())
    }

    /// ERROR: generic failure with a way back to START.
    pub fn error(&self, base_url: &str) -> FrameCard {
        FrameCard {
            stage: CardStage::Error,
            image: self.images.error.clone(),
            title: "Error".to_string(),
            lines: vec!["Failed to evaluate. Please try again.".to_string()],
            input_placeholder: None,
            buttons: vec![FrameButton::post_to(
                "Try Again",
                stage_url(base_url, CardStage::Start),
            )],
            post_url: None,
        }
    }

    fn result_card(&self, base_url: &str, result: &EvaluationResult) -> FrameCard {
        let final_row = result.final_valuation();
        let usd = final_row
            .map(|r| r.usd_valuation.clone())
            .unwrap_or_else(|| "0.00".to_string());
        let eth = final_row
            .map(|r| r.eth_valuation.clone())
            .unwrap_or_else(|| "0.000000".to_string());

        FrameCard {
            stage: CardStage::Evaluate,
            image: self.images.result.clone(),
            title: "Evaluation Results".to_string(),
            lines: vec![
                format!("Level: {} | Type: {}", result.level, result.cm_type),
                format!("USD: ${}", usd),
                format!("ETH: Ξ{}", eth),
            ],
            input_placeholder: None,
            buttons: vec![
                FrameButton::tx(
                    "💝 Donate 0.23 USDC",
                    stage_url(base_url, CardStage::Donate),
                ),
                FrameButton::post_to(
                    "🔄 New Evaluation",
                    stage_url(base_url, CardStage::Start),
                ),
            ],
            post_url: None,
        }
    }
}

fn stage_url(base_url: &str, stage: CardStage) -> String {
    format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        stage.path().unwrap_or_default()
    )
}

/// Continuation URL for EVALUATE with `level` percent-encoded into the query.
pub fn evaluate_url(base_url: &str, level: &str) -> String {
    format!(
        "{}?level={}",
        stage_url(base_url, CardStage::Evaluate),
        urlencoding::encode(level)
    )
}
