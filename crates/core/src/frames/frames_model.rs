//! Frame card domain models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DONATION_CHAIN_ID, DONATION_METHOD, DONATION_VALUE};

/// Steps of the interactive evaluation flow.
///
/// No stage has server-side identity: a card is fully described by its
/// rendering and the continuation target it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardStage {
    Start,
    GetType,
    Evaluate,
    Donate,
    Error,
}

impl CardStage {
    /// Route serving this stage. `Error` is rendered in place and has none.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            CardStage::Start => Some("/api/frame/start"),
            CardStage::GetType => Some("/api/frame/get-type"),
            CardStage::Evaluate => Some("/api/frame/evaluate"),
            CardStage::Donate => Some("/api/frame/donate"),
            CardStage::Error => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Posts the card back to a continuation URL.
    Post,
    /// Asks the client to fetch and sign a transaction.
    Tx,
}

impl ButtonAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonAction::Post => "post",
            ButtonAction::Tx => "tx",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameButton {
    pub label: String,
    pub action: ButtonAction,
    /// Button-specific target; falls back to the card's `post_url` when absent.
    pub target: Option<String>,
}

impl FrameButton {
    pub fn post(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Post,
            target: None,
        }
    }

    pub fn post_to(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Post,
            target: Some(target.into()),
        }
    }

    pub fn tx(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Tx,
            target: Some(target.into()),
        }
    }
}

/// One rendered unit of the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCard {
    pub stage: CardStage,
    pub image: String,
    pub title: String,
    pub lines: Vec<String>,
    pub input_placeholder: Option<String>,
    pub buttons: Vec<FrameButton>,
    /// Card-level continuation URL.
    pub post_url: Option<String>,
}

impl FrameCard {
    /// Continuation target of the `index`-th (0-based) button.
    pub fn button_target(&self, index: usize) -> Option<&str> {
        let button = self.buttons.get(index)?;
        button.target.as_deref().or(self.post_url.as_deref())
    }
}

/// Images shown on each card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameImages {
    pub level_prompt: String,
    pub type_prompt: String,
    pub result: String,
    pub error: String,
}

impl Default for FrameImages {
    fn default() -> Self {
        Self {
            level_prompt: "https://i.imgur.com/placeholder-level.png".to_string(),
            type_prompt: "https://i.imgur.com/placeholder-type.png".to_string(),
            result: "https://i.imgur.com/placeholder-result.png".to_string(),
            error: "https://i.imgur.com/placeholder-error.png".to_string(),
        }
    }
}

/// Transaction the client is asked to sign from the donate button.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationTransaction {
    pub chain_id: String,
    pub method: String,
    pub params: DonationParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationParams {
    pub abi: Vec<Value>,
    pub to: Option<String>,
    pub value: String,
}

impl DonationTransaction {
    /// The fixed donation descriptor; only the recipient is configurable.
    pub fn new(to: Option<&str>) -> Self {
        Self {
            chain_id: DONATION_CHAIN_ID.to_string(),
            method: DONATION_METHOD.to_string(),
            params: DonationParams {
                abi: Vec::new(),
                to: to.map(str::to_string),
                value: DONATION_VALUE.to_string(),
            },
        }
    }
}
