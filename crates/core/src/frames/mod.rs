//! Frames module - the multi-step interactive card protocol.
//!
//! ```text
//! START --(level)--> GET_TYPE --(type, level in URL)--> EVALUATE --> result | ERROR
//!                                                          |
//!                                                          +--(tx)--> DONATE
//! ERROR --(restart)--> START
//! ```

mod frames_controller;
mod frames_input;
mod frames_model;
mod frames_renderer;

pub use frames_controller::{evaluate_url, CardStepController};
pub use frames_input::FrameInput;
pub use frames_model::{
    ButtonAction, CardStage, DonationParams, DonationTransaction, FrameButton, FrameCard,
    FrameImages,
};
