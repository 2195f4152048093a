//! Prompt templates
//!
//! Pure functions that assemble the planning prompt sent to the chat model
//! and the final prompt sent to the image model. Output depends only on the
//! inputs: the round number selects the style phase, the environment and
//! view select the base scene.

pub mod image;
pub mod planning;
pub mod style;

pub use image::{build_image_prompt, ImagePromptInput};
pub use planning::{build_planning_prompt, describe_uploads};
pub use style::{StyleConfig, StylePhase};
