//! Design domain types
//!
//! The LIVIN DNA state exchanged with the frontend, the plan returned by the
//! planning model, and the image records produced from it.

pub mod plan;
pub mod state;

pub use plan::{Environment, GeneratedImage, PlanItem, PlanResponse, PromptKind, View};
pub use state::{DesignState, MAX_DNA_KEYWORDS};
