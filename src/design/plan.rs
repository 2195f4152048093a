//! Plan types
//!
//! Structs that mirror the JSON document the planning model is asked to
//! return, and the image records the pipeline derives from it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::DesignState;

/// Top-level planning response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanResponse {
    /// Evolved design state for the next round
    pub updated_state: DesignState,
    /// Image prompts to render
    pub plan: Vec<PlanItem>,
}

impl PlanResponse {
    /// Round of the updated state (1 when the model omitted it)
    pub fn round(&self) -> u32 {
        self.updated_state.round_or(1)
    }
}

/// One planned image
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlanItem {
    /// Unique identifier chosen by the model (e.g. `earth_exploit_1`)
    pub name: String,
    /// Design description for this image
    pub prompt: String,
    /// Exploitation or exploration
    #[serde(rename = "type")]
    pub kind: PromptKind,
    /// Target environment
    pub environment: Environment,
    /// Camera view, exterior when omitted
    #[serde(default)]
    pub view: View,
}

/// Whether a prompt refines confirmed preferences or probes a new direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Precise evolution of confirmed DNA
    Exploitation,
    /// A direction the user has not considered yet
    Exploration,
}

/// Rendering environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Earth
    Earth,
    /// Mars
    Mars,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Earth => write!(f, "earth"),
            Environment::Mars => write!(f, "mars"),
        }
    }
}

/// Camera view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Outside of the home
    #[default]
    Exterior,
    /// Inside of the home
    Interior,
    /// Cutaway or mixed view
    Both,
}

/// A generated image as reported to the client
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeneratedImage {
    /// Plan item name
    pub name: String,
    /// Relative URL under `/api/images/`
    pub url: String,
    /// Design prompt the image was rendered from
    pub prompt: String,
    /// Exploitation or exploration
    #[serde(rename = "type")]
    pub kind: PromptKind,
    /// Environment of the image
    pub environment: Environment,
    /// Camera view
    pub view: View,
}

impl GeneratedImage {
    /// Build the record for a plan item saved under `filename`
    pub fn from_item(item: &PlanItem, filename: &str) -> Self {
        Self {
            name: item.name.clone(),
            url: format!("/api/images/{}", filename),
            prompt: item.prompt.clone(),
            kind: item.kind,
            environment: item.environment,
            view: item.view,
        }
    }
}
