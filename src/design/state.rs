// LIVIN DNA state
// Free-form JSON owned by the frontend; only a handful of keys are read here

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum number of DNA keywords kept in a state
pub const MAX_DNA_KEYWORDS: usize = 8;

/// Design state as sent by the client
///
/// Unknown keys are preserved verbatim so the frontend can round-trip
/// whatever it stores alongside the well-known fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignState(Map<String, Value>);

impl DesignState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Round number, 0 when absent or not a non-negative integer
    pub fn round(&self) -> u32 {
        self.round_or(0)
    }

    /// Round number, falling back to `default` when absent
    pub fn round_or(&self, default: u32) -> u32 {
        self.0
            .get("round")
            .and_then(Value::as_u64)
            .and_then(|r| u32::try_from(r).ok())
            .unwrap_or(default)
    }

    /// DNA keywords; non-string entries are skipped
    pub fn livin_dna(&self) -> Vec<String> {
        self.string_list("livin_dna")
    }

    /// Previous user inputs, oldest first
    pub fn feedback_history(&self) -> Vec<String> {
        self.string_list("feedback_history")
    }

    /// Copy of this state with `livin_dna` replaced by at most
    /// [`MAX_DNA_KEYWORDS`] of the given keywords
    pub fn with_livin_dna(&self, keywords: &[String]) -> Self {
        let mut updated = self.clone();
        let kept: Vec<Value> = keywords
            .iter()
            .take(MAX_DNA_KEYWORDS)
            .cloned()
            .map(Value::String)
            .collect();
        updated.0.insert("livin_dna".to_string(), Value::Array(kept));
        updated
    }

    /// Raw access to a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Pretty JSON rendering used inside prompts
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
