//! Planning prompt for the LIVIN DNA manager

use super::style::StylePhase;
use crate::design::DesignState;

/// Number of previous inputs quoted back to the model
const HISTORY_WINDOW: usize = 5;

/// Describe uploaded images for the planning prompt
///
/// Returns `None` when nothing was uploaded.
pub fn describe_uploads(count: usize) -> Option<String> {
    (count > 0).then(|| format!("{} reference/sketch images provided by user", count))
}

/// Build the planning prompt
///
/// The prompt targets round `state.round + 1` and asks the model for an
/// updated state plus six image prompts (three Earth, three Mars) as JSON.
///
/// # Arguments
/// * `feedback` - The user's new input
/// * `state` - Current design state
/// * `images_description` - Optional description of uploaded images
pub fn build_planning_prompt(
    feedback: &str,
    state: &DesignState,
    images_description: Option<&str>,
) -> String {
    let current_round = state.round() + 1;
    let phase = StylePhase::for_round(current_round);
    let style = phase.config();

    let history = state.feedback_history();
    let history_context = if history.is_empty() {
        String::new()
    } else {
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        let lines: Vec<String> = history[start..]
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("- Round {}: {}", i + 1, entry))
            .collect();
        format!("Previous user inputs:\n{}", lines.join("\n"))
    };

    let images_line = images_description
        .map(|d| format!("User uploaded images showing: {}", d))
        .unwrap_or_default();

    let style_instructions = match phase {
        StylePhase::Early => {
            "Focus on hand-drawn architectural sketches and sci-fi illustration styles. Minimal photorealistic rendering."
        }
        StylePhase::Mature => {
            "Focus on cinematic, photorealistic renders. Include human figures in natural living scenarios where appropriate."
        }
    };

    format!(
        r#"You are the 'LIVIN Genome Architect' - an AI that helps users discover and refine their dream modular mobile home design for both Earth and Mars.

Current LIVIN DNA State:
{state_json}

{history_context}

User's New Input: "{feedback}"

{images_line}

Current Round: {current_round}
Style Phase: {phase} ({ratio})
Include Human Characters: {include_characters}

=== YOUR TASKS ===

1. **UPDATE LIVIN DNA** (Maximum 8 keywords):
   Extract and refine keywords that capture the user's dream home DNA across these dimensions:
   - Spatial preferences (open/cozy, high ceilings, flow)
   - Material preferences (wood, glass, metal, fabric)
   - Color palette tendencies
   - Functional priorities (workspace, relaxation, social)
   - Aesthetic style (minimalist, organic, industrial, futuristic)
   - Emotional qualities (peaceful, adventurous, warm, bold)

   Rules:
   - CONSOLIDATE similar concepts
   - PRIORITIZE new feedback over old if contradictory
   - Keep total keywords <= 8
   - Each keyword should be 1-3 words

2. **GENERATE DESIGN SUMMARY**:
   Write a 2-3 sentence narrative summarizing the user's "LIVIN Persona" in Markdown.

3. **PLAN 6 IMAGE PROMPTS** using the dual-environment strategy:

   **EARTH GROUP (3 images):**
   - 2 EXPLOITATION prompts: Precise evolution based on confirmed DNA preferences
   - 1 EXPLORATION prompt: Test a new direction the user hasn't considered

   **MARS GROUP (3 images):**
   - 1 EXPLOITATION prompt: Adapt Earth preferences to Mars context
   - 2 EXPLORATION prompts: Bold, wild, futuristic concepts pushing boundaries

   For each prompt, specify:
   - name: unique identifier
   - prompt: detailed design description
   - type: "exploitation" or "exploration"
   - environment: "earth" or "mars"
   - view: "exterior", "interior", or "both"

4. **STYLE INSTRUCTIONS FOR THIS ROUND**:
   {style_instructions}

=== OUTPUT FORMAT ===
Respond ONLY with valid JSON:

{{
  "updated_state": {{
    "round": {current_round},
    "design_summary": "Markdown narrative of user's LIVIN Persona...",
    "livin_dna": ["keyword1", "keyword2", ...],
    "confirmed_preferences": ["specific preference 1", "preference 2"],
    "rejected_elements": ["rejected element 1", ...],
    "feedback_history": [...previous + current feedback...]
  }},
  "plan": [
    {{
      "name": "earth_exploit_1",
      "prompt": "Detailed design description...",
      "type": "exploitation",
      "environment": "earth",
      "view": "exterior"
    }}
  ]
}}

The "plan" array must contain exactly 6 entries (3 earth + 3 mars).
"#,
        state_json = state.to_pretty_json(),
        history_context = history_context,
        feedback = feedback,
        images_line = images_line,
        current_round = current_round,
        phase = phase,
        ratio = style.ratio,
        include_characters = style.include_characters,
        style_instructions = style_instructions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(value: serde_json::Value) -> DesignState {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_describe_uploads() {
        assert_eq!(describe_uploads(0), None);
        assert_eq!(
            describe_uploads(3).as_deref(),
            Some("3 reference/sketch images provided by user")
        );
    }

    #[test]
    fn test_first_round_is_early_phase() {
        let prompt = build_planning_prompt("cozy cabin", &DesignState::new(), None);
        assert!(prompt.contains("Current Round: 1"));
        assert!(prompt.contains("Style Phase: early (70% sketch / 30% render)"));
        assert!(prompt.contains("Include Human Characters: false"));
        assert!(prompt.contains(r#"User's New Input: "cozy cabin""#));
        assert!(prompt.contains("\"round\": 1,"));
        assert!(!prompt.contains("Previous user inputs"));
        assert!(!prompt.contains("User uploaded images"));
    }

    #[test]
    fn test_round_three_switches_to_mature() {
        let prompt = build_planning_prompt("more glass", &state(json!({"round": 2})), None);
        assert!(prompt.contains("Current Round: 3"));
        assert!(prompt.contains("Style Phase: mature"));
        assert!(prompt.contains("Include Human Characters: true"));
        assert!(prompt.contains("Focus on cinematic, photorealistic renders"));
    }

    #[test]
    fn test_history_keeps_last_five() {
        let s = state(json!({
            "round": 6,
            "feedback_history": ["a", "b", "c", "d", "e", "f", "g"]
        }));
        let prompt = build_planning_prompt("h", &s, None);
        assert!(prompt.contains("Previous user inputs:\n- Round 1: c\n"));
        assert!(prompt.contains("- Round 5: g"));
        assert!(!prompt.contains("- Round 6:"));
    }

    #[test]
    fn test_images_description_included() {
        let desc = describe_uploads(2);
        let prompt = build_planning_prompt("x", &DesignState::new(), desc.as_deref());
        assert!(prompt.contains("User uploaded images showing: 2 reference/sketch images"));
    }

    #[test]
    fn test_state_is_embedded_as_json() {
        let s = state(json!({"round": 1, "livin_dna": ["timber"]}));
        let prompt = build_planning_prompt("x", &s, None);
        assert!(prompt.contains("\"timber\""));
    }
}
