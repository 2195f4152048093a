//! Final image-generation prompt
//!
//! Wraps a planned design description in an environment-specific base
//! scene, the phase style and the current DNA keywords.

use super::style::StylePhase;
use crate::design::{Environment, View};

const DEFAULT_EARTH_LOCATION: &str = "a scenic location perfect for modular living";
const DEFAULT_MARS_LOCATION: &str = "Jezero Crater region, Mars";
const DEFAULT_DNA: &str = "modern, flexible, aesthetic";

/// Inputs for [`build_image_prompt`]
#[derive(Debug, Clone, Copy)]
pub struct ImagePromptInput<'a> {
    /// Design description produced by the planner
    pub design_prompt: &'a str,
    /// Earth or Mars
    pub environment: Environment,
    /// Camera view
    pub view: View,
    /// Round of the updated state
    pub round: u32,
    /// Current DNA keywords
    pub livin_dna: &'a [String],
    /// User-provided location, empty or `None` for the default
    pub location: Option<&'a str>,
}

/// Build the image prompt for one planned item
pub fn build_image_prompt(input: &ImagePromptInput<'_>) -> String {
    let phase = StylePhase::for_round(input.round);

    let style = match phase {
        StylePhase::Early => "hand-drawn architectural concept sketch with soft watercolor touches",
        StylePhase::Mature if phase.config().include_characters => {
            "cinematic photorealistic render with natural human figures in a lifestyle scene"
        }
        StylePhase::Mature => "cinematic photorealistic architectural visualization",
    };

    let location = input
        .location
        .filter(|l| !l.trim().is_empty())
        .unwrap_or(match input.environment {
            Environment::Earth => DEFAULT_EARTH_LOCATION,
            Environment::Mars => DEFAULT_MARS_LOCATION,
        });

    let base = match (input.environment, input.view) {
        (Environment::Earth, _) => earth_scene(style, location),
        (Environment::Mars, View::Interior) => mars_indoor_scene(style, location),
        (Environment::Mars, _) => mars_outdoor_scene(style, location),
    };

    let dna = if input.livin_dna.is_empty() {
        DEFAULT_DNA.to_string()
    } else {
        input.livin_dna.join(", ")
    };

    let finish = match phase {
        StylePhase::Early => "Sketch-like artistic style with visible strokes",
        StylePhase::Mature => "Photorealistic with cinematic lighting",
    };

    format!(
        r#"{base}

Design Specifications: {design}

LIVIN DNA Keywords: {dna}

Technical Requirements:
- High quality, detailed visualization
- Consistent modular architecture language
- {finish}
- Rendering: {primary}, with {secondary}
- 16:9 aspect ratio composition
- No text, logos, or watermarks
"#,
        base = base,
        design = input.design_prompt,
        dna = dna,
        finish = finish,
        primary = phase.config().primary,
        secondary = phase.config().secondary,
    )
}

fn earth_scene(style: &str, location: &str) -> String {
    format!(
        r#"A {style} of an affordable, flexible, aesthetic modular mobile home on Earth.
Location context: {location}
Environment: Realistic Earth setting with natural lighting, familiar landscapes, sustainable integration with nature.
Architecture: Modular, mobile, adaptable design that balances affordability with aesthetic beauty.
Mood: Grounded, practical yet inspiring, harmonious with Earth's environment.
"#
    )
}

fn mars_outdoor_scene(style: &str, location: &str) -> String {
    format!(
        r#"A {style} of a modular mobile habitat on Mars - EXTERIOR VIEW.
Location context: {location}
Environment: Wild Martian landscape - rust-red terrain, dramatic rock formations, pink-orange sky with visible stars, dust storms in distance, alien yet majestic.
Architecture: Bold futuristic design inspired by interstellar exploration games and sci-fi novels. Floating platforms, geodesic domes, bioluminescent accents, adaptive structures.
Mood: Adventurous, awe-inspiring, pioneering spirit, untamed frontier.
Style inspiration: The Expanse, Dune, No Man's Sky, Starfield, Mars colony concept art.
"#
    )
}

fn mars_indoor_scene(style: &str, location: &str) -> String {
    format!(
        r#"A {style} of a modular mobile habitat on Mars - INTERIOR VIEW.
Location context: {location}
Exterior visible through windows: Martian landscape with red rocks, alien sky, dust particles catching light.
Interior: Cozy, earth-like living space designed for human comfort. Warm lighting, natural materials (wood tones, soft fabrics), minimal but elegant furniture, plants in hydroponic systems.
Architecture: Smart modular design that feels like home despite being on another planet.
Mood: Safe haven, warmth within the wild, human resilience, comfortable minimalism with design sensibility.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(
        environment: Environment,
        view: View,
        round: u32,
        dna: &'a [String],
        location: Option<&'a str>,
    ) -> ImagePromptInput<'a> {
        ImagePromptInput {
            design_prompt: "stacked timber modules",
            environment,
            view,
            round,
            livin_dna: dna,
            location,
        }
    }

    #[test]
    fn test_earth_early_uses_sketch_style_and_default_location() {
        let prompt = build_image_prompt(&input(Environment::Earth, View::Exterior, 1, &[], None));
        assert!(prompt.starts_with(
            "A hand-drawn architectural concept sketch with soft watercolor touches of an affordable"
        ));
        assert!(prompt.contains("Location context: a scenic location perfect for modular living"));
        assert!(prompt.contains("LIVIN DNA Keywords: modern, flexible, aesthetic"));
        assert!(prompt.contains("- Sketch-like artistic style with visible strokes"));
        assert!(prompt.contains(
            "- Rendering: hand-drawn architectural sketch, sci-fi novel illustration style, concept art with visible pencil strokes, with soft 3D render with artistic touches"
        ));
        assert!(prompt.contains("Design Specifications: stacked timber modules"));
    }

    #[test]
    fn test_mars_interior_uses_indoor_template() {
        let prompt = build_image_prompt(&input(Environment::Mars, View::Interior, 3, &[], None));
        assert!(prompt.contains("INTERIOR VIEW"));
        assert!(prompt.contains("Jezero Crater region, Mars"));
        assert!(prompt.contains("natural human figures in a lifestyle scene"));
        assert!(prompt.contains("- Photorealistic with cinematic lighting"));
        assert!(prompt.contains("lifestyle scene with human figures in natural poses"));
    }

    #[test]
    fn test_mars_both_uses_outdoor_template() {
        let prompt = build_image_prompt(&input(Environment::Mars, View::Both, 1, &[], None));
        assert!(prompt.contains("EXTERIOR VIEW"));
    }

    #[test]
    fn test_custom_location_and_dna() {
        let dna = vec!["warm wood".to_string(), "open plan".to_string()];
        let prompt = build_image_prompt(&input(
            Environment::Earth,
            View::Interior,
            2,
            &dna,
            Some("Norwegian fjord"),
        ));
        assert!(prompt.contains("Location context: Norwegian fjord"));
        assert!(prompt.contains("LIVIN DNA Keywords: warm wood, open plan"));
    }

    #[test]
    fn test_empty_location_falls_back_to_default() {
        let prompt = build_image_prompt(&input(Environment::Mars, View::Exterior, 1, &[], Some("")));
        assert!(prompt.contains("Location context: Jezero Crater region, Mars"));
    }
}
