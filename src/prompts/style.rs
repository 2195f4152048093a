//! Style evolution across rounds

use std::fmt;

/// Visual style phase, chosen by round number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePhase {
    /// Rounds 1-2: sketches and illustration
    Early,
    /// Round 3 onwards: cinematic renders with people
    Mature,
}

/// Style parameters of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleConfig {
    /// Dominant rendering style
    pub primary: &'static str,
    /// Supporting rendering style
    pub secondary: &'static str,
    /// Sketch / render mix
    pub ratio: &'static str,
    /// Whether human figures belong in the scene
    pub include_characters: bool,
}

const EARLY: StyleConfig = StyleConfig {
    primary: "hand-drawn architectural sketch, sci-fi novel illustration style, concept art with visible pencil strokes",
    secondary: "soft 3D render with artistic touches",
    ratio: "70% sketch / 30% render",
    include_characters: false,
};

const MATURE: StyleConfig = StyleConfig {
    primary: "cinematic scene render, photorealistic visualization, movie-quality lighting",
    secondary: "lifestyle scene with human figures in natural poses",
    ratio: "30% sketch / 70% render",
    include_characters: true,
};

impl StylePhase {
    /// Phase for a round number
    pub fn for_round(round: u32) -> Self {
        if round <= 2 {
            StylePhase::Early
        } else {
            StylePhase::Mature
        }
    }

    /// Style parameters of this phase
    pub fn config(self) -> &'static StyleConfig {
        match self {
            StylePhase::Early => &EARLY,
            StylePhase::Mature => &MATURE,
        }
    }

    /// Lowercase name used in prompts
    pub fn name(self) -> &'static str {
        match self {
            StylePhase::Early => "early",
            StylePhase::Mature => "mature",
        }
    }
}

impl fmt::Display for StylePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
