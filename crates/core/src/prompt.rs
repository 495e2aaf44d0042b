//! Prompt assembly for scene generation.
//!
//! Every scene uses the same template: an identity-preserving framing,
//! the scene's own fragment, and a closing constraint discouraging
//! artificial-looking output.

use crate::scene::Scene;

/// Opening framing shared by every scene prompt.
const FRAMING: &str = "Create a natural, candid photo of this person ";

/// Closing constraints appended to every scene prompt.
const CONSTRAINTS: &str = "Keep the person's face, features, and outfit exactly the same. \
    Make it look like a real photo taken by a friend, not a studio shot. \
    Natural lighting, relaxed pose. High quality, Instagram-ready.";

/// Build the final instruction string for one scene.
pub fn build_prompt(scene: &Scene) -> String {
    format!("{FRAMING}{}. {CONSTRAINTS}", scene.prompt)
}
