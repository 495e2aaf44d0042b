//! Static scene catalog and request-time scene resolution.
//!
//! Scenes are configuration, not code: the catalog is an immutable list
//! built once at process start and shared read-only across requests.
//! Unknown identifiers in a request are dropped silently; a selection
//! that resolves to nothing is a validation failure.

use serde::Serialize;

use crate::error::CoreError;

/// A single scene backdrop the generator can place a person into.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    /// Stable identifier used in requests and storage paths (e.g. `"beach"`).
    pub id: &'static str,
    /// Human-readable label for scene pickers.
    pub label: &'static str,
    /// Scene-specific prompt fragment, spliced into the shared template.
    pub prompt: &'static str,
}

/// The immutable scene catalog.
#[derive(Debug, Clone)]
pub struct SceneCatalog {
    scenes: Vec<Scene>,
}

impl SceneCatalog {
    /// The built-in production catalog.
    ///
    /// Prompt fragments are tuned for natural, candid phone-photo output
    /// rather than studio renders.
    pub fn builtin() -> Self {
        Self {
            scenes: vec![
                Scene {
                    id: "beach",
                    label: "Beach",
                    prompt: "relaxing at a beautiful tropical beach during golden hour, \
                             soft natural sunlight, turquoise water in background, \
                             casual vacation vibe, candid moment",
                },
                Scene {
                    id: "city",
                    label: "City",
                    prompt: "exploring a vibrant city street at dusk, \
                             warm street lights and neon signs in background, \
                             urban lifestyle aesthetic, natural street photography style",
                },
                Scene {
                    id: "mountain",
                    label: "Mountain",
                    prompt: "hiking adventure with stunning mountain vista behind, \
                             crisp morning light, nature exploration mood, \
                             authentic outdoor travel moment",
                },
                Scene {
                    id: "cafe",
                    label: "Cafe",
                    prompt: "enjoying coffee at a charming European sidewalk cafe, \
                             soft afternoon light, cozy atmosphere with string lights, \
                             relaxed lifestyle moment",
                },
            ],
        }
    }

    /// Build a catalog from an explicit scene list (used by tests).
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self { scenes }
    }

    /// All scenes, in catalog order.
    pub fn all(&self) -> &[Scene] {
        &self.scenes
    }

    /// Look up a scene by identifier.
    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Resolve a request's scene selection against the catalog.
    ///
    /// `None` means the client did not select scenes, so the whole catalog
    /// is used. `Some(ids)` is filtered: unknown identifiers are dropped,
    /// duplicates keep their first occurrence, and request order is
    /// preserved. Resolving to zero scenes is a [`CoreError::Validation`].
    pub fn resolve(&self, requested: Option<&[String]>) -> Result<Vec<&Scene>, CoreError> {
        let resolved: Vec<&Scene> = match requested {
            None => self.scenes.iter().collect(),
            Some(ids) => {
                let mut seen: Vec<&str> = Vec::new();
                ids.iter()
                    .filter_map(|id| {
                        if seen.contains(&id.as_str()) {
                            return None;
                        }
                        seen.push(id.as_str());
                        self.get(id)
                    })
                    .collect()
            }
        };

        if resolved.is_empty() {
            return Err(CoreError::Validation(
                "No valid scenes selected for generation".to_string(),
            ));
        }
        Ok(resolved)
    }
}

impl Default for SceneCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
