//! Domain logic for the sceneshot backend.
//!
//! Everything in this crate is pure: error taxonomy, the static scene
//! catalog, prompt assembly, content-type validation, storage path
//! conventions, and generation-id minting. IO lives in the sibling
//! crates (`sceneshot-genai`, `sceneshot-storage`, `sceneshot-db`,
//! `sceneshot-pipeline`).

pub mod error;
pub mod generation;
pub mod mime;
pub mod paths;
pub mod prompt;
pub mod scene;
pub mod types;
