//! Scene-generation workflow.
//!
//! [`orchestrator::Orchestrator`] drives one generation request end to
//! end: request validation, source-image fetch, the per-scene
//! generation loop with per-item failure isolation, asset upload, and
//! the final record write. The outbound collaborators it talks to are
//! trait seams ([`collaborators`]) with production adapters in
//! [`fetch`], [`generator`], and [`record`].

pub mod collaborators;
pub mod fetch;
pub mod generator;
pub mod orchestrator;
pub mod record;

pub use orchestrator::Orchestrator;
