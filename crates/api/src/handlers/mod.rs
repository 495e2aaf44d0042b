//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the orchestrator or the repositories in
//! `sceneshot_db` and map errors via [`crate::error::AppError`].

pub mod generation;
pub mod scene;
