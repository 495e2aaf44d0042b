//! REST client for the generative-image API.
//!
//! Provides typed request/response content types (text and inline
//! base64 image parts) and a [`client::GenAiClient`] wrapping the
//! `generateContent` endpoint with [`reqwest`].

pub mod base64_serde;
pub mod client;
pub mod types;
