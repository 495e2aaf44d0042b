//! Outbound collaborator traits for the scene-generation workflow.
//!
//! Each trait is the narrowest interface the orchestrator needs from
//! one external system. Production adapters live in the sibling
//! modules; tests substitute in-memory stubs. The object store seam is
//! `sceneshot_storage::ObjectStore` and is not duplicated here.

use async_trait::async_trait;
use sceneshot_db::models::generation::CreateGeneration;

// ---------------------------------------------------------------------------
// Source image fetch
// ---------------------------------------------------------------------------

/// A source image retrieved over HTTP.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// Raw `content-type` header, if the server sent one.
    pub content_type: Option<String>,
    /// Response body.
    pub bytes: Vec<u8>,
}

/// Errors from the source-image fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status code.
    #[error("Source returned status {0}")]
    Status(u16),

    /// The request itself failed (network, DNS, TLS, etc.).
    #[error("Source fetch failed: {0}")]
    Transport(String),
}

/// Retrieves the caller's uploaded source image.
#[async_trait]
pub trait SourceImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

// ---------------------------------------------------------------------------
// Image generation
// ---------------------------------------------------------------------------

/// One content part of a generation response.
#[derive(Debug, Clone)]
pub enum GeneratedPart {
    /// Commentary or refusal text.
    Text(String),
    /// Inline image output.
    Image { mime_type: String, bytes: Vec<u8> },
}

/// Errors from the generative API.
#[derive(Debug, thiserror::Error)]
#[error("Generation failed: {0}")]
pub struct GeneratorError(pub String);

/// Invokes the generative-image API for one scene.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate from a source image and an instruction prompt.
    ///
    /// Returns the response's content parts in order; the caller scans
    /// them for image data. An empty or image-free part list is a valid
    /// response (the model declined to produce an image).
    async fn generate(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<Vec<GeneratedPart>, GeneratorError>;
}

// ---------------------------------------------------------------------------
// Record persistence
// ---------------------------------------------------------------------------

/// Errors from the record store.
#[derive(Debug, thiserror::Error)]
#[error("Record write failed: {0}")]
pub struct RecordError(pub String);

/// Persists the final generation record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create the record. Called at most once per invocation, after all
    /// scene attempts have resolved.
    async fn create(&self, record: CreateGeneration) -> Result<(), RecordError>;
}
