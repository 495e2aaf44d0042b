//! HTTP client for the generative-image API.
//!
//! Wraps the `generateContent` endpoint using [`reqwest`]. One client
//! instance is built at startup and shared across requests; `reqwest`
//! pools connections internally.

use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default image-capable model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp-image-generation";

/// Errors from the generative API layer.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Generative API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Client for one generative-image model.
pub struct GenAiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GenAiClient {
    /// Create a client with the default endpoint and model.
    pub fn new(api_key: String) -> Self {
        Self::with_options(
            reqwest::Client::new(),
            DEFAULT_API_URL.to_string(),
            api_key,
            DEFAULT_MODEL.to_string(),
        )
    }

    /// Create a client with explicit endpoint, model, and an existing
    /// [`reqwest::Client`] (useful for connection pooling and tests).
    pub fn with_options(
        client: reqwest::Client,
        api_url: String,
        api_key: String,
        model: String,
    ) -> Self {
        Self {
            client,
            api_url,
            api_key,
            model,
        }
    }

    /// Model identifier this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate content from a source image and an instruction prompt.
    ///
    /// Sends the image as an inline base64 blob with its MIME type,
    /// followed by the prompt text, requesting a response that may
    /// contain image parts.
    pub async fn generate_image(
        &self,
        image: Vec<u8>,
        mime_type: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline_data(image, mime_type),
                Part::text(prompt),
            ])],
            generation_config: Some(GenerationConfig::text_and_image()),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        );
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Submitting generation request");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GenAiError::Api`] with the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GenAiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
