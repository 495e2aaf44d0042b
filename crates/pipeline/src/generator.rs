//! Adapter from the generative API client to the [`ImageGenerator`] seam.

use async_trait::async_trait;
use sceneshot_genai::client::GenAiClient;

use crate::collaborators::{GeneratedPart, GeneratorError, ImageGenerator};

/// [`ImageGenerator`] backed by the `generateContent` endpoint.
pub struct GenAiImageGenerator {
    client: GenAiClient,
}

impl GenAiImageGenerator {
    pub fn new(client: GenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageGenerator for GenAiImageGenerator {
    async fn generate(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<Vec<GeneratedPart>, GeneratorError> {
        let response = self
            .client
            .generate_image(image.to_vec(), mime_type, prompt)
            .await
            .map_err(|e| GeneratorError(e.to_string()))?;

        let parts = response
            .parts()
            .iter()
            .filter_map(|part| {
                if let Some(blob) = &part.inline_data {
                    Some(GeneratedPart::Image {
                        mime_type: blob.mime_type.clone(),
                        bytes: blob.data.clone(),
                    })
                } else {
                    part.text.clone().map(GeneratedPart::Text)
                }
            })
            .collect();

        Ok(parts)
    }
}
