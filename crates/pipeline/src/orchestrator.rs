//! The scene-generation orchestrator.
//!
//! One invocation validates the request, fetches the caller's source
//! image, runs the sequential per-scene generation loop, uploads each
//! success to the object store, and writes a single generation record.
//! A scene failure never aborts the batch; it only reduces the final
//! image count. Zero successes abort with an internal error and
//! persist nothing.

use std::sync::Arc;

use sceneshot_core::error::CoreError;
use sceneshot_core::scene::{Scene, SceneCatalog};
use sceneshot_core::{generation, mime, paths, prompt};
use sceneshot_db::models::generation::{
    CreateGeneration, GeneratedImage, GenerateScenesRequest, GenerateScenesResponse,
};
use sceneshot_storage::{AssetVisibility, ObjectStore, StorageError};

use crate::collaborators::{
    FetchError, GeneratedPart, GeneratorError, ImageGenerator, RecordStore, SourceImageFetcher,
};

/// One failed scene attempt. Logged and suppressed by the loop.
#[derive(Debug, thiserror::Error)]
enum SceneAttemptError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Drives one generation request end to end.
///
/// Holds read-only handles to the collaborators and the scene catalog;
/// a single instance is built at startup and shared across requests.
pub struct Orchestrator {
    catalog: SceneCatalog,
    fetcher: Arc<dyn SourceImageFetcher>,
    /// `None` when the generation API credential is not configured.
    generator: Option<Arc<dyn ImageGenerator>>,
    store: Arc<dyn ObjectStore>,
    records: Arc<dyn RecordStore>,
    visibility: AssetVisibility,
}

impl Orchestrator {
    pub fn new(
        catalog: SceneCatalog,
        fetcher: Arc<dyn SourceImageFetcher>,
        generator: Option<Arc<dyn ImageGenerator>>,
        store: Arc<dyn ObjectStore>,
        records: Arc<dyn RecordStore>,
        visibility: AssetVisibility,
    ) -> Self {
        Self {
            catalog,
            fetcher,
            generator,
            store,
            records,
            visibility,
        }
    }

    /// The scene catalog this orchestrator generates from.
    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    /// Process one generation request for an authenticated caller.
    ///
    /// Validation failures (identity, fields, namespace, scene
    /// selection, source content type) abort before any generation
    /// call. Per-scene failures are logged and skipped. The record is
    /// written exactly once, only when at least one scene succeeded.
    pub async fn generate(
        &self,
        request: &GenerateScenesRequest,
        identity: &str,
    ) -> Result<GenerateScenesResponse, CoreError> {
        if identity.is_empty() {
            return Err(CoreError::Unauthorized(
                "Must be authenticated to generate scenes".to_string(),
            ));
        }

        let image_url = required_field(request.image_url.as_deref())?;
        let image_path = required_field(request.image_path.as_deref())?;

        paths::ensure_caller_owns_path(identity, image_path)?;

        let scenes = self.catalog.resolve(request.scene_ids.as_deref())?;

        let generator = self.generator.as_deref().ok_or_else(|| {
            tracing::error!("Generation API credential is not configured");
            CoreError::Internal("AI service not configured".to_string())
        })?;

        let source = self.fetcher.fetch(image_url).await.map_err(|e| match e {
            FetchError::Status(status) => {
                tracing::warn!(status, url = image_url, "Source image fetch was refused");
                CoreError::NotFound {
                    entity: "SourceImage",
                    id: image_url.to_string(),
                }
            }
            FetchError::Transport(msg) => {
                tracing::error!(error = %msg, url = image_url, "Source image fetch failed");
                CoreError::Internal("Failed to fetch the original image".to_string())
            }
        })?;

        let mime_type = mime::validate_image_content_type(source.content_type.as_deref())?;

        let generation_id = generation::new_generation_id();
        let mut images: Vec<GeneratedImage> = Vec::with_capacity(scenes.len());

        for scene in scenes {
            let attempt = self
                .generate_scene(generator, identity, &generation_id, scene, &source.bytes, &mime_type)
                .await;
            match attempt {
                Ok(Some(image)) => {
                    tracing::info!(scene = scene.id, location = image.location(), "Scene generated");
                    images.push(image);
                }
                Ok(None) => {
                    tracing::warn!(scene = scene.id, "Generation response carried no image data");
                }
                Err(err) => {
                    // One scene failing must not abort the batch.
                    tracing::error!(scene = scene.id, error = %err, "Scene generation failed");
                }
            }
        }

        if images.is_empty() {
            return Err(CoreError::Internal(
                "Failed to generate images. The AI model may be unavailable".to_string(),
            ));
        }

        let record = CreateGeneration {
            id: generation_id.clone(),
            user_id: identity.to_string(),
            original_image_url: image_url.to_string(),
            images: serde_json::to_value(&images)
                .map_err(|e| CoreError::Internal(format!("Failed to encode image list: {e}")))?,
            status: generation::STATUS_COMPLETED.to_string(),
        };
        self.records.create(record).await.map_err(|e| {
            tracing::error!(generation_id = %generation_id, error = %e, "Record write failed");
            CoreError::Internal("Failed to record the generation".to_string())
        })?;

        tracing::info!(
            generation_id = %generation_id,
            images = images.len(),
            "Generation completed"
        );

        Ok(GenerateScenesResponse {
            success: true,
            generation_id,
            images,
        })
    }

    /// Attempt one scene: build the prompt, call the generator, take the
    /// first inline image part, and upload it under the caller's
    /// namespace. `Ok(None)` means the model returned no image data.
    async fn generate_scene(
        &self,
        generator: &dyn ImageGenerator,
        identity: &str,
        generation_id: &str,
        scene: &Scene,
        source: &[u8],
        mime_type: &str,
    ) -> Result<Option<GeneratedImage>, SceneAttemptError> {
        let prompt = prompt::build_prompt(scene);
        let parts = generator.generate(source, mime_type, &prompt).await?;

        let image = parts.into_iter().find_map(|part| match part {
            GeneratedPart::Image { mime_type, bytes } if !bytes.is_empty() => {
                Some((mime_type, bytes))
            }
            _ => None,
        });
        let Some((image_mime, bytes)) = image else {
            return Ok(None);
        };

        let path = paths::generated_image_path(identity, generation_id, scene.id);
        let content_type = if image_mime.is_empty() {
            mime::MIME_PNG.to_string()
        } else {
            image_mime
        };
        self.store.put(&path, bytes, &content_type).await?;

        let entry = match self.visibility {
            AssetVisibility::Private => GeneratedImage::at_path(scene.id, path),
            AssetVisibility::Public => {
                let url = self.store.make_public(&path).await?;
                GeneratedImage::at_url(scene.id, url)
            }
        };
        Ok(Some(entry))
    }
}

/// Treat a missing or empty request field as a validation failure.
fn required_field(value: Option<&str>) -> Result<&str, CoreError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::Validation("imageUrl and imagePath are required".to_string()))
}
