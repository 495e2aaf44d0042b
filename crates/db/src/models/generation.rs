//! Generation record models and DTOs.
//!
//! Defines the database row struct for `generations` and the wire types
//! used by the API layer. Wire types serialize camelCase (`imageUrl`,
//! `generationId`) -- those names are the request/response contract.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sceneshot_core::types::Timestamp;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An immutable generation record row from the `generations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub id: String,
    pub user_id: String,
    pub original_image_url: String,
    /// JSON array of [`GeneratedImage`] entries.
    pub images: serde_json::Value,
    pub status: String,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a new generation record.
#[derive(Debug, Clone)]
pub struct CreateGeneration {
    pub id: String,
    pub user_id: String,
    pub original_image_url: String,
    /// JSON array of [`GeneratedImage`] entries.
    pub images: serde_json::Value,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// One successfully generated scene image.
///
/// Carries `path` for access-controlled assets or `url` for public
/// ones, depending on the visibility policy in force; never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub scene: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl GeneratedImage {
    /// An access-controlled asset recorded by its storage path.
    pub fn at_path(scene: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            path: Some(path.into()),
            url: None,
        }
    }

    /// A public asset recorded by its URL.
    pub fn at_url(scene: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            path: None,
            url: Some(url.into()),
        }
    }

    /// The recorded location, whichever form it takes.
    pub fn location(&self) -> &str {
        self.path
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or_default()
    }
}

/// Request body for `POST /generations`.
///
/// Fields are optional at the serde level so that absence surfaces as a
/// validation failure rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScenesRequest {
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    #[serde(default)]
    pub scene_ids: Option<Vec<String>>,
}

/// Response body for `POST /generations`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScenesResponse {
    pub success: bool,
    pub generation_id: String,
    pub images: Vec<GeneratedImage>,
}
