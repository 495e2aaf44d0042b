//! Content-type validation for uploaded source images.

use crate::error::CoreError;

/// JPEG content type forwarded to the generation API.
pub const MIME_JPEG: &str = "image/jpeg";
/// PNG content type forwarded to the generation API.
pub const MIME_PNG: &str = "image/png";

/// Content types accepted from the source-image fetch.
const ACCEPTED: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// Validate and normalize a source image's `content-type` header.
///
/// The base type is extracted (parameters such as `charset` stripped),
/// compared case-insensitively against the accepted set, and `image/jpg`
/// is normalized to `image/jpeg` before being forwarded. A missing or
/// unacceptable header is a [`CoreError::Validation`].
pub fn validate_image_content_type(raw: Option<&str>) -> Result<String, CoreError> {
    let base = raw
        .unwrap_or("")
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if !ACCEPTED.contains(&base.as_str()) {
        return Err(CoreError::Validation(
            "Uploaded file must be a JPEG or PNG image".to_string(),
        ));
    }

    if base == "image/jpg" {
        Ok(MIME_JPEG.to_string())
    } else {
        Ok(base)
    }
}
