//! Storage path conventions and per-caller namespace enforcement.
//!
//! Every caller owns the `users/{identity}/` prefix of the object store.
//! The ownership check is textual only -- it asserts the path sits inside
//! the caller's namespace, not that the object exists.

use crate::error::CoreError;

/// The object-store namespace owned by a caller.
pub fn user_namespace(identity: &str) -> String {
    format!("users/{identity}/")
}

/// Ensure a source-image path lies inside the caller's namespace.
///
/// Fails with [`CoreError::Forbidden`] when the path points outside
/// `users/{identity}/`.
pub fn ensure_caller_owns_path(identity: &str, path: &str) -> Result<(), CoreError> {
    if path.starts_with(&user_namespace(identity)) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You can only process your own images".to_string(),
        ))
    }
}

/// Object-store path for one generated scene image.
///
/// Layout: `users/{identity}/generated/{generation_id}/{scene_id}.png`.
pub fn generated_image_path(identity: &str, generation_id: &str, scene_id: &str) -> String {
    format!("users/{identity}/generated/{generation_id}/{scene_id}.png")
}
