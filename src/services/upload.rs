//! Image file reads for element, background, and new-image uploads.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::path::Path;

use editor::upload::{UploadError, image_to_data_uri};
use tracing::debug;

/// Read an image file and encode it as a data URI.
///
/// # Errors
///
/// Returns [`UploadError::Read`] if the file cannot be read, or
/// [`UploadError::UnsupportedImage`] if it is not a PNG or JPEG.
pub async fn read_image(path: &Path) -> Result<String, UploadError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| UploadError::Read { path: path.to_path_buf(), source })?;
    debug!(path = %path.display(), bytes = bytes.len(), "image read");
    image_to_data_uri(&bytes)
}
