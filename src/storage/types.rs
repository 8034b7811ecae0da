//! Types for image uploads

use serde::{Deserialize, Serialize};

/// Folder key for uploads made before their vehicle exists
pub const STAGING_KEY: &str = "temp";

/// Upload response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Relative URL of the stored image, e.g. `/cars/temp/<uuid>.jpg`
    pub url: String,
}

impl UploadedImage {
    /// Whether the image still sits in the staging folder
    pub fn is_staged(&self) -> bool {
        is_staged(&self.url)
    }
}

/// Whether a relative image URL points into the staging folder
pub fn is_staged(url: &str) -> bool {
    url.trim_start_matches('/')
        .strip_prefix("cars/")
        .and_then(|rest| rest.split('/').next())
        .map_or(false, |key| key == STAGING_KEY)
}

/// Guess an image content type from a file name
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}
