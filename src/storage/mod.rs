//! Image uploads for vehicle listings

mod types;

use reqwest::{multipart, Client};
use std::path::Path;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::ensure_success;

pub use types::*;

/// Client for the upload endpoint
#[derive(Debug, Clone)]
pub struct ImageUploader {
    /// The base URL of the deployment
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Client options
    options: ClientOptions,
}

impl ImageUploader {
    /// Create a new ImageUploader
    pub(crate) fn new(url: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client,
            options,
        }
    }

    fn get_url(&self) -> String {
        format!("{}/api/upload", self.url)
    }

    /// Upload an image.
    ///
    /// Without a vehicle id the image is staged under the `temp` key; the gateway
    /// moves staged images when the vehicle is created.
    pub async fn upload(
        &self,
        file_name: &str,
        file_data: Vec<u8>,
        vehicle_id: Option<&str>,
    ) -> Result<UploadedImage, Error> {
        if file_data.is_empty() {
            return Err(Error::validation("No file received"));
        }

        let part = multipart::Part::bytes(file_data)
            .file_name(file_name.to_string())
            .mime_str(content_type_for(file_name))?;
        let mut form = multipart::Form::new().part("file", part);
        if let Some(id) = vehicle_id {
            form = form.text("carId", id.to_string());
        }

        let mut request = self
            .client
            .post(self.get_url())
            .header("X-Client-Info", &self.options.client_info)
            .multipart(form);
        if let Some(timeout) = self.options.request_timeout {
            request = request.timeout(timeout);
        }

        let response = ensure_success(request.send().await?).await.map_err(|e| match e {
            Error::Gateway { status, message } => {
                Error::storage(format!("Upload failed with status {}: {}", status, message))
            }
            other => other,
        })?;
        let uploaded = response.json::<UploadedImage>().await?;

        tracing::debug!(
            url = %uploaded.url,
            staged = uploaded.is_staged(),
            "uploaded image"
        );
        Ok(uploaded)
    }

    /// Upload an image read from disk
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        vehicle_id: Option<&str>,
    ) -> Result<UploadedImage, Error> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let file_data = tokio::fs::read(path).await?;
        self.upload(&file_name, file_data, vehicle_id).await
    }
}
