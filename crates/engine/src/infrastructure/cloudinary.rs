//! Cloudinary asset store client.
//!
//! Publishing pulls the image off the provider's temporary URL and re-uploads
//! it with a signed multipart request, so generated images survive the
//! provider's short-lived links.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::infrastructure::ports::{AssetStorePort, StorageError};

/// Client for Cloudinary's signed upload API.
#[derive(Clone)]
pub struct CloudinaryClient {
    client: Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

impl CloudinaryClient {
    pub fn new(
        base_url: &str,
        cloud_name: &str,
        api_key: &str,
        api_secret: &str,
        folder: &str,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cloud_name: cloud_name.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            folder: folder.to_string(),
        }
    }

    fn upload_endpoint(&self) -> String {
        format!("{}/v1_1/{}/image/upload", self.base_url, self.cloud_name)
    }
}

/// Sign request params the way Cloudinary expects: sort by key, join the
/// `key=value` pairs with `&`, append the API secret, hex-encode the SHA-256.
fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.to_vec();
    sorted.sort_by_key(|(key, _)| *key);

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl AssetStorePort for CloudinaryClient {
    async fn publish(&self, image_url: &str) -> Result<String, StorageError> {
        let source = self
            .client
            .get(image_url)
            .send()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        if !source.status().is_success() {
            return Err(StorageError::DownloadFailed(format!(
                "{} fetching {image_url}",
                source.status()
            )));
        }

        let bytes = source
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[
                ("folder", self.folder.as_str()),
                ("timestamp", timestamp.as_str()),
            ],
            &self.api_secret,
        );

        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::bytes(bytes.to_vec()).file_name("image"),
            )
            .text("folder", self.folder.clone())
            .text("timestamp", timestamp)
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.upload_endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StorageError::UploadFailed(format!(
                "{status}: {error_text}"
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        Ok(uploaded.secure_url)
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}
