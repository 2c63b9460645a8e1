//! Republish an already-generated image to durable storage.

use std::sync::Arc;

use crate::infrastructure::ports::{AssetStorePort, StorageError};

pub struct PublishImage {
    assets: Arc<dyn AssetStorePort>,
}

impl PublishImage {
    pub fn new(assets: Arc<dyn AssetStorePort>) -> Self {
        Self { assets }
    }

    /// Upload the image behind `image_url` and return the durable URL.
    pub async fn execute(&self, image_url: &str) -> Result<String, PublishError> {
        let published_url = self.assets.publish(image_url).await?;
        Ok(published_url)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Publishing failed: {0}")]
    Storage(#[from] StorageError),
}
