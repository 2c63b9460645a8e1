//! Prompt-to-image generation use cases.

mod generate_image;
mod publish_image;

pub use generate_image::{GenerateError, GenerateImage};
pub use publish_image::{PublishError, PublishImage};

use std::sync::Arc;

/// Container for generation use cases.
pub struct GenerationUseCases {
    pub generate: Arc<GenerateImage>,
    pub publish: Arc<PublishImage>,
}

impl GenerationUseCases {
    pub fn new(generate: Arc<GenerateImage>, publish: Arc<PublishImage>) -> Self {
        Self { generate, publish }
    }
}
