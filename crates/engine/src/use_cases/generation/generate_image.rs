//! Generate an image from a prompt, with optional refinement and publishing.

use std::sync::Arc;

use atelier_domain::GeneratedImage;

use crate::infrastructure::ports::{
    AssetStorePort, ClockPort, ImageGenError, ImageGenPort, PromptRefinerPort, StorageError,
};

/// Runs the refiner -> generator -> publisher pipeline for one prompt.
pub struct GenerateImage {
    refiner: Arc<dyn PromptRefinerPort>,
    generator: Arc<dyn ImageGenPort>,
    assets: Arc<dyn AssetStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl GenerateImage {
    pub fn new(
        refiner: Arc<dyn PromptRefinerPort>,
        generator: Arc<dyn ImageGenPort>,
        assets: Arc<dyn AssetStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            refiner,
            generator,
            assets,
            clock,
        }
    }

    /// Refinement is best-effort: any refiner failure (including empty
    /// output) falls back to the original prompt with a warn log.
    /// Generation and publishing failures fail the whole operation.
    pub async fn execute(
        &self,
        prompt: &str,
        refine: bool,
        skip_publish: bool,
    ) -> Result<GeneratedImage, GenerateError> {
        let refined_prompt = if refine {
            match self.refiner.refine(prompt).await {
                Ok(refined) if !refined.trim().is_empty() => Some(refined),
                Ok(_) => {
                    tracing::warn!("Refiner returned empty text, using original prompt");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Prompt refinement failed, using original prompt");
                    None
                }
            }
        } else {
            None
        };

        let generation_prompt = refined_prompt.as_deref().unwrap_or(prompt);
        let remote_url = self.generator.generate(generation_prompt).await?;

        let image_url = if skip_publish {
            remote_url
        } else {
            self.assets.publish(&remote_url).await?
        };

        Ok(GeneratedImage {
            image_url,
            prompt: prompt.to_string(),
            refined_prompt,
            created_at: self.clock.now(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Image generation failed: {0}")]
    Generation(#[from] ImageGenError),

    #[error("Publishing failed: {0}")]
    Publish(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{
        LlmError, MockAssetStorePort, MockImageGenPort, MockPromptRefinerPort,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use mockall::predicate::eq;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn use_case(
        refiner: MockPromptRefinerPort,
        generator: MockImageGenPort,
        assets: MockAssetStorePort,
    ) -> GenerateImage {
        GenerateImage::new(
            Arc::new(refiner),
            Arc::new(generator),
            Arc::new(assets),
            Arc::new(FixedClock(fixed_now())),
        )
    }

    #[tokio::test]
    async fn refiner_failure_falls_back_to_the_original_prompt() {
        let mut refiner = MockPromptRefinerPort::new();
        refiner
            .expect_refine()
            .with(eq("a dog"))
            .returning(|_| Err(LlmError::RequestFailed("provider down".to_string())));

        let mut generator = MockImageGenPort::new();
        generator
            .expect_generate()
            .with(eq("a dog"))
            .returning(|_| Ok("https://provider.example/dog.png".to_string()));

        let result = use_case(refiner, generator, MockAssetStorePort::new())
            .execute("a dog", true, true)
            .await
            .unwrap();

        assert_eq!(result.image_url, "https://provider.example/dog.png");
        assert_eq!(result.prompt, "a dog");
        assert!(result.refined_prompt.is_none());
        assert_eq!(result.created_at, fixed_now());
    }

    #[tokio::test]
    async fn empty_refiner_output_counts_as_failure() {
        let mut refiner = MockPromptRefinerPort::new();
        refiner
            .expect_refine()
            .returning(|_| Ok("   ".to_string()));

        let mut generator = MockImageGenPort::new();
        generator
            .expect_generate()
            .with(eq("a dog"))
            .returning(|_| Ok("https://provider.example/dog.png".to_string()));

        let result = use_case(refiner, generator, MockAssetStorePort::new())
            .execute("a dog", true, true)
            .await
            .unwrap();

        assert!(result.refined_prompt.is_none());
    }

    #[tokio::test]
    async fn successful_refinement_feeds_the_generator() {
        let mut refiner = MockPromptRefinerPort::new();
        refiner
            .expect_refine()
            .with(eq("a dog"))
            .returning(|_| Ok("a golden retriever at sunset".to_string()));

        let mut generator = MockImageGenPort::new();
        generator
            .expect_generate()
            .with(eq("a golden retriever at sunset"))
            .returning(|_| Ok("https://provider.example/dog.png".to_string()));

        let result = use_case(refiner, generator, MockAssetStorePort::new())
            .execute("a dog", true, true)
            .await
            .unwrap();

        // The response keeps the original prompt alongside the refined one.
        assert_eq!(result.prompt, "a dog");
        assert_eq!(
            result.refined_prompt.as_deref(),
            Some("a golden retriever at sunset")
        );
    }

    #[tokio::test]
    async fn refinement_is_skipped_when_not_requested() {
        // No refiner expectation: a call would panic.
        let refiner = MockPromptRefinerPort::new();

        let mut generator = MockImageGenPort::new();
        generator
            .expect_generate()
            .with(eq("a dog"))
            .returning(|_| Ok("https://provider.example/dog.png".to_string()));

        let result = use_case(refiner, generator, MockAssetStorePort::new())
            .execute("a dog", false, true)
            .await
            .unwrap();

        assert!(result.refined_prompt.is_none());
    }

    #[tokio::test]
    async fn publishes_to_durable_storage_unless_skipped() {
        let refiner = MockPromptRefinerPort::new();

        let mut generator = MockImageGenPort::new();
        generator
            .expect_generate()
            .returning(|_| Ok("https://provider.example/dog.png".to_string()));

        let mut assets = MockAssetStorePort::new();
        assets
            .expect_publish()
            .with(eq("https://provider.example/dog.png"))
            .returning(|_| Ok("https://cdn.example/dog.png".to_string()));

        let result = use_case(refiner, generator, assets)
            .execute("a dog", false, false)
            .await
            .unwrap();

        assert_eq!(result.image_url, "https://cdn.example/dog.png");
    }

    #[tokio::test]
    async fn generator_failure_fails_the_operation() {
        let refiner = MockPromptRefinerPort::new();

        let mut generator = MockImageGenPort::new();
        generator
            .expect_generate()
            .returning(|_| Err(ImageGenError::NoImage("empty data".to_string())));

        let err = use_case(refiner, generator, MockAssetStorePort::new())
            .execute("a dog", false, true)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::Generation(_)));
    }

    #[tokio::test]
    async fn publish_failure_fails_the_operation() {
        let refiner = MockPromptRefinerPort::new();

        let mut generator = MockImageGenPort::new();
        generator
            .expect_generate()
            .returning(|_| Ok("https://provider.example/dog.png".to_string()));

        let mut assets = MockAssetStorePort::new();
        assets
            .expect_publish()
            .returning(|_| Err(StorageError::UploadFailed("quota".to_string())));

        let err = use_case(refiner, generator, assets)
            .execute("a dog", false, false)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::Publish(_)));
    }
}
