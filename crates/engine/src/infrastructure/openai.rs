//! OpenAI-compatible provider client.
//!
//! One client implements both provider ports: prompt refinement through the
//! chat completions endpoint and image generation through the image
//! generations endpoint. Any server speaking the OpenAI wire format works;
//! only the base URL and model names change.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{ImageGenError, ImageGenPort, LlmError, PromptRefinerPort};

/// Instruction for the refinement call. The provider rewrites the user's
/// prompt with visual detail but must keep the core idea and stay short.
const REFINE_SYSTEM_PROMPT: &str = "You are an expert at writing prompts for AI image \
generation. Enhance the user's prompt with concrete details about style, lighting, \
composition, and mood while keeping the core idea intact. Keep it to 2-3 sentences at most \
and reply with the improved prompt only.";

/// Client for an OpenAI-compatible chat + image API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    image_model: String,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: &str, chat_model: &str, image_model: &str) -> Self {
        // Image generation is slow; allow up to 2 minutes per request.
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            chat_model: chat_model.to_string(),
            image_model: image_model.to_string(),
        }
    }
}

#[async_trait]
impl PromptRefinerPort for OpenAiClient {
    async fn refine(&self, prompt: &str) -> Result<String, LlmError> {
        let api_request = ChatRequest {
            model: self.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: REFINE_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Enhance this image generation prompt: {prompt}"),
                },
            ],
            max_tokens: 150,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed(format!("{status}: {error_text}")));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::InvalidResponse(
                "chat completion had no content".to_string(),
            ));
        }

        Ok(content)
    }
}

#[async_trait]
impl ImageGenPort for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenError> {
        let api_request = ImageGenerationRequest {
            model: self.image_model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
        };

        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ImageGenError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ImageGenError::RequestFailed(format!(
                "{status}: {error_text}"
            )));
        }

        let api_response: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| ImageGenError::RequestFailed(e.to_string()))?;

        api_response
            .data
            .into_iter()
            .next()
            .and_then(|item| item.url)
            .ok_or_else(|| ImageGenError::NoImage("response carried no image URL".to_string()))
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    n: u8,
    size: String,
    quality: String,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageGenerationItem>,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationItem {
    url: Option<String>,
}
