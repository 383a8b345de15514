// AI proxy client
// Author: kelexine (https://github.com/kelexine)

use crate::config::UpstreamConfig;
use crate::error::{GatewayError, Result};
use crate::metrics;
use crate::upstream::models::{
    AnalysisResponse, ChatMessage, ChatReply, ChatRequest, ContentBlock, ImageUrl,
};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Prompt sent alongside every image analysis request.
const IMAGE_PROMPT: &str = "What's in this image?";

/// Client for the external AI proxy endpoint.
///
/// Sends chat and image analysis requests under the proxy's contract. No
/// retries and no streaming: a failed call surfaces to the handler as-is.
pub struct AssistantClient {
    http_client: Client,
    config: UpstreamConfig,
}

impl AssistantClient {
    /// Create a new client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Send a screened chat message and return the assistant's reply.
    pub async fn send_chat(&self, user_message: &str) -> Result<String> {
        let request = ChatRequest {
            model: None,
            messages: vec![
                ChatMessage::system(&self.config.system_prompt),
                ChatMessage::user(user_message),
            ],
        };

        let (status, body) = self.post(&request).await?;
        metrics::record_upstream_request("chat", status);

        let reply: ChatReply = serde_json::from_str(&body).map_err(|e| {
            error!("Unparseable chat response: {}", e);
            GatewayError::Upstream(format!("unparseable response: {}", e))
        })?;

        if status < 400 {
            if let Some(text) = reply.reply {
                debug!("Chat reply received ({} chars)", text.len());
                return Ok(text);
            }
        }

        Err(GatewayError::Upstream(
            reply.error.unwrap_or_else(|| "No reply received".to_string()),
        ))
    }

    /// Send an image (as a data URL) for analysis and return the
    /// description text.
    pub async fn analyze_image(&self, data_url: &str) -> Result<String> {
        let request = ChatRequest {
            model: Some(self.config.vision_model.clone()),
            messages: vec![ChatMessage::user_blocks(vec![
                ContentBlock::Text {
                    text: IMAGE_PROMPT.to_string(),
                },
                ContentBlock::ImageUrl {
                    image_url: ImageUrl {
                        url: data_url.to_string(),
                        detail: Some("high".to_string()),
                    },
                },
            ])],
        };

        let (status, body) = self.post(&request).await?;
        metrics::record_upstream_request("image", status);

        if status >= 400 {
            error!("Image analysis failed with {}: {}", status, body);
            return Err(GatewayError::Upstream(format!(
                "image analysis failed with status {}",
                status
            )));
        }

        let analysis: AnalysisResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Upstream(format!("unparseable response: {}", e)))?;

        analysis
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::Upstream("response carried no choices".to_string()))
    }

    async fn post(&self, request: &ChatRequest) -> Result<(u16, String)> {
        let mut builder = self
            .http_client
            .post(&self.config.api_url)
            .header("Content-Type", "application/json")
            .json(request);

        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok((status, body))
    }
}
