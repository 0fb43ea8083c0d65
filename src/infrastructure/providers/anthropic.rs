//! Anthropic messages API 어댑터.

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::config::{Config, ProviderKind};
use crate::application::ports::{Completion, LanguageModel};

use super::api_runner::{ApiSettings, collect_text, send_json, usage_from};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    api: ApiSettings,
}

impl AnthropicProvider {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            api: ApiSettings::from_config(config, ProviderKind::Anthropic)?,
        })
    }
}

fn extract_anthropic_content(response: &Value) -> String {
    if let Some(content) = response.get("content") {
        return collect_text(content);
    }
    String::new()
}

#[async_trait]
impl LanguageModel for AnthropicProvider {
    fn id(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.api.model
    }

    async fn complete(&self, prompt: &str) -> Result<Completion> {
        let endpoint = format!("{}/messages", self.api.base_url);
        let payload = json!({
            "model": self.api.model,
            "max_tokens": self.api.max_tokens,
            "temperature": self.api.temperature,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        // Anthropic API key(sk-ant-...)와 OAuth/Bearer 토큰을 모두 수용한다.
        let request = if self.api.credential.starts_with("sk-ant-") {
            self.api
                .client
                .post(endpoint)
                .header("x-api-key", &self.api.credential)
        } else {
            self.api
                .client
                .post(endpoint)
                .bearer_auth(&self.api.credential)
        };
        let request = request
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload);

        let response = send_json("Claude", "request Anthropic API", request).await?;
        let content = extract_anthropic_content(&response).trim().to_string();
        if content.is_empty() {
            bail!("Claude: empty response content");
        }

        Ok(Completion {
            content,
            usage: usage_from(
                &response,
                "/usage/input_tokens",
                "/usage/output_tokens",
                None,
            ),
        })
    }
}
