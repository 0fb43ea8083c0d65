//! Google Gemini generateContent 어댑터.

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::{Value, json};
use url::Url;

use crate::application::config::{Config, ProviderKind};
use crate::application::ports::{Completion, LanguageModel};

use super::api_runner::{ApiSettings, collect_text, send_json, usage_from};

pub struct GeminiProvider {
    api: ApiSettings,
}

impl GeminiProvider {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            api: ApiSettings::from_config(config, ProviderKind::Gemini)?,
        })
    }
}

fn extract_gemini_content(response: &Value) -> String {
    if let Some(content) = response.pointer("/candidates/0/content") {
        return collect_text(content);
    }
    String::new()
}

#[async_trait]
impl LanguageModel for GeminiProvider {
    fn id(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.api.model
    }

    async fn complete(&self, prompt: &str) -> Result<Completion> {
        let endpoint = format!(
            "{}/models/{}:generateContent",
            self.api.base_url, self.api.model
        );
        let payload = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        { "text": prompt }
                    ]
                }
            ],
            "generationConfig": {
                "temperature": self.api.temperature,
                "maxOutputTokens": self.api.max_tokens
            }
        });

        // Gemini는 API key(query) 또는 OAuth(Bearer) 방식 모두 허용한다.
        let request = if self.api.credential.starts_with("AIza") {
            let mut url = Url::parse(&endpoint)?;
            url.query_pairs_mut().append_pair("key", &self.api.credential);
            self.api.client.post(url).json(&payload)
        } else {
            self.api
                .client
                .post(endpoint)
                .bearer_auth(&self.api.credential)
                .json(&payload)
        };

        let response = send_json("Gemini", "request Gemini API", request).await?;
        let content = extract_gemini_content(&response).trim().to_string();
        if content.is_empty() {
            bail!("Gemini: empty response content");
        }

        Ok(Completion {
            content,
            usage: usage_from(
                &response,
                "/usageMetadata/promptTokenCount",
                "/usageMetadata/candidatesTokenCount",
                Some("/usageMetadata/totalTokenCount"),
            ),
        })
    }
}
