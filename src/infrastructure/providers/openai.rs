//! OpenAI chat completions 어댑터.

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::config::{Config, ProviderKind};
use crate::application::ports::{Completion, LanguageModel};

use super::api_runner::{ApiSettings, collect_text, send_json, usage_from};

pub struct OpenAiProvider {
    api: ApiSettings,
}

impl OpenAiProvider {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            api: ApiSettings::from_config(config, ProviderKind::OpenAi)?,
        })
    }

    fn payload(&self, prompt: &str) -> Value {
        json!({
            "model": self.api.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "temperature": self.api.temperature,
            "max_tokens": self.api.max_tokens,
        })
    }
}

fn extract_openai_content(response: &Value) -> String {
    if let Some(message) = response.pointer("/choices/0/message") {
        return collect_text(message);
    }
    String::new()
}

#[async_trait]
impl LanguageModel for OpenAiProvider {
    fn id(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.api.model
    }

    async fn complete(&self, prompt: &str) -> Result<Completion> {
        let endpoint = format!("{}/chat/completions", self.api.base_url);
        let request = self
            .api
            .client
            .post(endpoint)
            .bearer_auth(&self.api.credential)
            .json(&self.payload(prompt));

        let response = send_json("OpenAI", "request chat completion", request).await?;
        let content = extract_openai_content(&response).trim().to_string();
        if content.is_empty() {
            bail!("OpenAI: empty response content");
        }

        Ok(Completion {
            content,
            usage: usage_from(
                &response,
                "/usage/prompt_tokens",
                "/usage/completion_tokens",
                Some("/usage/total_tokens"),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::ProviderConfig;

    #[test]
    fn payload_carries_model_temperature_and_token_limit() {
        let mut config = Config::default();
        config.llm.temperature = Some(0.2);
        config.llm.max_tokens = Some(300);
        config.providers.openai = Some(ProviderConfig {
            api_key: Some("sk-test".to_string()),
            model: Some("gpt-4o-mini".to_string()),
            ..Default::default()
        });

        let provider = OpenAiProvider::from_config(&config).unwrap();
        let payload = provider.payload("hi");

        assert_eq!(payload["model"], "gpt-4o-mini");
        assert_eq!(payload["messages"][0]["content"], "hi");
        assert_eq!(payload["max_tokens"], 300);
        assert!((payload["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn extracts_first_choice_text() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"summary\": \"ok\"}"}}]
        });
        assert_eq!(extract_openai_content(&response), "{\"summary\": \"ok\"}");
    }
}
