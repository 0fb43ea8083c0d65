//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

use crate::application::config::{Config, ProviderKind};
use crate::application::ports::TokenUsage;
use crate::infrastructure::config::resolve_provider_api_key;

const ERROR_BODY_CHARS: usize = 500;

/// Provider 공통 API 접속 정보.
#[derive(Debug, Clone)]
pub(super) struct ApiSettings {
    pub client: Client,
    pub base_url: String,
    pub model: String,
    pub credential: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ApiSettings {
    /// 설정에서 provider 접속 정보를 해석한다. 비활성/키 누락은 오류.
    pub fn from_config(config: &Config, kind: ProviderKind) -> Result<Self> {
        let provider = config.providers.get(kind);
        if provider.is_some_and(|p| !p.is_enabled()) {
            bail!("provider '{}' is disabled in config", kind.id());
        }

        let resolution = resolve_provider_api_key(kind, provider);
        let Some(credential) = resolution.credential else {
            bail!(
                "missing API key for provider '{}' ({})",
                kind.id(),
                resolution.source.unwrap_or_else(|| "not configured".to_string())
            );
        };

        let base_url = provider
            .and_then(|p| p.api_base.clone())
            .unwrap_or_else(|| kind.default_api_base().to_string());
        Url::parse(&base_url)
            .with_context(|| format!("invalid api_base for provider '{}': {base_url}", kind.id()))?;

        Ok(Self {
            client: build_api_client(config.timeout_secs()),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: provider
                .and_then(|p| p.model.clone())
                .unwrap_or_else(|| kind.default_model().to_string()),
            credential,
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
        })
    }
}

/// Provider API 호출용 기본 HTTP 클라이언트를 생성한다.
pub(super) fn build_api_client(timeout_secs: u64) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 전송하고 실패/파싱 오류를 표준화한다.
pub(super) async fn send_json(
    provider_name: &str,
    action: &str,
    request: RequestBuilder,
) -> Result<Value> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{provider_name}: failed to {action}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("{provider_name}: failed to read {action} response body"))?;

    if !status.is_success() {
        let snippet: String = body.chars().take(ERROR_BODY_CHARS).collect();
        bail!("{provider_name}: {action} failed ({status}): {snippet}");
    }

    serde_json::from_str(&body)
        .with_context(|| format!("{provider_name}: invalid JSON response while {action}"))
}

/// API 응답 구조에서 텍스트를 재귀적으로 추출한다.
pub(super) fn collect_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.to_string(),
        Value::Array(items) => items
            .iter()
            .map(collect_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(""),
        Value::Object(map) => {
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                return text.to_string();
            }
            if let Some(message) = map.get("message") {
                let text = collect_text(message);
                if !text.is_empty() {
                    return text;
                }
            }
            if let Some(content) = map.get("content") {
                let text = collect_text(content);
                if !text.is_empty() {
                    return text;
                }
            }
            if let Some(parts) = map.get("parts") {
                return collect_text(parts);
            }
            String::new()
        }
        _ => String::new(),
    }
}

/// 응답 JSON의 사용량 필드를 읽는다. total이 없으면 합산한다.
pub(super) fn usage_from(
    response: &Value,
    prompt_pointer: &str,
    completion_pointer: &str,
    total_pointer: Option<&str>,
) -> TokenUsage {
    let prompt_tokens = response.pointer(prompt_pointer).and_then(Value::as_u64);
    let completion_tokens = response.pointer(completion_pointer).and_then(Value::as_u64);
    let total_tokens = total_pointer
        .and_then(|p| response.pointer(p))
        .and_then(Value::as_u64)
        .or(match (prompt_tokens, completion_tokens) {
            (Some(p), Some(c)) => Some(p + c),
            (Some(p), None) => Some(p),
            (None, Some(c)) => Some(c),
            (None, None) => None,
        });

    TokenUsage {
        prompt_tokens,
        completion_tokens,
        total_tokens,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::config::ProviderConfig;

    #[test]
    fn collects_text_from_nested_message_shapes() {
        let openai = json!({"choices": [{"message": {"content": "hello"}}]});
        assert_eq!(collect_text(&openai["choices"][0]), "hello");

        let anthropic = json!([{"type": "text", "text": "a"}, {"type": "text", "text": "b"}]);
        assert_eq!(collect_text(&anthropic), "ab");

        let gemini = json!({"parts": [{"text": "x"}, {"text": "y"}], "role": "model"});
        assert_eq!(collect_text(&gemini), "xy");
    }

    #[test]
    fn usage_sums_when_total_is_missing() {
        let response = json!({"usage": {"input_tokens": 10, "output_tokens": 5}});
        let usage = usage_from(&response, "/usage/input_tokens", "/usage/output_tokens", None);
        assert_eq!(usage.total_tokens, Some(15));
    }

    #[test]
    fn settings_require_enabled_provider_with_key() {
        let mut config = Config::default();
        config.providers.openai = Some(ProviderConfig {
            enabled: Some(false),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        });
        assert!(ApiSettings::from_config(&config, ProviderKind::OpenAi).is_err());

        config.providers.openai = Some(ProviderConfig {
            api_key: Some("sk-test".to_string()),
            api_base: Some("http://localhost:9999/v1/".to_string()),
            ..Default::default()
        });
        let settings = ApiSettings::from_config(&config, ProviderKind::OpenAi).unwrap();
        assert_eq!(settings.base_url, "http://localhost:9999/v1");
        assert_eq!(settings.model, ProviderKind::OpenAi.default_model());
    }

    #[test]
    fn settings_reject_malformed_base_url() {
        let mut config = Config::default();
        config.providers.anthropic = Some(ProviderConfig {
            api_key: Some("sk-ant-test".to_string()),
            api_base: Some("not a url".to_string()),
            ..Default::default()
        });
        assert!(ApiSettings::from_config(&config, ProviderKind::Anthropic).is_err());
    }
}
