//! 호스팅 LLM provider 어댑터 모듈.
//! 각 API(OpenAI/Anthropic/Gemini)를 호출하고 결과/사용량을 표준화한다.

pub mod anthropic;
pub mod gemini;
pub mod openai;
mod api_runner;

use anyhow::{Context, Result};

use crate::application::config::{Config, ProviderKind};
use crate::application::ports::LanguageModel;

/// 설정에서 선택된 provider를 생성한다.
pub fn build_provider(config: &Config) -> Result<Box<dyn LanguageModel>> {
    let kind = config.provider_kind();
    let provider: Result<Box<dyn LanguageModel>> = match kind {
        ProviderKind::OpenAi => {
            openai::OpenAiProvider::from_config(config).map(|p| Box::new(p) as _)
        }
        ProviderKind::Anthropic => {
            anthropic::AnthropicProvider::from_config(config).map(|p| Box::new(p) as _)
        }
        ProviderKind::Gemini => {
            gemini::GeminiProvider::from_config(config).map(|p| Box::new(p) as _)
        }
    };
    provider.with_context(|| format!("failed to configure LLM provider '{}'", kind.id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(provider: &str) -> Config {
        serde_json::from_value(serde_json::json!({
            "llm": { "provider": provider },
            "providers": {
                "openai": { "api_key": "sk-test" },
                "anthropic": { "api_key": "sk-ant-test", "model": "claude-test" },
                "gemini": { "api_key": "AIza-test" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn builds_the_selected_provider() {
        for kind in ProviderKind::ALL {
            let llm = build_provider(&config_for(kind.id())).unwrap();
            assert_eq!(llm.id(), kind.id());
        }
        let llm = build_provider(&config_for("anthropic")).unwrap();
        assert_eq!(llm.model(), "claude-test");
    }

    #[test]
    fn disabled_provider_reports_which_one_failed() {
        let mut config = config_for("gemini");
        if let Some(gemini) = config.providers.gemini.as_mut() {
            gemini.enabled = Some(false);
        }
        let err = build_provider(&config).err().unwrap();
        assert!(format!("{err:#}").contains("failed to configure LLM provider 'gemini'"));
    }
}
