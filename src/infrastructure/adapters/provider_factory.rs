//! LLM 포트 구현 팩토리 어댑터.

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{LanguageModel, LanguageModelFactory};
use crate::infrastructure::providers;

/// 설정의 `llm.provider` 값에 맞는 API 어댑터를 만든다.
pub struct ProviderFactoryAdapter;

impl LanguageModelFactory for ProviderFactoryAdapter {
    fn build(&self, config: &Config) -> Result<Box<dyn LanguageModel>> {
        providers::build_provider(config)
    }
}
