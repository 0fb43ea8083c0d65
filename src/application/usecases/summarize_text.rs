//! 자유 텍스트 요약 유스케이스.

use tracing::warn;

use crate::application::config::Config;
use crate::application::error::{UseCaseError, UseCaseResult};
use crate::application::ports::LanguageModel;
use crate::application::usecases::sentiment::request_completion;
use crate::domain::completion::{parse_summary, strip_code_fences};
use crate::domain::policy::build_text_summary_prompt;

const SUMMARIZATION_FAILED: &str = "Summarization failed";

pub struct SummarizeTextUseCase<'a> {
    pub config: &'a Config,
    pub llm: &'a dyn LanguageModel,
}

impl SummarizeTextUseCase<'_> {
    pub async fn execute(&self, text: Option<&str>) -> UseCaseResult<String> {
        let text = text.map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(UseCaseError::invalid("Text is required"));
        }
        let limit = self.config.max_text_chars();
        if text.chars().count() > limit {
            return Err(UseCaseError::invalid(format!(
                "Text exceeds {limit} characters"
            )));
        }

        let prompt = build_text_summary_prompt(text);
        let content = request_completion(self.llm, "text_summary", &prompt)
            .await
            .map_err(|err| {
                warn!(error = %format!("{err:#}"), "text summary request failed");
                UseCaseError::upstream(SUMMARIZATION_FAILED, err)
            })?;

        // JSON 지시를 무시하고 평문으로 답한 경우 본문을 그대로 쓴다.
        match parse_summary(&content) {
            Ok(summary) => Ok(summary),
            Err(err) => {
                let plain = strip_code_fences(&content);
                if plain.is_empty() || plain.starts_with('{') {
                    return Err(UseCaseError::upstream(SUMMARIZATION_FAILED, err));
                }
                Ok(plain.to_string())
            }
        }
    }
}
