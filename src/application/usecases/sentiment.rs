//! 유스케이스 공용 단계: 모델 호출, 응답 검증, 요약 생성.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::application::error::{UseCaseError, UseCaseResult};
use crate::application::ports::LanguageModel;
use crate::domain::completion::{excerpt, parse_sentiment_result, parse_summary};
use crate::domain::correction::CorrectionKind;
use crate::domain::policy::{
    SUMMARY_FALLBACK, build_analysis_prompt, build_refinement_prompt, build_summary_prompt,
};
use crate::domain::record::ReviewAnalysis;
use crate::domain::sentiment::{SentimentCounts, SentimentResult};

pub(crate) const ANALYSIS_FAILED: &str = "Sentiment analysis failed";
pub(crate) const REFINEMENT_FAILED: &str = "Failed to refine sentiment analysis";

/// 리뷰 본문을 정리하고 길이를 검사한다.
pub(crate) fn validate_review(raw: Option<&str>, max_chars: usize) -> UseCaseResult<String> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(UseCaseError::invalid("Review text is required"));
    }
    if text.chars().count() > max_chars {
        return Err(UseCaseError::invalid(format!(
            "Review text exceeds {max_chars} characters"
        )));
    }
    Ok(text.to_string())
}

/// 프롬프트 1회 호출 후 응답 본문을 반환한다.
pub(crate) async fn request_completion(
    llm: &dyn LanguageModel,
    purpose: &'static str,
    prompt: &str,
) -> Result<String> {
    let started = Instant::now();
    let completion = llm
        .complete(prompt)
        .await
        .with_context(|| format!("{} request failed ({purpose})", llm.id()))?;

    debug!(
        provider = llm.id(),
        model = llm.model(),
        purpose,
        elapsed_ms = started.elapsed().as_millis() as u64,
        total_tokens = ?completion.usage.total_tokens,
        "completion received"
    );
    Ok(completion.content)
}

/// 리뷰 1건을 5개 카테고리로 분석한다.
pub(crate) async fn analyze_text(
    llm: &dyn LanguageModel,
    review_text: &str,
) -> UseCaseResult<SentimentResult> {
    let prompt = build_analysis_prompt(review_text);
    let content = request_completion(llm, "analysis", &prompt)
        .await
        .map_err(|err| {
            warn!(error = %format!("{err:#}"), "sentiment analysis request failed");
            UseCaseError::upstream(ANALYSIS_FAILED, err)
        })?;

    parse_sentiment_result(&content).map_err(|err| {
        warn!(error = %err, raw = %excerpt(&content), "model returned malformed analysis");
        UseCaseError::upstream(ANALYSIS_FAILED, err)
    })
}

/// 보정 지시문과 기존 이력을 반영해 다시 분석한다.
pub(crate) async fn refine_analysis(
    llm: &dyn LanguageModel,
    analysis: &ReviewAnalysis,
    correction: CorrectionKind,
) -> UseCaseResult<SentimentResult> {
    let prompt =
        build_refinement_prompt(&analysis.input, correction, analysis.applied_corrections());
    let content = request_completion(llm, "refinement", &prompt)
        .await
        .map_err(|err| {
            warn!(error = %format!("{err:#}"), %correction, "refinement request failed");
            UseCaseError::upstream(REFINEMENT_FAILED, err)
        })?;

    parse_sentiment_result(&content).map_err(|err| {
        warn!(error = %err, raw = %excerpt(&content), %correction, "model returned malformed refinement");
        UseCaseError::upstream(REFINEMENT_FAILED, err)
    })
}

/// 집계 기반 요약을 생성한다. 실패해도 요청 전체를 실패시키지 않고 폴백 문구를 쓴다.
pub(crate) async fn summarize_counts(llm: &dyn LanguageModel, counts: &SentimentCounts) -> String {
    let prompt = build_summary_prompt(counts);
    let content = match request_completion(llm, "summary", &prompt).await {
        Ok(content) => content,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "summary request failed");
            return SUMMARY_FALLBACK.to_string();
        }
    };

    match parse_summary(&content) {
        Ok(summary) => summary,
        Err(err) => {
            warn!(error = %err, raw = %excerpt(&content), "model returned malformed summary");
            SUMMARY_FALLBACK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_must_be_present_and_bounded() {
        assert!(matches!(
            validate_review(None, 10),
            Err(UseCaseError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_review(Some("   "), 10),
            Err(UseCaseError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_review(Some("this one is too long"), 10),
            Err(UseCaseError::InvalidInput(_))
        ));
        assert_eq!(validate_review(Some("  fine  "), 10).unwrap(), "fine");
    }
}
