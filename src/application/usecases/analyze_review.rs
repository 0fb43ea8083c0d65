//! 리뷰 1건을 분석만 하고 저장하지 않는 유스케이스.

use tracing::info;

use crate::application::config::Config;
use crate::application::error::UseCaseResult;
use crate::application::ports::LanguageModel;
use crate::application::usecases::sentiment::{analyze_text, validate_review};
use crate::domain::record::ReviewAnalysis;

pub struct AnalyzeReviewUseCase<'a> {
    pub config: &'a Config,
    pub llm: &'a dyn LanguageModel,
}

impl AnalyzeReviewUseCase<'_> {
    pub async fn execute(&self, review: Option<&str>) -> UseCaseResult<ReviewAnalysis> {
        let text = validate_review(review, self.config.max_review_chars())?;
        let output = analyze_text(self.llm, &text).await?;
        info!(chars = text.chars().count(), "analyzed single review");
        Ok(ReviewAnalysis::new(text, output))
    }
}
