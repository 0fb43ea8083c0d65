//! 저장된 분석 결과를 카탈로그 지시문으로 보정하는 유스케이스.

use tracing::{info, warn};

use crate::application::error::{UseCaseError, UseCaseResult};
use crate::application::ports::{LanguageModel, ReviewStore, UpdateOutcome};
use crate::application::usecases::sentiment::refine_analysis;
use crate::domain::correction::CorrectionKind;
use crate::domain::record::StoredReview;

const INVALID_REQUEST: &str = "Invalid review ID or correction type";
const NOT_FOUND: &str = "Review not found";
const CONFLICT: &str = "Review was corrected concurrently, retry the correction";

pub struct CorrectAnalysisUseCase<'a> {
    pub llm: &'a dyn LanguageModel,
    pub store: &'a dyn ReviewStore,
}

impl CorrectAnalysisUseCase<'_> {
    /// 보정 결과를 현재 결과로 반영하고 이력에 추가한 레코드를 반환한다.
    /// 모델 호출이 실패하면 레코드는 변경되지 않는다.
    pub async fn execute(
        &self,
        review_id: Option<&str>,
        correction_type: Option<&str>,
    ) -> UseCaseResult<StoredReview> {
        let review_id = review_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| UseCaseError::invalid(INVALID_REQUEST))?;
        let correction: CorrectionKind = correction_type
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| UseCaseError::invalid(INVALID_REQUEST))?;

        let mut record = self
            .store
            .find(review_id)
            .await
            .map_err(|err| UseCaseError::storage("Failed to load review", err))?
            .ok_or_else(|| UseCaseError::NotFound(NOT_FOUND.to_string()))?;

        let refined = refine_analysis(self.llm, &record.review, correction).await?;
        record.review.apply_correction(correction, refined);

        let outcome = self
            .store
            .update_analysis(review_id, &record.review, record.updated_at)
            .await
            .map_err(|err| UseCaseError::storage("Failed to store corrected analysis", err))?;
        let updated = match outcome {
            UpdateOutcome::Updated(updated) => updated,
            UpdateOutcome::NotFound => return Err(UseCaseError::NotFound(NOT_FOUND.to_string())),
            UpdateOutcome::Conflict => {
                warn!(review_id, %correction, "review changed while refining, correction dropped");
                return Err(UseCaseError::Conflict(CONFLICT.to_string()));
            }
        };

        info!(
            review_id,
            %correction,
            history = updated.review.history.len(),
            "applied analysis correction"
        );
        Ok(updated)
    }
}
