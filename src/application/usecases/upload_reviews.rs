//! 상품 리뷰 일괄 업로드 유스케이스.
//!
//! 1. 입력 검증(상품 ID, 리뷰 목록, 개수/길이 제한)
//! 2. 리뷰별 감성 분석(동시 실행, 입력 순서 유지)
//! 3. 전부 성공했을 때만 한 트랜잭션으로 저장
//! 4. 집계 + 요약 생성

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use crate::application::config::Config;
use crate::application::error::{UseCaseError, UseCaseResult};
use crate::application::ports::{LanguageModel, ReviewStore};
use crate::application::usecases::sentiment::{analyze_text, summarize_counts, validate_review};
use crate::domain::demo::{DEMO_PRODUCT_ID, DEMO_SUMMARY, demo_records};
use crate::domain::record::{ProductId, ReviewAnalysis, StoredReview};
use crate::domain::sentiment::SentimentCounts;

#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub product_id: Option<ProductId>,
    pub reviews: Vec<String>,
    /// true면 LLM/저장소를 거치지 않고 예시 데이터를 반환한다.
    pub is_dummy: bool,
}

#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub product_id: Option<ProductId>,
    pub reviews: Vec<StoredReview>,
    pub counts: SentimentCounts,
    pub summary: String,
}

pub struct UploadReviewsUseCase<'a> {
    pub config: &'a Config,
    pub llm: &'a dyn LanguageModel,
    pub store: &'a dyn ReviewStore,
}

impl UploadReviewsUseCase<'_> {
    pub async fn execute(&self, request: UploadRequest) -> UseCaseResult<UploadOutcome> {
        if request.is_dummy {
            return Ok(dummy_outcome(request.product_id));
        }

        let Some(product_id) = request.product_id else {
            return Err(UseCaseError::invalid("Product ID and reviews are required"));
        };
        if request.reviews.is_empty() {
            return Err(UseCaseError::invalid("Product ID and reviews are required"));
        }

        let max_batch = self.config.max_batch_size();
        if request.reviews.len() > max_batch {
            return Err(UseCaseError::invalid(format!(
                "At most {max_batch} reviews can be uploaded at once"
            )));
        }

        let max_chars = self.config.max_review_chars();
        let texts = request
            .reviews
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                validate_review(Some(raw), max_chars).map_err(|err| match err {
                    UseCaseError::InvalidInput(msg) => {
                        UseCaseError::InvalidInput(format!("Review #{}: {msg}", idx + 1))
                    }
                    other => other,
                })
            })
            .collect::<UseCaseResult<Vec<String>>>()?;

        let llm = self.llm;
        let analyses: Vec<ReviewAnalysis> = stream::iter(texts)
            .map(|text| async move {
                let output = analyze_text(llm, &text).await?;
                Ok::<_, UseCaseError>(ReviewAnalysis::new(text, output))
            })
            .buffered(self.config.batch_concurrency())
            .try_collect()
            .await?;

        let stored = self
            .store
            .insert_many(&product_id, analyses)
            .await
            .map_err(|err| UseCaseError::storage("Failed to store analyzed reviews", err))?;

        let counts = SentimentCounts::tally(stored.iter().map(|r| &r.review.output));
        let summary = summarize_counts(self.llm, &counts).await;

        info!(
            product_id = %product_id,
            reviews = stored.len(),
            positive = counts.positive,
            negative = counts.negative,
            neutral = counts.neutral,
            "uploaded and analyzed reviews"
        );

        Ok(UploadOutcome {
            product_id: Some(product_id),
            reviews: stored,
            counts,
            summary,
        })
    }
}

fn dummy_outcome(product_id: Option<ProductId>) -> UploadOutcome {
    let demo_id = product_id
        .clone()
        .or_else(|| ProductId::parse(DEMO_PRODUCT_ID));
    let reviews: Vec<StoredReview> = demo_id
        .map(|id| demo_records(id).into_iter().take(1).collect())
        .unwrap_or_default();
    let counts = SentimentCounts::tally(reviews.iter().map(|r| &r.review.output));

    UploadOutcome {
        product_id,
        reviews,
        counts,
        summary: DEMO_SUMMARY.to_string(),
    }
}
