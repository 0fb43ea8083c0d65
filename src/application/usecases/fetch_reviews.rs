//! 상품별 저장 레코드 조회 + 집계 요약 유스케이스.

use tracing::info;

use crate::application::error::{UseCaseError, UseCaseResult};
use crate::application::ports::{LanguageModel, ReviewStore};
use crate::application::usecases::sentiment::summarize_counts;
use crate::domain::demo::{DEMO_PRODUCT_ID, DEMO_SUMMARY, demo_records};
use crate::domain::record::{ProductId, StoredReview};
use crate::domain::sentiment::SentimentCounts;

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub product_id: ProductId,
    pub reviews: Vec<StoredReview>,
    pub counts: SentimentCounts,
    /// 레코드가 없으면 `None`(모델 호출 없음)
    pub summary: Option<String>,
}

pub struct FetchReviewsUseCase<'a> {
    pub llm: &'a dyn LanguageModel,
    pub store: &'a dyn ReviewStore,
}

impl FetchReviewsUseCase<'_> {
    pub async fn execute(&self, product_id: Option<&str>) -> UseCaseResult<FetchOutcome> {
        let product_id = product_id
            .and_then(ProductId::parse)
            .ok_or_else(|| UseCaseError::invalid("Product ID is required"))?;

        if product_id.as_str() == DEMO_PRODUCT_ID {
            let reviews = demo_records(product_id.clone());
            let counts = SentimentCounts::tally(reviews.iter().map(|r| &r.review.output));
            return Ok(FetchOutcome {
                product_id,
                reviews,
                counts,
                summary: Some(DEMO_SUMMARY.to_string()),
            });
        }

        let reviews = self
            .store
            .list_by_product(&product_id)
            .await
            .map_err(|err| UseCaseError::storage("Failed to fetch reviews", err))?;

        let counts = SentimentCounts::tally(reviews.iter().map(|r| &r.review.output));
        let summary = if reviews.is_empty() {
            None
        } else {
            Some(summarize_counts(self.llm, &counts).await)
        };

        info!(product_id = %product_id, reviews = reviews.len(), "fetched product reviews");
        Ok(FetchOutcome {
            product_id,
            reviews,
            counts,
            summary,
        })
    }
}
