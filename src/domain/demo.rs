//! 프런트엔드 연동 확인용 고정 예시 데이터.
//! LLM/저장소를 거치지 않고 동일한 응답 형태를 돌려줄 때 사용한다.

use chrono::{DateTime, Utc};

use crate::domain::record::{ProductId, ReviewAnalysis, StoredReview};
use crate::domain::sentiment::{CategoryInsight, Sentiment, SentimentResult};

/// 예시 조회에 사용하는 예약 상품 ID.
pub const DEMO_PRODUCT_ID: &str = "0";

pub const DEMO_REVIEW: &str =
    "The item arrived before I expected, but unfortunately the manual wasn't included in the box.";

pub const DEMO_SUMMARY: &str = "Customers like how quickly orders arrive, but several mention missing items in the box. Many mentions are neutral, which suggests the product meets expectations without standing out. Double-checking package contents before shipping would turn more of those neutral buyers into happy ones.";

pub fn demo_result() -> SentimentResult {
    SentimentResult {
        delivery: CategoryInsight::new(Sentiment::Positive, "The item arrived before I expected"),
        packaging: CategoryInsight::new(
            Sentiment::Negative,
            "the manual wasn't included in the box",
        ),
        quality: CategoryInsight::new(
            Sentiment::Negative,
            "unfortunately the manual wasn't included in the box",
        ),
        price: CategoryInsight::default(),
        service: CategoryInsight::default(),
    }
}

pub fn demo_analysis() -> ReviewAnalysis {
    ReviewAnalysis::new(DEMO_REVIEW, demo_result())
}

/// 저장된 레코드 형태의 예시 목록.
pub fn demo_records(product_id: ProductId) -> Vec<StoredReview> {
    let at = DateTime::<Utc>::UNIX_EPOCH;
    let samples = [
        ("demo-1", demo_analysis()),
        (
            "demo-2",
            ReviewAnalysis::new(
                "Great value for the money. The packaging was secure, and everything works just fine.",
                SentimentResult {
                    price: CategoryInsight::new(Sentiment::Positive, "Great value for the money"),
                    packaging: CategoryInsight::new(Sentiment::Positive, "The packaging was secure"),
                    quality: CategoryInsight::new(Sentiment::Positive, "everything works just fine"),
                    ..Default::default()
                },
            ),
        ),
        (
            "demo-3",
            ReviewAnalysis::new(
                "Customer service was very friendly when I called. The product is decent for a budget option.",
                SentimentResult {
                    service: CategoryInsight::new(
                        Sentiment::Positive,
                        "Customer service was very friendly when I called.",
                    ),
                    price: CategoryInsight::new(
                        Sentiment::Neutral,
                        "The product is decent for a budget option.",
                    ),
                    ..Default::default()
                },
            ),
        ),
    ];

    samples
        .into_iter()
        .map(|(id, review)| StoredReview {
            id: id.to_string(),
            product_id: product_id.clone(),
            review,
            created_at: at,
            updated_at: at,
        })
        .collect()
}
