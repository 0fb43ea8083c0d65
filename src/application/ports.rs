//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::config::Config;
use crate::domain::record::{ProductId, ReviewAnalysis, StoredReview};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 모델 1회 호출 결과.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

/// 호스팅 LLM(chat completion) 호출 포트.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// 내부 식별자(로그 키)
    fn id(&self) -> &'static str;
    /// 사용 중인 모델 이름
    fn model(&self) -> &str;
    /// 단일 사용자 프롬프트를 보내고 텍스트 응답을 받는다.
    async fn complete(&self, prompt: &str) -> Result<Completion>;
}

/// 설정에 맞는 LLM 포트 구현을 생성하는 팩토리 포트.
pub trait LanguageModelFactory: Send + Sync {
    fn build(&self, config: &Config) -> Result<Box<dyn LanguageModel>>;
}

/// 조건부 갱신 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(StoredReview),
    NotFound,
    Conflict,
}

/// 분석 레코드 문서 저장소 포트.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// 여러 분석 결과를 한 번에 저장한다(전부 성공 또는 전부 실패).
    async fn insert_many(
        &self,
        product_id: &ProductId,
        reviews: Vec<ReviewAnalysis>,
    ) -> Result<Vec<StoredReview>>;
    async fn find(&self, id: &str) -> Result<Option<StoredReview>>;
    /// 현재 결과와 보정 이력을 교체한다.
    /// 읽은 뒤(`read_at`) 다른 쓰기가 있었으면 덮어쓰지 않고 `Conflict`를 돌려준다.
    async fn update_analysis(
        &self,
        id: &str,
        review: &ReviewAnalysis,
        read_at: DateTime<Utc>,
    ) -> Result<UpdateOutcome>;
    /// 상품의 레코드를 생성 순서대로 반환한다.
    async fn list_by_product(&self, product_id: &ProductId) -> Result<Vec<StoredReview>>;
}
