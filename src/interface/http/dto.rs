//! HTTP 요청/응답 본문 형태.
//! 필드 이름은 기존 프런트엔드 계약(productID, fileContent, _id 등)을 따른다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::correction::CorrectionKind;
use crate::domain::record::{CorrectionEntry, ProductId, ReviewAnalysis, StoredReview};
use crate::domain::sentiment::{SentimentCounts, SentimentResult};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub review: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UploadRequestBody {
    #[serde(rename = "productID")]
    pub product_id: Option<Value>,
    #[serde(rename = "fileContent")]
    pub file_content: Option<FileContent>,
    #[serde(rename = "isDummy", default)]
    pub is_dummy: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileContent {
    #[serde(default)]
    pub reviews: Vec<String>,
}

impl UploadRequestBody {
    /// 문자열/정수 모두 허용하고, 비어 있거나 다른 타입이면 없는 값으로 본다.
    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

#[derive(Debug, Deserialize)]
pub struct CorrectRequest {
    pub review_id: Option<String>,
    pub correction_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeTextRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisBody {
    pub input: String,
    pub output: SentimentResult,
}

impl From<ReviewAnalysis> for AnalysisBody {
    fn from(analysis: ReviewAnalysis) -> Self {
        Self {
            input: analysis.input,
            output: analysis.output,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecordBody {
    #[serde(rename = "_id")]
    pub id: String,
    pub product_id: ProductId,
    pub input: String,
    pub output: SentimentResult,
    pub history: Vec<CorrectionEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredReview> for RecordBody {
    fn from(record: StoredReview) -> Self {
        Self {
            id: record.id,
            product_id: record.product_id,
            input: record.review.input,
            output: record.review.output,
            history: record.review.history,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(rename = "productID")]
    pub product_id: Option<ProductId>,
    pub analyzed_reviews: Vec<RecordBody>,
    pub sentiment_counts: SentimentCounts,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct CorrectResponse {
    pub review_id: String,
    pub corrected_output: SentimentResult,
    pub history: Vec<CorrectionEntry>,
}

impl From<StoredReview> for CorrectResponse {
    fn from(record: StoredReview) -> Self {
        Self {
            review_id: record.id,
            corrected_output: record.review.output,
            history: record.review.history,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub analyzed_reviews: Vec<RecordBody>,
    pub sentiment_counts: SentimentCounts,
    pub summary: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryBody {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct CorrectionOption {
    pub id: CorrectionKind,
    pub instruction: &'static str,
}
