//! 리뷰 분석 레코드 엔티티.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::correction::CorrectionKind;
use crate::domain::sentiment::SentimentResult;

/// 외부에서 전달되는 상품 식별자.
/// JSON 문자열/정수 모두 허용하며 문자열 형태로 정규화한다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawProductId", into = "String")]
pub struct ProductId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl ProductId {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<RawProductId> for ProductId {
    type Error = String;

    fn try_from(raw: RawProductId) -> Result<Self, Self::Error> {
        let text = match raw {
            RawProductId::Text(text) => text,
            RawProductId::Signed(n) => n.to_string(),
            RawProductId::Unsigned(n) => n.to_string(),
        };
        Self::parse(&text).ok_or_else(|| "product id must not be empty".to_string())
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 보정 1회 이력.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    pub correction_type: CorrectionKind,
    pub output: SentimentResult,
}

/// 리뷰 원문 + 현재 분석 결과 + 보정 이력.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    pub input: String,
    pub output: SentimentResult,
    #[serde(default)]
    pub history: Vec<CorrectionEntry>,
}

impl ReviewAnalysis {
    pub fn new(input: impl Into<String>, output: SentimentResult) -> Self {
        Self {
            input: input.into(),
            output,
            history: Vec::new(),
        }
    }

    /// 보정 결과를 현재 결과로 바꾸고 이력 끝에 추가한다.
    pub fn apply_correction(&mut self, kind: CorrectionKind, output: SentimentResult) {
        self.history.push(CorrectionEntry {
            correction_type: kind,
            output: output.clone(),
        });
        self.output = output;
    }

    pub fn applied_corrections(&self) -> impl Iterator<Item = CorrectionKind> + '_ {
        self.history.iter().map(|entry| entry.correction_type)
    }
}

/// 저장소가 식별자를 부여한 분석 레코드.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReview {
    pub id: String,
    pub product_id: ProductId,
    pub review: ReviewAnalysis,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::{CategoryInsight, Sentiment};

    #[test]
    fn product_id_accepts_strings_and_integers() {
        let from_number: ProductId = serde_json::from_str("34942640").unwrap();
        let from_text: ProductId = serde_json::from_str("\" sku-12 \"").unwrap();

        assert_eq!(from_number.as_str(), "34942640");
        assert_eq!(from_text.as_str(), "sku-12");
        assert!(serde_json::from_str::<ProductId>("\"   \"").is_err());
        assert!(serde_json::from_str::<ProductId>("null").is_err());
    }

    #[test]
    fn correction_replaces_output_and_appends_history() {
        let mut analysis = ReviewAnalysis::new("ok product", SentimentResult::default());
        let refined = SentimentResult {
            quality: CategoryInsight::new(Sentiment::Positive, "ok product"),
            ..Default::default()
        };

        analysis.apply_correction(CorrectionKind::MissingQuality, refined.clone());

        assert_eq!(analysis.output, refined);
        assert_eq!(analysis.history.len(), 1);
        assert_eq!(
            analysis.applied_corrections().collect::<Vec<_>>(),
            vec![CorrectionKind::MissingQuality]
        );
    }

    #[test]
    fn history_defaults_to_empty_when_absent() {
        let raw = serde_json::json!({
            "input": "fine",
            "output": SentimentResult::default(),
        });
        let analysis: ReviewAnalysis = serde_json::from_value(raw).unwrap();
        assert!(analysis.history.is_empty());
    }
}
