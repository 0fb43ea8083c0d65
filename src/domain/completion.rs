//! 모델 응답 텍스트에서 JSON 결과를 꺼내는 규칙.
//!
//! 응답은 코드 펜스로 감싸이거나 앞뒤에 설명이 붙을 수 있다. 어떤 경우에도
//! 응답을 코드로 평가하지 않고 JSON으로만 해석한다.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::sentiment::{Category, CategoryInsight, Sentiment, SentimentResult};

const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompletionError {
    #[error("completion does not contain a JSON object: {excerpt}")]
    NoJsonObject { excerpt: String },
    #[error("category '{0}' is missing from the completion")]
    MissingCategory(Category),
    #[error("category '{category}' has an invalid shape")]
    InvalidShape { category: Category },
    #[error("category '{category}' has unknown sentiment '{label}'")]
    InvalidSentiment { category: Category, label: String },
    #[error("completion is missing the '{0}' field")]
    MissingField(&'static str),
}

/// 앞뒤 공백과 ``` 코드 펜스(언어 태그 포함)를 제거한다.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // 첫 줄이 언어 태그(json 등)면 건너뛴다.
    let body = match rest.find('\n') {
        Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[idx + 1..]
        }
        _ => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// 응답에서 JSON 객체를 추출한다.
/// 전체 파싱이 실패하면 첫 `{` ~ 마지막 `}` 구간을 다시 시도한다.
pub fn extract_json_object(raw: &str) -> Result<Map<String, Value>, CompletionError> {
    let body = strip_code_fences(raw);
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        return Ok(map);
    }

    if let (Some(start), Some(end)) = (body.find('{'), body.rfind('}'))
        && start < end
        && let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&body[start..=end])
    {
        return Ok(map);
    }

    Err(CompletionError::NoJsonObject {
        excerpt: excerpt(raw),
    })
}

/// 감성 분석 응답을 5개 카테고리 결과로 검증/변환한다.
/// 카테고리 키는 대소문자를 무시하고, 알 수 없는 추가 키는 버린다.
pub fn parse_sentiment_result(raw: &str) -> Result<SentimentResult, CompletionError> {
    let object = extract_json_object(raw)?;

    let mut by_category: BTreeMap<Category, &Value> = BTreeMap::new();
    for (key, value) in &object {
        if let Some(category) = Category::from_key(key) {
            by_category.insert(category, value);
        }
    }

    let mut insights = BTreeMap::new();
    for category in Category::ALL {
        let value = by_category
            .get(&category)
            .ok_or(CompletionError::MissingCategory(category))?;
        insights.insert(category, parse_insight(category, value)?);
    }

    Ok(SentimentResult::from_fn(|category| {
        insights.remove(&category).unwrap_or_default()
    }))
}

/// `{"summary": "..."}` 형태의 응답에서 요약문을 꺼낸다.
pub fn parse_summary(raw: &str) -> Result<String, CompletionError> {
    let object = extract_json_object(raw)?;
    object
        .get("summary")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(CompletionError::MissingField("summary"))
}

/// 로그용 원문 발췌.
pub fn excerpt(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out: String = trimmed.chars().take(EXCERPT_CHARS).collect();
    if trimmed.chars().count() > EXCERPT_CHARS {
        out.push_str("...");
    }
    out
}

/// 카테고리 키와 같은 규칙으로 내부 필드도 대소문자를 무시하고 찾는다.
fn field<'a>(entry: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    entry.get(name).or_else(|| {
        entry
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn parse_insight(category: Category, value: &Value) -> Result<CategoryInsight, CompletionError> {
    let Value::Object(entry) = value else {
        return Err(CompletionError::InvalidShape { category });
    };

    let text = match field(entry, "text") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(_) => return Err(CompletionError::InvalidShape { category }),
    };

    let label = field(entry, "sentiment")
        .and_then(Value::as_str)
        .ok_or(CompletionError::InvalidShape { category })?;
    let sentiment =
        Sentiment::parse_label(label).ok_or_else(|| CompletionError::InvalidSentiment {
            category,
            label: label.to_string(),
        })?;

    Ok(CategoryInsight { sentiment, text })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "delivery": {"text": "The item arrived before I expected", "sentiment": "positive"},
        "quality": {"text": "", "sentiment": "neutral"},
        "price": {"text": null, "sentiment": "Neutral"},
        "packaging": {"text": "the manual wasn't included in the box", "sentiment": "negative"},
        "service": {"sentiment": "neutral"}
    }"#;

    #[test]
    fn strips_fences_with_and_without_language_tag() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  ```\n{\"a\":1}```  "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let raw = "Sure! Here is the analysis:\n{\"summary\": \"fine\"}\nHope this helps.";
        let object = extract_json_object(raw).unwrap();
        assert_eq!(object["summary"], "fine");
    }

    #[test]
    fn rejects_text_without_an_object() {
        let err = extract_json_object("I cannot help with that.").unwrap_err();
        assert!(matches!(err, CompletionError::NoJsonObject { .. }));
        assert!(extract_json_object("[1, 2, 3]").is_err());
    }

    #[test]
    fn parses_all_five_categories() {
        let result = parse_sentiment_result(&format!("```json\n{FULL}\n```")).unwrap();

        assert_eq!(result.delivery.sentiment, Sentiment::Positive);
        assert_eq!(result.delivery.text, "The item arrived before I expected");
        assert_eq!(result.price.sentiment, Sentiment::Neutral);
        assert_eq!(result.price.text, "");
        assert_eq!(result.packaging.sentiment, Sentiment::Negative);
        assert_eq!(result.service.text, "");
    }

    #[test]
    fn category_keys_may_use_any_case_and_extra_keys_are_ignored() {
        let raw = r#"{
            "Delivery": {"text": "", "sentiment": "neutral"},
            "QUALITY": {"text": "", "sentiment": "neutral"},
            "Price": {"text": "", "sentiment": "neutral"},
            "Packaging": {"text": "", "sentiment": "neutral"},
            "Service": {"text": "", "sentiment": "neutral"},
            "overall": {"text": "meh", "sentiment": "neutral"}
        }"#;
        assert_eq!(parse_sentiment_result(raw).unwrap(), SentimentResult::default());
    }

    #[test]
    fn inner_fields_may_use_any_case() {
        let raw = r#"{
            "Delivery": {"Sentiment": "Positive", "Text": "arrived early"},
            "Quality": {"SENTIMENT": "negative", "TEXT": "flimsy"},
            "Price": {"sentiment": "neutral"},
            "Packaging": {"Sentiment": "neutral", "Text": null},
            "Service": {"Sentiment": "neutral", "Text": ""}
        }"#;
        let result = parse_sentiment_result(raw).unwrap();
        assert_eq!(result.delivery.sentiment, Sentiment::Positive);
        assert_eq!(result.delivery.text, "arrived early");
        assert_eq!(result.quality.sentiment, Sentiment::Negative);
        assert_eq!(result.quality.text, "flimsy");
        assert_eq!(result.packaging.text, "");
    }

    #[test]
    fn missing_category_is_an_error() {
        let raw = r#"{"delivery": {"text": "", "sentiment": "neutral"}}"#;
        assert_eq!(
            parse_sentiment_result(raw).unwrap_err(),
            CompletionError::MissingCategory(Category::Quality)
        );
    }

    #[test]
    fn unknown_sentiment_label_is_an_error() {
        let raw = FULL.replace("\"positive\"", "\"mixed\"");
        assert_eq!(
            parse_sentiment_result(&raw).unwrap_err(),
            CompletionError::InvalidSentiment {
                category: Category::Delivery,
                label: "mixed".to_string(),
            }
        );
    }

    #[test]
    fn summary_field_is_required() {
        assert_eq!(
            parse_summary("{\"summary\": \"  Customers like it. \"}").unwrap(),
            "Customers like it."
        );
        assert_eq!(
            parse_summary("{\"text\": \"x\"}").unwrap_err(),
            CompletionError::MissingField("summary")
        );
    }

    #[test]
    fn excerpt_truncates_long_text() {
        let long = "x".repeat(500);
        let out = excerpt(&long);
        assert_eq!(out.chars().count(), EXCERPT_CHARS + 3);
        assert!(out.ends_with("..."));
    }
}
