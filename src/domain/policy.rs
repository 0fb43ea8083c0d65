//! 도메인 정책(프롬프트 구성, 요약 폴백 규칙).

use crate::domain::correction::CorrectionKind;
use crate::domain::sentiment::{Category, SentimentCounts};

/// 요약 생성이 실패했을 때 응답에 넣는 문구.
pub const SUMMARY_FALLBACK: &str = "Summary generation failed";

/// 자유 텍스트 요약 길이 범위(단어 수).
pub const SUMMARY_MIN_WORDS: usize = 40;
pub const SUMMARY_MAX_WORDS: usize = 150;

/// 단일 리뷰 감성 추출 프롬프트.
pub fn build_analysis_prompt(review_text: &str) -> String {
    let mut out = String::new();
    out.push_str("You extract per-category sentiment from a single customer review.\n");
    push_category_contract(&mut out);
    out.push_str(&format!("Review: {}\n", quote(review_text)));
    out
}

/// 보정 프롬프트. 이전 보정 지시문을 순서대로 포함한다.
pub fn build_refinement_prompt(
    review_text: &str,
    correction: CorrectionKind,
    previous: impl IntoIterator<Item = CorrectionKind>,
) -> String {
    let mut out = String::new();
    out.push_str("You are refining an earlier sentiment analysis of a customer review.\n");

    let previous: Vec<CorrectionKind> = previous.into_iter().collect();
    if previous.is_empty() {
        out.push_str("No earlier refinements were applied.\n");
    } else {
        out.push_str("Earlier refinements, already applied in this order:\n");
        for kind in previous {
            out.push_str(&format!("- {}\n", kind.instruction()));
        }
    }

    out.push_str("\nApply this correction now:\n");
    out.push_str(correction.instruction());
    out.push_str("\n\n");
    push_category_contract(&mut out);
    out.push_str(&format!("Review: {}\n", quote(review_text)));
    out
}

/// 감성 집계를 바탕으로 한 요약 프롬프트.
pub fn build_summary_prompt(counts: &SentimentCounts) -> String {
    let mut out = String::new();
    out.push_str("Customer feedback statistics across all reviewed categories:\n");
    out.push_str(&format!("- Positive mentions: {}\n", counts.positive));
    out.push_str(&format!("- Negative mentions: {}\n", counts.negative));
    out.push_str(&format!("- Neutral mentions: {}\n\n", counts.neutral));
    out.push_str("Write a short, friendly summary of the overall sentiment for the seller.\n");
    out.push_str("Point out strengths when positive mentions dominate, name the main concern when negative mentions are significant, and suggest why customers may stay neutral when neutral mentions are high.\n");
    out.push_str("Close with one practical recommendation.\n");
    out.push_str("Respond with JSON only, no Markdown: {\"summary\": \"...\"}\n");
    out
}

/// 자유 텍스트 요약 프롬프트.
pub fn build_text_summary_prompt(text: &str) -> String {
    format!(
        "Summarize the following text in {SUMMARY_MIN_WORDS} to {SUMMARY_MAX_WORDS} words. Keep facts, drop filler.\nRespond with JSON only, no Markdown: {{\"summary\": \"...\"}}\n\nText:\n{text}\n"
    )
}

fn push_category_contract(out: &mut String) {
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    out.push_str(&format!("Categories: {}.\n", names.join(", ")));
    out.push_str("For every category give the review text that relates to it (empty string when none) and a sentiment of positive, negative or neutral.\n");
    out.push_str("Respond with a single JSON object only, no Markdown and no explanation, shaped as:\n");
    out.push_str("{\"delivery\": {\"text\": \"...\", \"sentiment\": \"positive\"}, ...}\n");
}

fn quote(text: &str) -> String {
    // 리뷰 본문 안의 따옴표가 프롬프트 구분을 깨지 않도록 JSON 문자열로 감싼다.
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_names_every_category_and_quotes_review() {
        let prompt = build_analysis_prompt("Said \"great\" but broke");
        for category in Category::ALL {
            assert!(prompt.contains(category.as_str()));
        }
        assert!(prompt.contains(r#""Said \"great\" but broke""#));
    }

    #[test]
    fn refinement_prompt_lists_previous_corrections_in_order() {
        let prompt = build_refinement_prompt(
            "late but sturdy",
            CorrectionKind::TooGeneral,
            [CorrectionKind::MissingDelivery, CorrectionKind::MissingQuality],
        );

        let delivery = prompt
            .find(CorrectionKind::MissingDelivery.instruction())
            .unwrap();
        let quality = prompt
            .find(CorrectionKind::MissingQuality.instruction())
            .unwrap();
        let current = prompt.find(CorrectionKind::TooGeneral.instruction()).unwrap();
        assert!(delivery < quality && quality < current);
    }

    #[test]
    fn refinement_prompt_without_history_says_so() {
        let prompt = build_refinement_prompt("ok", CorrectionKind::MissingPrice, []);
        assert!(prompt.contains("No earlier refinements"));
    }

    #[test]
    fn summary_prompt_embeds_counts() {
        let counts = SentimentCounts {
            positive: 7,
            negative: 2,
            neutral: 11,
        };
        let prompt = build_summary_prompt(&counts);
        assert!(prompt.contains("Positive mentions: 7"));
        assert!(prompt.contains("Negative mentions: 2"));
        assert!(prompt.contains("Neutral mentions: 11"));
    }
}
