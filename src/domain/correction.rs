//! 분석 보정(correction) 카탈로그.
//! 사용자가 고른 보정 유형마다 모델에 전달할 고정 지시문을 가진다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    MissingQuality,
    MissingDelivery,
    MissingPrice,
    MissingPackaging,
    MissingService,
    IncorrectSentiment,
    MissingCategory,
    UnclearAnalysis,
    MisclassifiedText,
    TextNotExtracted,
    TooGeneral,
    NeutralSentimentCheck,
    PositiveButNegativeContext,
    MoreContextNeeded,
}

impl CorrectionKind {
    pub const ALL: [CorrectionKind; 14] = [
        CorrectionKind::MissingQuality,
        CorrectionKind::MissingDelivery,
        CorrectionKind::MissingPrice,
        CorrectionKind::MissingPackaging,
        CorrectionKind::MissingService,
        CorrectionKind::IncorrectSentiment,
        CorrectionKind::MissingCategory,
        CorrectionKind::UnclearAnalysis,
        CorrectionKind::MisclassifiedText,
        CorrectionKind::TextNotExtracted,
        CorrectionKind::TooGeneral,
        CorrectionKind::NeutralSentimentCheck,
        CorrectionKind::PositiveButNegativeContext,
        CorrectionKind::MoreContextNeeded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingQuality => "missing_quality",
            Self::MissingDelivery => "missing_delivery",
            Self::MissingPrice => "missing_price",
            Self::MissingPackaging => "missing_packaging",
            Self::MissingService => "missing_service",
            Self::IncorrectSentiment => "incorrect_sentiment",
            Self::MissingCategory => "missing_category",
            Self::UnclearAnalysis => "unclear_analysis",
            Self::MisclassifiedText => "misclassified_text",
            Self::TextNotExtracted => "text_not_extracted",
            Self::TooGeneral => "too_general",
            Self::NeutralSentimentCheck => "neutral_sentiment_check",
            Self::PositiveButNegativeContext => "positive_but_negative_context",
            Self::MoreContextNeeded => "more_context_needed",
        }
    }

    /// 재분석 프롬프트에 들어갈 지시문(영문).
    pub fn instruction(self) -> &'static str {
        match self {
            Self::MissingQuality => {
                "Look again for anything the review says about product quality. Keep 'neutral' only if quality is really never mentioned."
            }
            Self::MissingDelivery => {
                "If shipping speed or delivery is discussed, place that text under 'delivery' with the matching sentiment."
            }
            Self::MissingPrice => {
                "Capture any remark about price, discounts, value for money or affordability under 'price'."
            }
            Self::MissingPackaging => {
                "Capture remarks about packaging, the condition on arrival or the unboxing experience under 'packaging'."
            }
            Self::MissingService => {
                "Put interactions with customer support, replies or instructions under 'service' with the matching sentiment."
            }
            Self::IncorrectSentiment => {
                "Reassess every sentiment label so it follows the tone and context of the review."
            }
            Self::MissingCategory => {
                "Check each of delivery, quality, price, packaging and service again and fill in any category that was skipped."
            }
            Self::UnclearAnalysis => {
                "Make the extracted text for each relevant category specific and unambiguous."
            }
            Self::MisclassifiedText => {
                "Some phrases may sit under the wrong category. Move every phrase to the category it actually describes."
            }
            Self::TextNotExtracted => {
                "Where a category was left empty although the review contains relevant text, extract that text and label it."
            }
            Self::TooGeneral => {
                "Replace generic statements with concrete details taken from the review."
            }
            Self::NeutralSentimentCheck => {
                "For each category marked 'neutral', confirm it is truly neutral or assign the sentiment the text supports."
            }
            Self::PositiveButNegativeContext => {
                "When a positive phrase is followed by a negative one, analyze both parts instead of dropping either."
            }
            Self::MoreContextNeeded => {
                "Use the whole review, including implied meaning, when deciding text and sentiment per category."
            }
        }
    }
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == key)
            .ok_or_else(|| format!("unknown correction type: {key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for kind in CorrectionKind::ALL {
            assert_eq!(kind.as_str().parse::<CorrectionKind>(), Ok(kind));
            assert!(!kind.instruction().is_empty());
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!("missing_colour".parse::<CorrectionKind>().is_err());
        assert!("".parse::<CorrectionKind>().is_err());
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&CorrectionKind::PositiveButNegativeContext).unwrap();
        assert_eq!(json, "\"positive_but_negative_context\"");
    }
}
