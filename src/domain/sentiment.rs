//! 감성 분석 결과 값 객체.
//! 카테고리 5종과 감성 라벨 3종은 고정이며, 결과는 항상 5개 카테고리를 모두 가진다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 리뷰를 나누어 보는 고정 카테고리.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Delivery,
    Quality,
    Price,
    Packaging,
    Service,
}

impl Category {
    /// 직렬화/프롬프트 출력 순서.
    pub const ALL: [Category; 5] = [
        Category::Delivery,
        Category::Quality,
        Category::Price,
        Category::Packaging,
        Category::Service,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Quality => "quality",
            Self::Price => "price",
            Self::Packaging => "packaging",
            Self::Service => "service",
        }
    }

    /// 대소문자/공백을 무시하고 카테고리 이름을 해석한다.
    pub fn from_key(raw: &str) -> Option<Self> {
        let key = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 카테고리별 감성 라벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// 모델이 돌려준 라벨 문자열을 해석한다(대소문자 무시).
    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 한 카테고리에 대해 추출된 문장과 감성.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryInsight {
    pub sentiment: Sentiment,
    #[serde(default)]
    pub text: String,
}

impl CategoryInsight {
    pub fn new(sentiment: Sentiment, text: impl Into<String>) -> Self {
        Self {
            sentiment,
            text: text.into(),
        }
    }
}

/// 5개 카테고리 전체에 대한 분석 결과.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentimentResult {
    pub delivery: CategoryInsight,
    pub quality: CategoryInsight,
    pub price: CategoryInsight,
    pub packaging: CategoryInsight,
    pub service: CategoryInsight,
}

impl SentimentResult {
    /// 카테고리마다 값을 만들어 결과를 구성한다.
    pub fn from_fn(mut f: impl FnMut(Category) -> CategoryInsight) -> Self {
        Self {
            delivery: f(Category::Delivery),
            quality: f(Category::Quality),
            price: f(Category::Price),
            packaging: f(Category::Packaging),
            service: f(Category::Service),
        }
    }

    pub fn get(&self, category: Category) -> &CategoryInsight {
        match category {
            Category::Delivery => &self.delivery,
            Category::Quality => &self.quality,
            Category::Price => &self.price,
            Category::Packaging => &self.packaging,
            Category::Service => &self.service,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryInsight)> {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// 감성 라벨 집계(요청 시 계산, 저장하지 않음).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SentimentCounts {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    /// 결과 묶음의 모든 카테고리 라벨을 센다.
    pub fn tally<'a>(results: impl IntoIterator<Item = &'a SentimentResult>) -> Self {
        let mut counts = Self::default();
        for result in results {
            for (_, insight) in result.iter() {
                counts.record(insight.sentiment);
            }
        }
        counts
    }

    pub fn total(&self) -> u32 {
        self.positive + self.negative + self.neutral
    }
}
