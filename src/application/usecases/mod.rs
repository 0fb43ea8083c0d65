//! 애플리케이션 유스케이스 모음.

pub mod analyze_review;
pub mod correct_analysis;
pub mod fetch_reviews;
pub mod inspect_config;
pub mod summarize_text;
pub mod upload_reviews;

pub(crate) mod sentiment;
