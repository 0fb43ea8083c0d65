//! Domain layer
//! 감성 분석 규칙(값 객체/엔티티/프롬프트 정책)을 외부 시스템 없이 표현한다.

pub mod completion;
pub mod correction;
pub mod demo;
pub mod policy;
pub mod record;
pub mod sentiment;
