//! Application layer
//! 유스케이스를 정의하고 포트(추상 인터페이스)를 통해 LLM/저장소를 사용한다.

pub mod config;
pub mod error;
pub mod ports;
pub mod usecases;
