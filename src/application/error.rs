//! 유스케이스 실패 분류.
//! 실패 종류를 구분해 인터페이스 계층이 상태 코드를 고를 수 있게 한다.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    /// 동시에 들어온 다른 쓰기와 충돌
    #[error("{0}")]
    Conflict(String),
    /// 모델 호출 실패 또는 응답 형식 오류
    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl UseCaseError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn upstream(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Upstream {
            message,
            source: source.into(),
        }
    }

    pub fn storage(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Storage {
            message,
            source: source.into(),
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;
