//! 분석 레코드 저장소 구현.

mod sqlite;

pub use sqlite::{IN_MEMORY_PATH, SqliteReviewStore};
