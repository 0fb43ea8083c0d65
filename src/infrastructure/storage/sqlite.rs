//! SQLite 기반 분석 레코드 문서 저장소.
//!
//! 레코드 본문(`ReviewAnalysis`)은 JSON 문서로 저장하고, 조회 키(id/상품/시각)만 컬럼으로 둔다.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::application::ports::{ReviewStore, UpdateOutcome};
use crate::domain::record::{ProductId, ReviewAnalysis, StoredReview};

pub const IN_MEMORY_PATH: &str = ":memory:";

const SELECT_COLUMNS: &str = "id, product_id, document, created_at, updated_at";

pub struct SqliteReviewStore {
    conn: Arc<Mutex<Connection>>,
}

/// 컬럼 원본값(JSON/시각 해석 전).
struct RawRow {
    id: String,
    product_id: String,
    document: String,
    created_at: String,
    updated_at: String,
}

impl SqliteReviewStore {
    /// 파일 DB를 열거나 생성한다. `:memory:`는 프로세스 내 임시 DB.
    pub fn open(path: &str) -> Result<Self> {
        let conn = if path == IN_MEMORY_PATH {
            Connection::open_in_memory().context("Failed to create in-memory database")?
        } else {
            Connection::open(path).with_context(|| format!("Failed to open database at {path}"))?
        };
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(IN_MEMORY_PATH)
    }

    /// 커넥션 작업을 blocking 스레드에서 실행한다.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| anyhow!("review store connection lock poisoned"))?;
            f(&mut guard)
        })
        .await
        .context("review store task failed")?
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            product_id TEXT NOT NULL,
            document TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reviews_product ON reviews(product_id, seq);
        "#,
    )
    .context("Failed to initialize database schema")?;
    Ok(())
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 저장 형식(마이크로초)으로 잘라 둔 현재 시각.
fn now_rfc3339() -> (DateTime<Utc>, String) {
    let now = Utc::now().trunc_subsecs(6);
    (now, format_timestamp(now))
}

/// 갱신 시각은 직전 값보다 항상 커야 조건부 갱신이 이후 쓰기를 구분할 수 있다.
fn next_stamp(after: DateTime<Utc>) -> String {
    let (now, stamp) = now_rfc3339();
    if now > after {
        stamp
    } else {
        format_timestamp(after + TimeDelta::microseconds(1))
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid timestamp in review store: {raw}"))?
        .with_timezone(&Utc))
}

fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        product_id: row.get(1)?,
        document: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

impl RawRow {
    fn into_record(self) -> Result<StoredReview> {
        let review: ReviewAnalysis = serde_json::from_str(&self.document)
            .with_context(|| format!("corrupt review document: {}", self.id))?;
        let product_id = ProductId::parse(&self.product_id)
            .with_context(|| format!("empty product id on review: {}", self.id))?;
        Ok(StoredReview {
            product_id,
            review,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            id: self.id,
        })
    }
}

fn find_by_id(conn: &Connection, id: &str) -> Result<Option<StoredReview>> {
    let raw = conn
        .query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM reviews WHERE id = ?1"),
            params![id],
            read_raw,
        )
        .optional()
        .with_context(|| format!("Failed to load review: {id}"))?;
    raw.map(RawRow::into_record).transpose()
}

#[async_trait]
impl ReviewStore for SqliteReviewStore {
    async fn insert_many(
        &self,
        product_id: &ProductId,
        reviews: Vec<ReviewAnalysis>,
    ) -> Result<Vec<StoredReview>> {
        let product_id = product_id.clone();
        self.with_conn(move |conn| {
            let tx = conn.transaction().context("Failed to begin transaction")?;
            let mut stored = Vec::with_capacity(reviews.len());
            {
                let mut stmt = tx
                    .prepare(
                        "INSERT INTO reviews (id, product_id, document, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
                    )
                    .context("Failed to prepare statement")?;
                for review in reviews {
                    let id = Uuid::new_v4().simple().to_string();
                    let (now, stamp) = now_rfc3339();
                    let document = serde_json::to_string(&review)?;
                    stmt.execute(params![id, product_id.as_str(), document, stamp])
                        .with_context(|| format!("Failed to insert review for product {product_id}"))?;
                    stored.push(StoredReview {
                        id,
                        product_id: product_id.clone(),
                        review,
                        created_at: now,
                        updated_at: now,
                    });
                }
            }
            tx.commit().context("Failed to commit review batch")?;
            Ok(stored)
        })
        .await
    }

    async fn find(&self, id: &str) -> Result<Option<StoredReview>> {
        let id = id.to_string();
        self.with_conn(move |conn| find_by_id(conn, &id)).await
    }

    async fn update_analysis(
        &self,
        id: &str,
        review: &ReviewAnalysis,
        read_at: DateTime<Utc>,
    ) -> Result<UpdateOutcome> {
        let id = id.to_string();
        let document = serde_json::to_string(review)?;
        let expected = format_timestamp(read_at);
        self.with_conn(move |conn| {
            let stamp = next_stamp(read_at);
            let changed = conn
                .execute(
                    "UPDATE reviews SET document = ?1, updated_at = ?2 WHERE id = ?3 AND updated_at = ?4",
                    params![document, stamp, id, expected],
                )
                .with_context(|| format!("Failed to update review: {id}"))?;
            if changed > 0 {
                return Ok(match find_by_id(conn, &id)? {
                    Some(record) => UpdateOutcome::Updated(record),
                    None => UpdateOutcome::NotFound,
                });
            }

            let exists = conn
                .query_row("SELECT 1 FROM reviews WHERE id = ?1", params![id], |_| Ok(()))
                .optional()
                .with_context(|| format!("Failed to check review: {id}"))?
                .is_some();
            Ok(if exists {
                UpdateOutcome::Conflict
            } else {
                UpdateOutcome::NotFound
            })
        })
        .await
    }

    async fn list_by_product(&self, product_id: &ProductId) -> Result<Vec<StoredReview>> {
        let product_id = product_id.clone();
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM reviews WHERE product_id = ?1 ORDER BY seq"
                ))
                .context("Failed to prepare statement")?;
            let rows = stmt
                .query_map(params![product_id.as_str()], read_raw)
                .context("Failed to query reviews")?
                .collect::<rusqlite::Result<Vec<_>>>()
                .context("Failed to read review rows")?;
            rows.into_iter().map(RawRow::into_record).collect()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::correction::CorrectionKind;
    use crate::domain::sentiment::{CategoryInsight, Sentiment, SentimentResult};

    fn analysis(text: &str, sentiment: Sentiment) -> ReviewAnalysis {
        ReviewAnalysis::new(
            text,
            SentimentResult {
                quality: CategoryInsight::new(sentiment, text),
                ..Default::default()
            },
        )
    }

    fn product(raw: &str) -> ProductId {
        ProductId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn inserted_reviews_get_ids_and_are_listed_in_order() {
        let store = SqliteReviewStore::in_memory().unwrap();
        let stored = store
            .insert_many(
                &product("42"),
                vec![
                    analysis("solid build", Sentiment::Positive),
                    analysis("cheap plastic", Sentiment::Negative),
                ],
            )
            .await
            .unwrap();
        store
            .insert_many(&product("7"), vec![analysis("other", Sentiment::Neutral)])
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert_ne!(stored[0].id, stored[1].id);

        let listed = store.list_by_product(&product("42")).await.unwrap();
        let inputs: Vec<&str> = listed.iter().map(|r| r.review.input.as_str()).collect();
        assert_eq!(inputs, vec!["solid build", "cheap plastic"]);
        assert_eq!(listed[0].id, stored[0].id);
    }

    #[tokio::test]
    async fn update_replaces_document_and_keeps_history() {
        let store = SqliteReviewStore::in_memory().unwrap();
        let stored = store
            .insert_many(&product("1"), vec![analysis("meh", Sentiment::Neutral)])
            .await
            .unwrap();
        let id = stored[0].id.clone();

        let mut review = stored[0].review.clone();
        review.apply_correction(
            CorrectionKind::NeutralSentimentCheck,
            SentimentResult {
                quality: CategoryInsight::new(Sentiment::Negative, "meh"),
                ..Default::default()
            },
        );
        let outcome = store
            .update_analysis(&id, &review, stored[0].updated_at)
            .await
            .unwrap();
        let UpdateOutcome::Updated(updated) = outcome else {
            panic!("expected update, got {outcome:?}");
        };

        assert_eq!(updated.review.history.len(), 1);
        assert_eq!(updated.review.output.quality.sentiment, Sentiment::Negative);
        assert!(updated.updated_at >= updated.created_at);

        let reloaded = store.find(&id).await.unwrap().unwrap();
        assert_eq!(reloaded.review, review);
    }

    #[tokio::test]
    async fn unknown_ids_are_absent() {
        let store = SqliteReviewStore::in_memory().unwrap();
        assert!(store.find("missing").await.unwrap().is_none());
        let review = analysis("x", Sentiment::Neutral);
        assert_eq!(
            store
                .update_analysis("missing", &review, Utc::now())
                .await
                .unwrap(),
            UpdateOutcome::NotFound
        );
        assert!(store.list_by_product(&product("none")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stale_write_is_rejected_and_keeps_earlier_history() {
        let store = SqliteReviewStore::in_memory().unwrap();
        let stored = store
            .insert_many(&product("1"), vec![analysis("meh", Sentiment::Neutral)])
            .await
            .unwrap();
        let original = stored[0].clone();

        // 두 요청이 같은 시점의 레코드를 읽고 각자 보정한다.
        let mut first = original.review.clone();
        first.apply_correction(CorrectionKind::MissingPrice, SentimentResult::default());
        let mut second = original.review.clone();
        second.apply_correction(CorrectionKind::TooGeneral, SentimentResult::default());

        let outcome = store
            .update_analysis(&original.id, &first, original.updated_at)
            .await
            .unwrap();
        assert!(matches!(outcome, UpdateOutcome::Updated(_)));
        let outcome = store
            .update_analysis(&original.id, &second, original.updated_at)
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Conflict);

        let reloaded = store.find(&original.id).await.unwrap().unwrap();
        assert_eq!(reloaded.review, first);
    }

    #[tokio::test]
    async fn fresh_read_can_be_written_back() {
        let store = SqliteReviewStore::in_memory().unwrap();
        let stored = store
            .insert_many(&product("1"), vec![analysis("meh", Sentiment::Neutral)])
            .await
            .unwrap();
        let id = stored[0].id.clone();

        let mut review = stored[0].review.clone();
        review.apply_correction(CorrectionKind::MissingPrice, SentimentResult::default());
        store
            .update_analysis(&id, &review, stored[0].updated_at)
            .await
            .unwrap();

        let current = store.find(&id).await.unwrap().unwrap();
        review.apply_correction(CorrectionKind::TooGeneral, SentimentResult::default());
        let outcome = store
            .update_analysis(&id, &review, current.updated_at)
            .await
            .unwrap();
        let UpdateOutcome::Updated(updated) = outcome else {
            panic!("expected update, got {outcome:?}");
        };
        assert_eq!(updated.review.history.len(), 2);
    }
}
