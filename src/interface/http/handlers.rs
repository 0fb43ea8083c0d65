//! 라우트 핸들러.
//! 본문/쿼리 파싱만 하고 나머지는 유스케이스에 넘긴다.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};

use crate::application::usecases::upload_reviews::UploadRequest;
use crate::domain::correction::CorrectionKind;
use crate::domain::demo::demo_analysis;
use crate::interface::composition::AppComposition;

use super::dto::{
    AnalysisBody, AnalyzeRequest, CorrectRequest, CorrectResponse, CorrectionOption, FetchQuery,
    FetchResponse, RecordBody, SummarizeTextRequest, SummaryBody, UploadRequestBody,
    UploadResponse,
};
use super::error::ApiError;

type AppState = State<Arc<AppComposition>>;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn analyze_review(
    State(app): AppState,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisBody>, ApiError> {
    let Json(body) = body?;
    let analysis = app
        .analyze_review_usecase()
        .execute(body.review.as_deref())
        .await?;
    Ok(Json(analysis.into()))
}

pub async fn upload_reviews(
    State(app): AppState,
    body: Result<Json<UploadRequestBody>, JsonRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let Json(body) = body?;
    let request = UploadRequest {
        product_id: body.product_id(),
        reviews: body.file_content.map(|c| c.reviews).unwrap_or_default(),
        is_dummy: body.is_dummy.unwrap_or(false),
    };

    let outcome = app.upload_reviews_usecase().execute(request).await?;
    Ok(Json(UploadResponse {
        product_id: outcome.product_id,
        analyzed_reviews: outcome.reviews.into_iter().map(RecordBody::from).collect(),
        sentiment_counts: outcome.counts,
        summary: outcome.summary,
    }))
}

pub async fn correct_analysis(
    State(app): AppState,
    body: Result<Json<CorrectRequest>, JsonRejection>,
) -> Result<Json<CorrectResponse>, ApiError> {
    let Json(body) = body?;
    let record = app
        .correct_analysis_usecase()
        .execute(body.review_id.as_deref(), body.correction_type.as_deref())
        .await?;
    Ok(Json(record.into()))
}

pub async fn fetch_reviews(
    State(app): AppState,
    query: Result<Query<FetchQuery>, QueryRejection>,
) -> Result<Json<FetchResponse>, ApiError> {
    let Query(query) = query?;
    let outcome = app
        .fetch_reviews_usecase()
        .execute(query.product_id.as_deref())
        .await?;
    Ok(Json(FetchResponse {
        product_id: outcome.product_id,
        analyzed_reviews: outcome.reviews.into_iter().map(RecordBody::from).collect(),
        sentiment_counts: outcome.counts,
        summary: outcome.summary,
    }))
}

/// 고정 예시 분석을 돌려주는 자리표시 엔드포인트.
pub async fn summarize() -> Json<AnalysisBody> {
    Json(demo_analysis().into())
}

pub async fn summarize_text(
    State(app): AppState,
    body: Result<Json<SummarizeTextRequest>, JsonRejection>,
) -> Result<Json<SummaryBody>, ApiError> {
    let Json(body) = body?;
    let summary = app
        .summarize_text_usecase()
        .execute(body.text.as_deref())
        .await?;
    Ok(Json(SummaryBody { summary }))
}

pub async fn correction_options() -> Json<Vec<CorrectionOption>> {
    Json(
        CorrectionKind::ALL
            .into_iter()
            .map(|kind| CorrectionOption {
                id: kind,
                instruction: kind.instruction(),
            })
            .collect(),
    )
}
