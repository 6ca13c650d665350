// src/handlers/results.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{error::AppError, models::exam_record::ResultListParams, repositories::results};

/// Lists completed attempts, newest first.
pub async fn list_results(
    State(pool): State<SqlitePool>,
    Query(params): Query<ResultListParams>,
) -> Result<impl IntoResponse, AppError> {
    let records = results::list(&pool, &params).await?;

    Ok(Json(records))
}
