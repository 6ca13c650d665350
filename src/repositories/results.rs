// src/repositories/results.rs

use sqlx::{QueryBuilder, Sqlite, types::Json};

use crate::models::exam_record::{ExamRecord, ResultListParams};
use crate::models::session::AnswerMap;

const COLUMNS: &str = "\
    result_id, exam_id, student_id, student_name, teacher_id, score, answers, submission_time";

pub struct CreateResult<'a> {
    pub result_id: &'a str,
    pub exam_id: &'a str,
    pub student_id: &'a str,
    pub student_name: &'a str,
    pub teacher_id: &'a str,
    pub score: i64,
    pub answers: &'a AnswerMap,
    pub submission_time: chrono::DateTime<chrono::Utc>,
}

/// Attempts taken = number of result rows for the pair.
pub async fn count_by_student_and_exam(
    executor: impl sqlx::SqliteExecutor<'_>,
    student_id: &str,
    exam_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM results WHERE student_id = ?1 AND exam_id = ?2")
        .bind(student_id)
        .bind(exam_id)
        .fetch_one(executor)
        .await
}

pub async fn create(
    executor: impl sqlx::SqliteExecutor<'_>,
    params: CreateResult<'_>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO results \
             (result_id, exam_id, student_id, student_name, teacher_id, score, answers, submission_time) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(params.result_id)
    .bind(params.exam_id)
    .bind(params.student_id)
    .bind(params.student_name)
    .bind(params.teacher_id)
    .bind(params.score)
    .bind(Json(params.answers))
    .bind(params.submission_time)
    .execute(executor)
    .await?;
    Ok(())
}

/// Lists results newest first, with optional filters.
pub async fn list(
    executor: impl sqlx::SqliteExecutor<'_>,
    params: &ResultListParams,
) -> Result<Vec<ExamRecord>, sqlx::Error> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM results WHERE 1 = 1"));

    if let Some(exam_id) = &params.exam_id {
        builder.push(" AND exam_id = ");
        builder.push_bind(exam_id);
    }
    if let Some(student_id) = &params.student_id {
        builder.push(" AND student_id = ");
        builder.push_bind(student_id);
    }
    if let Some(teacher_id) = &params.teacher_id {
        builder.push(" AND teacher_id = ");
        builder.push_bind(teacher_id);
    }

    builder.push(" ORDER BY submission_time DESC, result_id");

    builder.build_query_as::<ExamRecord>().fetch_all(executor).await
}
