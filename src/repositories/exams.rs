// src/repositories/exams.rs

use crate::models::{exam::ExamSpec, question::Question};

const SPEC_COLUMNS: &str = "\
    exam_id, teacher_id, exam_title, school_name, duration_minutes, \
    allowed_attempts, passing_percentage, enable_analysis_report";

const QUESTION_COLUMNS: &str =
    "id, exam_id, teacher_id, question_text, options, correct_option, image_url";

/// Resolves the owning teacher of an exam from either its settings row or
/// any question attached to it.
pub async fn find_owner(
    executor: impl sqlx::SqliteExecutor<'_>,
    exam_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT teacher_id FROM exams WHERE exam_id = ?1 \
         UNION ALL \
         SELECT teacher_id FROM questions WHERE exam_id = ?2 \
         LIMIT 1",
    )
    .bind(exam_id)
    .bind(exam_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_spec(
    executor: impl sqlx::SqliteExecutor<'_>,
    teacher_id: &str,
    exam_id: &str,
) -> Result<Option<ExamSpec>, sqlx::Error> {
    sqlx::query_as::<_, ExamSpec>(&format!(
        "SELECT {SPEC_COLUMNS} FROM exams WHERE teacher_id = ?1 AND exam_id = ?2"
    ))
    .bind(teacher_id)
    .bind(exam_id)
    .fetch_optional(executor)
    .await
}

/// All questions of an exam in authoritative order.
pub async fn list_questions(
    executor: impl sqlx::SqliteExecutor<'_>,
    exam_id: &str,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM questions WHERE exam_id = ?1 ORDER BY id"
    ))
    .bind(exam_id)
    .fetch_all(executor)
    .await
}
