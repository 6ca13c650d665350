// src/repositories/sessions.rs

use sqlx::types::Json;

use crate::models::session::{InProgressSession, ProgressSnapshot};

pub async fn find(
    executor: impl sqlx::SqliteExecutor<'_>,
    student_id: &str,
    exam_id: &str,
) -> Result<Option<InProgressSession>, sqlx::Error> {
    sqlx::query_as::<_, InProgressSession>(
        "SELECT student_id, exam_id, teacher_id, answers, question_status, time_left \
         FROM in_progress_exams WHERE student_id = ?1 AND exam_id = ?2",
    )
    .bind(student_id)
    .bind(exam_id)
    .fetch_optional(executor)
    .await
}

/// Replaces the stored snapshot for (student_id, exam_id). Not a merge.
pub async fn upsert(
    executor: impl sqlx::SqliteExecutor<'_>,
    snapshot: &ProgressSnapshot,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO in_progress_exams \
             (student_id, exam_id, teacher_id, answers, question_status, time_left, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
         ON CONFLICT (student_id, exam_id) DO UPDATE SET \
             teacher_id = excluded.teacher_id, \
             answers = excluded.answers, \
             question_status = excluded.question_status, \
             time_left = excluded.time_left, \
             updated_at = excluded.updated_at",
    )
    .bind(&snapshot.student_id)
    .bind(&snapshot.exam_id)
    .bind(&snapshot.teacher_id)
    .bind(Json(&snapshot.answers))
    .bind(Json(&snapshot.question_status))
    .bind(snapshot.time_left)
    .bind(chrono::Utc::now())
    .execute(executor)
    .await?;
    Ok(())
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete(
    executor: impl sqlx::SqliteExecutor<'_>,
    student_id: &str,
    exam_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM in_progress_exams WHERE student_id = ?1 AND exam_id = ?2")
        .bind(student_id)
        .bind(exam_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
