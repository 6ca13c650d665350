// src/repositories/students.rs

use crate::models::student::Student;

pub async fn find_by_id(
    executor: impl sqlx::SqliteExecutor<'_>,
    student_id: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT student_id, teacher_id, student_name FROM students WHERE student_id = ?1",
    )
    .bind(student_id)
    .fetch_optional(executor)
    .await
}
