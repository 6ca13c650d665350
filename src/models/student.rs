// src/models/student.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'students' table in the database.
/// A student may only take exams owned by their teacher.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Student {
    pub student_id: String,

    /// Owning teacher.
    pub teacher_id: String,

    /// Display name.
    pub student_name: String,
}
