// src/models/exam.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'exams' table: exam settings owned by a teacher.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExamSpec {
    pub exam_id: String,
    pub teacher_id: String,
    pub exam_title: String,
    pub school_name: String,
    pub duration_minutes: i64,
    pub allowed_attempts: i64,
    pub passing_percentage: f64,

    /// Advisory: whether the client should show the analysis report.
    /// The report is computed either way.
    pub enable_analysis_report: bool,
}

impl ExamSpec {
    /// Full time budget of a fresh session, in seconds.
    pub fn duration_seconds(&self) -> i64 {
        self.duration_minutes * 60
    }
}
