// src/models/session.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

use crate::{error::AppError, models::question::PublicQuestion, utils::validation::require};

/// Question text to the chosen option label.
pub type AnswerMap = BTreeMap<String, String>;

/// Question text to a client-defined status (e.g. "answered", "flagged").
pub type StatusMap = BTreeMap<String, String>;

/// Represents the 'in_progress_exams' table.
/// At most one row per (student_id, exam_id); every save replaces it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct InProgressSession {
    pub student_id: String,
    pub exam_id: String,
    pub teacher_id: String,
    pub answers: Json<AnswerMap>,
    pub question_status: Json<StatusMap>,
    /// Remaining time in seconds.
    pub time_left: i64,
}

/// DTO for `POST /api/exam/start`.
#[derive(Debug, Deserialize, Validate)]
pub struct StartSessionRequest {
    #[validate(length(min = 1, max = 128))]
    pub student_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub exam_id: Option<String>,
}

impl StartSessionRequest {
    /// Returns `(student_id, exam_id)`.
    pub fn into_keys(self) -> Result<(String, String), AppError> {
        self.validate()?;
        Ok((
            require(self.student_id, "student_id")?,
            require(self.exam_id, "exam_id")?,
        ))
    }
}

/// Exam block of the session-start payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamData {
    pub exam_title: String,
    pub school_name: String,
    /// Minutes.
    pub duration: i64,
    pub allowed_attempts: i64,
    pub passing_percentage: f64,
    pub enable_analysis_report: bool,
    /// Freshly shuffled on every call, resumes included.
    pub questions: Vec<PublicQuestion>,
    pub answers: AnswerMap,
    pub question_status: StatusMap,
    pub time_left: i64,
    pub attempt_number: i64,
}

/// Response for a successful eligibility check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStartPayload {
    pub message: String,
    pub student_name: String,
    pub teacher_id: String,
    pub exam_data: ExamData,
}

/// DTO for `POST /api/exam/save-progress`.
/// Every field is required; maps may be empty.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveProgressRequest {
    #[validate(length(min = 1, max = 128))]
    pub student_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub exam_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub teacher_id: Option<String>,
    pub answers: Option<AnswerMap>,
    pub question_status: Option<StatusMap>,
    #[validate(range(min = 0))]
    pub time_left: Option<i64>,
}

/// A validated progress snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub student_id: String,
    pub exam_id: String,
    pub teacher_id: String,
    pub answers: AnswerMap,
    pub question_status: StatusMap,
    pub time_left: i64,
}

impl SaveProgressRequest {
    pub fn into_snapshot(self) -> Result<ProgressSnapshot, AppError> {
        self.validate()?;
        Ok(ProgressSnapshot {
            student_id: require(self.student_id, "student_id")?,
            exam_id: require(self.exam_id, "exam_id")?,
            teacher_id: require(self.teacher_id, "teacher_id")?,
            answers: require(self.answers, "answers")?,
            question_status: require(self.question_status, "question_status")?,
            time_left: require(self.time_left, "time_left")?,
        })
    }
}
