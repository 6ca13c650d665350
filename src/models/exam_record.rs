// src/models/exam_record.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

use crate::{
    error::AppError,
    models::{question::OptionMap, session::AnswerMap},
    utils::validation::require,
};

/// Represents the 'results' table in the database.
/// One immutable row per completed attempt.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExamRecord {
    pub result_id: String,
    pub exam_id: String,
    pub student_id: String,
    pub student_name: String,
    pub teacher_id: String,
    pub score: i64,
    /// Raw answer map exactly as submitted.
    pub answers: Json<AnswerMap>,
    pub submission_time: chrono::DateTime<chrono::Utc>,
}

/// DTO for `POST /api/exam/submit`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitExamRequest {
    #[validate(length(min = 1, max = 128))]
    pub exam_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub student_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub student_name: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub teacher_id: Option<String>,

    /// Key: question text. Value: chosen option label.
    pub answers: Option<AnswerMap>,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub exam_id: String,
    pub student_id: String,
    pub student_name: String,
    pub teacher_id: String,
    pub answers: AnswerMap,
}

impl SubmitExamRequest {
    pub fn into_submission(self) -> Result<Submission, AppError> {
        self.validate()?;
        Ok(Submission {
            exam_id: require(self.exam_id, "exam_id")?,
            student_id: require(self.student_id, "student_id")?,
            student_name: require(self.student_name, "student_name")?,
            teacher_id: require(self.teacher_id, "teacher_id")?,
            answers: require(self.answers, "answers")?,
        })
    }
}

/// Per-question line of the analysis report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub question_text: String,
    pub options: OptionMap,
    pub student_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Response for a graded submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub message: String,
    pub result_id: String,
    pub score: i64,
    pub total_questions: i64,
    pub percentage: f64,
    pub passed: bool,
    /// Always present; `enable_analysis_report` only tells the client whether to show it.
    pub analysis_report: Vec<AnalysisEntry>,
}

/// Query parameters for listing results.
#[derive(Debug, Default, Deserialize)]
pub struct ResultListParams {
    pub exam_id: Option<String>,
    pub student_id: Option<String>,
    pub teacher_id: Option<String>,
}
