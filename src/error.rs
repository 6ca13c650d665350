// src/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Failure modes of the exam session lifecycle.
/// Each one has its own reason code so clients can tell them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum ExamFailure {
    ExamNotFound,
    StudentNotAuthorized,
    ExamSettingsNotFound,
    AttemptsExhausted { attempts_taken: i64 },
    NoQuestions,
    /// Questions disappeared between session start and submission.
    NoQuestionsToGrade,
    SubmissionFailed(String),
}

impl ExamFailure {
    pub fn code(&self) -> &'static str {
        match self {
            ExamFailure::ExamNotFound => "exam_not_found",
            ExamFailure::StudentNotAuthorized => "student_not_authorized",
            ExamFailure::ExamSettingsNotFound => "exam_settings_not_found",
            ExamFailure::AttemptsExhausted { .. } => "attempts_exhausted",
            ExamFailure::NoQuestions => "no_questions",
            ExamFailure::NoQuestionsToGrade => "no_questions_to_grade",
            ExamFailure::SubmissionFailed(_) => "submission_failed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ExamFailure::ExamNotFound
            | ExamFailure::StudentNotAuthorized
            | ExamFailure::ExamSettingsNotFound
            | ExamFailure::NoQuestions => StatusCode::NOT_FOUND,
            ExamFailure::AttemptsExhausted { .. } => StatusCode::FORBIDDEN,
            ExamFailure::NoQuestionsToGrade | ExamFailure::SubmissionFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client.
    pub fn message(&self) -> String {
        match self {
            ExamFailure::ExamNotFound => "Exam not found.".to_string(),
            ExamFailure::StudentNotAuthorized => {
                "Student ID not found or not associated with this exam.".to_string()
            }
            ExamFailure::ExamSettingsNotFound => "Could not retrieve exam settings.".to_string(),
            ExamFailure::AttemptsExhausted { attempts_taken } => format!(
                "You have already taken this exam {} times. No more attempts remaining.",
                attempts_taken
            ),
            ExamFailure::NoQuestions => {
                "This exam has no questions. Please contact your teacher.".to_string()
            }
            ExamFailure::NoQuestionsToGrade => {
                "Could not find questions for this exam to calculate score.".to_string()
            }
            ExamFailure::SubmissionFailed(_) => "Exam submission failed.".to_string(),
        }
    }
}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request (validation)
    BadRequest(String),

    // Session lifecycle failures, each with its own status and reason code
    Exam(ExamFailure),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

impl From<ExamFailure> for AppError {
    fn from(failure: ExamFailure) -> Self {
        AppError::Exam(failure)
    }
}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error_message) = match &self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "validation", msg.clone()),
            AppError::Exam(failure) => {
                if let ExamFailure::SubmissionFailed(detail) = failure {
                    tracing::error!("Submission failed: {}", detail);
                }
                (failure.status(), failure.code(), failure.message())
            }
        };

        let mut body = json!({
            "error": error_message,
            "code": code,
        });
        if let AppError::Exam(ExamFailure::AttemptsExhausted { attempts_taken }) = self {
            body["attempts_taken"] = json!(attempts_taken);
        }

        (status, Json(body)).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}
