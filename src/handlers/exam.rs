// src/handlers/exam.rs

use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        exam_record::SubmitExamRequest,
        session::{SaveProgressRequest, StartSessionRequest},
    },
    services::{eligibility, grading, progress},
};

/// Checks eligibility and returns the exam with a freshly shuffled question
/// order plus any saved progress.
///
/// * 404 when the exam, the student's enrolment, the settings or the questions are missing.
/// * 403 when all attempts are used.
pub async fn start_exam(
    State(pool): State<SqlitePool>,
    payload: Result<Json<StartSessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let (student_id, exam_id) = req.into_keys()?;

    let mut rng = StdRng::from_entropy();
    let start = eligibility::start_session(&pool, &mut rng, &student_id, &exam_id).await?;

    Ok(Json(start))
}

/// Saves in-progress answers, statuses and remaining time.
/// Replaces whatever was stored before for this student and exam.
pub async fn save_progress(
    State(pool): State<SqlitePool>,
    payload: Result<Json<SaveProgressRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let snapshot = req.into_snapshot()?;

    progress::save_progress(&pool, &snapshot).await?;

    Ok(Json(json!({ "message": "Progress saved successfully." })))
}

/// Grades a finished attempt, records it and clears saved progress.
pub async fn submit_exam(
    State(pool): State<SqlitePool>,
    payload: Result<Json<SubmitExamRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let submission = req.into_submission()?;

    let response = grading::submit(&pool, &submission).await?;

    Ok(Json(response))
}
