// src/services/eligibility.rs

use rand::Rng;
use sqlx::SqlitePool;

use crate::{
    error::{AppError, ExamFailure},
    models::{
        question::PublicQuestion,
        session::{AnswerMap, ExamData, SessionStartPayload, StatusMap},
    },
    repositories::{exams, results, sessions, students},
    services::shuffler::shuffle,
};

/// Checks whether a student may start (or resume) an exam and assembles the
/// session-start payload.
///
/// Checks run in order and each has its own failure:
/// exam exists, student belongs to the exam's teacher, settings exist,
/// attempts remain, questions exist.
///
/// Read-only. Question order is re-randomized on every call, resumes included.
pub async fn start_session<R>(
    pool: &SqlitePool,
    rng: &mut R,
    student_id: &str,
    exam_id: &str,
) -> Result<SessionStartPayload, AppError>
where
    R: Rng + Send + ?Sized,
{
    let owner = exams::find_owner(pool, exam_id)
        .await?
        .ok_or(ExamFailure::ExamNotFound)?;

    let student = students::find_by_id(pool, student_id)
        .await?
        .filter(|s| s.teacher_id == owner)
        .ok_or(ExamFailure::StudentNotAuthorized)?;

    let spec = exams::find_spec(pool, &owner, exam_id)
        .await?
        .ok_or(ExamFailure::ExamSettingsNotFound)?;

    let attempts_taken = results::count_by_student_and_exam(pool, student_id, exam_id).await?;
    if attempts_taken >= spec.allowed_attempts {
        tracing::warn!(
            "Student {} denied exam {}: {} of {} attempts used",
            student_id,
            exam_id,
            attempts_taken,
            spec.allowed_attempts
        );
        return Err(ExamFailure::AttemptsExhausted { attempts_taken }.into());
    }

    let questions = exams::list_questions(pool, exam_id).await?;
    if questions.is_empty() {
        return Err(ExamFailure::NoQuestions.into());
    }

    let in_progress = sessions::find(pool, student_id, exam_id).await?;
    let resumed = in_progress.is_some();
    let (answers, question_status, time_left) = match in_progress {
        Some(session) => (session.answers.0, session.question_status.0, session.time_left),
        None => (AnswerMap::new(), StatusMap::new(), spec.duration_seconds()),
    };

    let public: Vec<PublicQuestion> = questions.into_iter().map(PublicQuestion::from).collect();
    let questions = shuffle(public, rng);
    let attempt_number = attempts_taken + 1;

    tracing::info!(
        "Session start: student={} exam={} attempt={} resumed={}",
        student_id,
        exam_id,
        attempt_number,
        resumed
    );

    Ok(SessionStartPayload {
        message: "Eligibility check passed.".to_string(),
        student_name: student.student_name,
        teacher_id: student.teacher_id,
        exam_data: ExamData {
            exam_title: spec.exam_title,
            school_name: spec.school_name,
            duration: spec.duration_minutes,
            allowed_attempts: spec.allowed_attempts,
            passing_percentage: spec.passing_percentage,
            enable_analysis_report: spec.enable_analysis_report,
            questions,
            answers,
            question_status,
            time_left,
            attempt_number,
        },
    })
}
