// src/services/grading.rs

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    error::{AppError, ExamFailure},
    models::{
        exam_record::{AnalysisEntry, Submission, SubmissionResponse},
        question::Question,
        session::AnswerMap,
    },
    repositories::{exams, results, sessions, students},
};

/// Score plus the per-question breakdown of one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub score: i64,
    pub report: Vec<AnalysisEntry>,
}

/// Grades `answers` against the answer key carried by `questions`.
///
/// The report follows the order of `questions`. Unanswered questions are
/// incorrect; answers to unknown question texts are ignored.
pub fn grade(questions: &[Question], answers: &AnswerMap) -> Grade {
    let mut score = 0;
    let report = questions
        .iter()
        .map(|q| {
            let student_answer = answers.get(&q.question_text).cloned();
            let is_correct = student_answer.as_deref() == Some(q.correct_option.as_str());
            if is_correct {
                score += 1;
            }
            AnalysisEntry {
                question_text: q.question_text.clone(),
                options: q.options.0.clone(),
                student_answer,
                correct_answer: q.correct_option.clone(),
                is_correct,
            }
        })
        .collect();

    Grade { score, report }
}

/// Score as a percentage of `total`; 0 for an empty exam.
pub fn percentage(score: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (score as f64 / total as f64) * 100.0
}

/// Grades a submission against the question set as it is now, then records
/// the result and clears the in-progress snapshot in one transaction.
///
/// The student must be on the exam owner's roster and have an attempt left.
/// The stored teacher id is the exam owner's, whatever the client sent.
pub async fn submit(pool: &SqlitePool, submission: &Submission) -> Result<SubmissionResponse, AppError> {
    let owner = exams::find_owner(pool, &submission.exam_id)
        .await?
        .ok_or(ExamFailure::ExamNotFound)?;

    students::find_by_id(pool, &submission.student_id)
        .await?
        .filter(|s| s.teacher_id == owner)
        .ok_or(ExamFailure::StudentNotAuthorized)?;

    let spec = exams::find_spec(pool, &owner, &submission.exam_id)
        .await?
        .ok_or(ExamFailure::ExamSettingsNotFound)?;

    if submission.teacher_id != owner {
        tracing::warn!(
            "Submission for exam {} names teacher {}; recording owner {}",
            submission.exam_id,
            submission.teacher_id,
            owner
        );
    }

    let questions = exams::list_questions(pool, &submission.exam_id).await?;
    if questions.is_empty() {
        tracing::error!(
            "Exam {} has no questions at submission time (student {})",
            submission.exam_id,
            submission.student_id
        );
        return Err(ExamFailure::NoQuestionsToGrade.into());
    }

    let Grade { score, report } = grade(&questions, &submission.answers);
    let total_questions = questions.len() as i64;
    let percentage = percentage(score, total_questions);
    let passed = percentage >= spec.passing_percentage;

    let result_id = Uuid::new_v4().to_string();
    finalize(pool, submission, &owner, spec.allowed_attempts, &result_id, score).await?;

    tracing::info!(
        "Submission graded: student={} exam={} score={}/{} result={}",
        submission.student_id,
        submission.exam_id,
        score,
        total_questions,
        result_id
    );

    Ok(SubmissionResponse {
        message: "Exam submitted successfully.".to_string(),
        result_id,
        score,
        total_questions,
        percentage,
        passed,
        analysis_report: report,
    })
}

/// Inserts the result row, checks the attempt limit and deletes the
/// in-progress row. Either all of it commits or the transaction is rolled
/// back on drop.
///
/// The insert comes before the count so the write lock is held while counting.
async fn finalize(
    pool: &SqlitePool,
    submission: &Submission,
    teacher_id: &str,
    allowed_attempts: i64,
    result_id: &str,
    score: i64,
) -> Result<(), AppError> {
    let failed = |e: sqlx::Error| ExamFailure::SubmissionFailed(e.to_string());

    let mut tx = pool.begin().await.map_err(failed)?;

    results::create(
        &mut *tx,
        results::CreateResult {
            result_id,
            exam_id: &submission.exam_id,
            student_id: &submission.student_id,
            student_name: &submission.student_name,
            teacher_id,
            score,
            answers: &submission.answers,
            submission_time: chrono::Utc::now(),
        },
    )
    .await
    .map_err(failed)?;

    let attempts = results::count_by_student_and_exam(&mut *tx, &submission.student_id, &submission.exam_id)
        .await
        .map_err(failed)?;
    if attempts > allowed_attempts {
        tracing::warn!(
            "Student {} denied submission for exam {}: {} of {} attempts used",
            submission.student_id,
            submission.exam_id,
            attempts - 1,
            allowed_attempts
        );
        return Err(ExamFailure::AttemptsExhausted { attempts_taken: attempts - 1 }.into());
    }

    sessions::delete(&mut *tx, &submission.student_id, &submission.exam_id)
        .await
        .map_err(failed)?;

    tx.commit().await.map_err(failed)?;
    Ok(())
}
