// tests/error_path_tests.rs

mod common;

use common::{spawn_app, unique};
use serde_json::json;

#[tokio::test]
async fn unknown_exam_is_not_found() {
    let app = spawn_app().await;
    let student = unique("s");
    app.seed_student("t_any", &student, "Ada").await;

    let (status, body) = app.start(&student, "no_such_exam").await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "exam_not_found");
}

#[tokio::test]
async fn student_of_another_teacher_is_rejected() {
    let app = spawn_app().await;
    let (teacher, exam, student) = (unique("t"), unique("e"), unique("s"));
    app.seed_exam(&teacher, &exam, 1, 10).await;
    app.seed_question(&teacher, &exam, "Q1", "A").await;
    app.seed_student("someone_else", &student, "Ada").await;

    let (status, body) = app.start(&student, &exam).await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "student_not_authorized");

    let (status, body) = app.start("ghost_student", &exam).await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "student_not_authorized");
}

#[tokio::test]
async fn exam_without_questions_is_not_found() {
    let app = spawn_app().await;
    let (teacher, exam, student) = (unique("t"), unique("e"), unique("s"));
    app.seed_exam(&teacher, &exam, 1, 10).await;
    app.seed_student(&teacher, &student, "Ada").await;

    let (status, body) = app.start(&student, &exam).await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "no_questions");
}

#[tokio::test]
async fn questions_without_settings_report_missing_settings() {
    let app = spawn_app().await;
    let (teacher, exam, student) = (unique("t"), unique("e"), unique("s"));

    // Orphan questions can only exist with the foreign key switched off.
    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(&app.pool)
        .await
        .unwrap();
    app.seed_question(&teacher, &exam, "Q1", "A").await;
    app.seed_student(&teacher, &student, "Ada").await;

    let (status, body) = app.start(&student, &exam).await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "exam_settings_not_found");
}

#[tokio::test]
async fn start_requires_both_ids() {
    let app = spawn_app().await;

    let (status, body) = app
        .post("/api/exam/start", &json!({ "student_id": "s1" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "validation");
    assert!(body["error"].as_str().unwrap().contains("exam_id"));
}

#[tokio::test]
async fn save_progress_rejects_missing_fields() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/api/exam/save-progress",
            &json!({
                "student_id": "s1",
                "exam_id": "e1",
                "teacher_id": "t1",
                "answers": {},
                "question_status": {}
            }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "validation");
    assert!(body["error"].as_str().unwrap().contains("time_left"));
    assert_eq!(app.count_in_progress("s1", "e1").await, 0);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(&format!("{}/api/exam/save-progress", app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn submit_without_questions_is_internal_error() {
    let app = spawn_app().await;
    let (teacher, exam, student) = (unique("t"), unique("e"), unique("s"));
    app.seed_exam(&teacher, &exam, 1, 10).await;
    app.seed_student(&teacher, &student, "Ada").await;

    let (status, body) = app
        .post(
            "/api/exam/submit",
            &json!({
                "exam_id": exam,
                "student_id": student,
                "student_name": "Ada",
                "teacher_id": teacher,
                "answers": { "Q1": "A" }
            }),
        )
        .await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], "no_questions_to_grade");
    assert_eq!(app.count_results(&student, &exam).await, 0);
}

#[tokio::test]
async fn failed_finalize_leaves_no_partial_state() {
    let app = spawn_app().await;
    let (teacher, exam, student) = (unique("t"), unique("e"), unique("s"));
    app.seed_exam(&teacher, &exam, 1, 10).await;
    app.seed_question(&teacher, &exam, "Q1", "A").await;
    app.seed_student(&teacher, &student, "Ada").await;

    app.post(
        "/api/exam/save-progress",
        &json!({
            "student_id": student,
            "exam_id": exam,
            "teacher_id": teacher,
            "answers": { "Q1": "A" },
            "question_status": {},
            "time_left": 60
        }),
    )
    .await;

    // Make clearing the in-progress row fail after the result insert.
    sqlx::query(
        "CREATE TRIGGER fail_clear BEFORE DELETE ON in_progress_exams \
         BEGIN SELECT RAISE(ABORT, 'simulated storage failure'); END",
    )
    .execute(&app.pool)
    .await
    .unwrap();

    let (status, body) = app
        .post(
            "/api/exam/submit",
            &json!({
                "exam_id": exam,
                "student_id": student,
                "student_name": "Ada",
                "teacher_id": teacher,
                "answers": { "Q1": "A" }
            }),
        )
        .await;

    assert_eq!(status, 500);
    assert_eq!(body["code"], "submission_failed");
    assert!(!body["error"].as_str().unwrap().contains("simulated"));
    assert_eq!(app.count_results(&student, &exam).await, 0);
    assert_eq!(app.count_in_progress(&student, &exam).await, 1);
}

#[tokio::test]
async fn results_listing_filters_by_exam_and_student() {
    let app = spawn_app().await;
    let teacher = unique("t");
    let (exam_a, exam_b) = (unique("e"), unique("e"));
    let (ada, bob) = (unique("s"), unique("s"));
    for exam in [&exam_a, &exam_b] {
        app.seed_exam(&teacher, exam, 2, 10).await;
        app.seed_question(&teacher, exam, "Q1", "A").await;
    }
    app.seed_student(&teacher, &ada, "Ada").await;
    app.seed_student(&teacher, &bob, "Bob").await;

    for (student, name, exam) in [(&ada, "Ada", &exam_a), (&bob, "Bob", &exam_a), (&ada, "Ada", &exam_b)] {
        let (status, _) = app
            .post(
                "/api/exam/submit",
                &json!({
                    "exam_id": exam,
                    "student_id": student,
                    "student_name": name,
                    "teacher_id": teacher,
                    "answers": { "Q1": "A" }
                }),
            )
            .await;
        assert_eq!(status, 200);
    }

    let all: Vec<serde_json::Value> = app
        .client
        .get(&format!("{}/api/results?teacher_id={}", app.address, teacher))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let filtered: Vec<serde_json::Value> = app
        .client
        .get(&format!("{}/api/results?exam_id={}&student_id={}", app.address, exam_a, ada))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["student_name"], "Ada");
    assert_eq!(filtered[0]["score"], 1);
    assert_eq!(filtered[0]["answers"], json!({ "Q1": "A" }));
}

#[tokio::test]
async fn wrongly_typed_field_is_bad_request() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/api/exam/save-progress",
            &json!({
                "student_id": "s1",
                "exam_id": "e1",
                "teacher_id": "t1",
                "answers": {},
                "question_status": {},
                "time_left": "ten minutes"
            }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "validation");
    assert_eq!(app.count_in_progress("s1", "e1").await, 0);
}
