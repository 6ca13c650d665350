// tests/common/mod.rs

#![allow(dead_code)]

use exam_server::{config::Config, db, routes, state::AppState};
use serde_json::Value;
use sqlx::SqlitePool;

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
}

/// Spawns the app on a random port over a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    let database_url = "sqlite::memory:".to_string();

    // 1. Create a pool (one connection: the database lives inside it)
    let pool = db::connect(&database_url, 1)
        .await
        .expect("Failed to open in-memory database");

    // 2. Run migrations
    db::migrate(&pool).await.expect("Failed to migrate database");

    // 3. Create test configuration and state
    let config = Config {
        database_url,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        cors_origins: vec!["http://localhost:5000".to_string()],
        db_max_connections: 1,
    };

    let state = AppState::new(pool.clone(), config);
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        pool,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        let response = self
            .client
            .post(&format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status().as_u16();
        let json = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn start(&self, student_id: &str, exam_id: &str) -> (u16, Value) {
        self.post(
            "/api/exam/start",
            &serde_json::json!({ "student_id": student_id, "exam_id": exam_id }),
        )
        .await
    }

    pub async fn seed_exam(&self, teacher_id: &str, exam_id: &str, allowed_attempts: i64, duration_minutes: i64) {
        sqlx::query(
            "INSERT INTO exams (exam_id, teacher_id, exam_title, school_name, duration_minutes, \
             allowed_attempts, passing_percentage, enable_analysis_report) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(exam_id)
        .bind(teacher_id)
        .bind(format!("Exam {}", exam_id))
        .bind("Central High")
        .bind(duration_minutes)
        .bind(allowed_attempts)
        .bind(50.0_f64)
        .bind(true)
        .execute(&self.pool)
        .await
        .unwrap();
    }

    pub async fn seed_question(&self, teacher_id: &str, exam_id: &str, text: &str, correct: &str) {
        let options = serde_json::json!({
            "A": format!("{} first", text),
            "B": format!("{} second", text),
            "C": format!("{} third", text),
        });
        sqlx::query(
            "INSERT INTO questions (exam_id, teacher_id, question_text, options, correct_option, image_url) \
             VALUES (?1, ?2, ?3, ?4, ?5, NULL)",
        )
        .bind(exam_id)
        .bind(teacher_id)
        .bind(text)
        .bind(options.to_string())
        .bind(correct)
        .execute(&self.pool)
        .await
        .unwrap();
    }

    pub async fn seed_student(&self, teacher_id: &str, student_id: &str, name: &str) {
        sqlx::query("INSERT INTO students (student_id, teacher_id, student_name) VALUES (?1, ?2, ?3)")
            .bind(student_id)
            .bind(teacher_id)
            .bind(name)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    pub async fn count_results(&self, student_id: &str, exam_id: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM results WHERE student_id = ?1 AND exam_id = ?2")
            .bind(student_id)
            .bind(exam_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn count_in_progress(&self, student_id: &str, exam_id: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM in_progress_exams WHERE student_id = ?1 AND exam_id = ?2")
            .bind(student_id)
            .bind(exam_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

/// Unique id with a readable prefix.
pub fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}
