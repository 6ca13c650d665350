// src/services/progress.rs

use sqlx::SqlitePool;

use crate::{error::AppError, models::session::ProgressSnapshot, repositories::sessions};

/// Stores the latest snapshot of an unfinished attempt.
///
/// Full replacement keyed by (student_id, exam_id): an older snapshot written
/// later wins. Concurrent save and submit are last-commit-wins as well.
pub async fn save_progress(pool: &SqlitePool, snapshot: &ProgressSnapshot) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sessions::upsert(&mut *tx, snapshot).await?;
    tx.commit().await?;

    tracing::debug!(
        "Progress saved: student={} exam={} time_left={}",
        snapshot.student_id,
        snapshot.exam_id,
        snapshot.time_left
    );
    Ok(())
}
