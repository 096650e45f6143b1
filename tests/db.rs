use exercise_tracker::db::init_pool;
use std::path::PathBuf;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("exercise-db-{}", uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn init_pool_creates_missing_directories() {
    let dir = scratch_dir();
    let db_path = dir.join("nested").join("tracker.db");

    let pool = init_pool(&format!("sqlite:{}", db_path.display()))
        .await
        .unwrap();

    let tables: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'exercises') ORDER BY name")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(tables, vec![("exercises".to_string(),), ("users".to_string(),)]);
    assert!(db_path.exists());

    pool.close().await;
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn init_pool_reports_unusable_directory() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    // A regular file where the database directory should go
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, b"").unwrap();

    let result = init_pool(&format!("sqlite:{}", blocker.join("tracker.db").display())).await;
    assert!(result.is_err());

    std::fs::remove_dir_all(&dir).ok();
}
