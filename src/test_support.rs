use std::sync::{Arc, OnceLock};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Serializes tests that mutate process environment variables.
pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) struct TestDb {
    pub(crate) pool: PgPool,
    _guard: OwnedMutexGuard<()>,
}

/// Connects to the database named by DATABASE_URL or POSTGRES_*, runs the
/// migrations and truncates every table. Returns None when no database is
/// configured so DB-backed tests skip on machines without Postgres. The env
/// lock is held for the lifetime of the returned handle, serializing tests
/// that share the schema.
pub(crate) async fn test_db() -> Option<TestDb> {
    let guard = env_lock().await;
    dotenvy::dotenv().ok();

    let url = database_url()?;
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.ok()?;

    let migrations_dir =
        std::env::var("ORBIT_MIGRATIONS_DIR").unwrap_or_else(|_| "migrations".to_string());
    let migrator =
        sqlx::migrate::Migrator::new(std::path::Path::new(&migrations_dir)).await.ok()?;
    migrator.run(&pool).await.ok()?;

    reset_db(&pool).await.ok()?;

    Some(TestDb { pool, _guard: guard })
}

fn database_url() -> Option<String> {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return Some(url);
        }
    }

    let password = std::env::var("POSTGRES_PASSWORD").ok()?;
    let server = std::env::var("POSTGRES_SERVER").unwrap_or_else(|_| "localhost".into());
    let port = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".into());
    let user = std::env::var("POSTGRES_USER").unwrap_or_else(|_| "orbit".into());
    let db = std::env::var("POSTGRES_DB").unwrap_or_else(|_| "skillorbit_db".into());

    Some(format!("postgresql://{user}:{password}@{server}:{port}/{db}"))
}

pub(crate) async fn reset_db(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "TRUNCATE feedback_submissions, assignment_submissions, shared_feedback, \
         shared_assignments, training_requests, training_assignments, employee_competency, \
         manager_employee, training_details, trainers, users RESTART IDENTITY CASCADE",
    )
    .execute(pool)
    .await?;
    Ok(())
}
