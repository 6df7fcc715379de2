use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::TrainingRequest;

const COLUMNS: &str = "\
    id, training_id, employee_empid, manager_empid, status, manager_notes, \
    requested_at, responded_at";

pub(crate) async fn create(
    pool: &PgPool,
    training_id: i64,
    employee_empid: &str,
    requested_at: PrimitiveDateTime,
) -> Result<TrainingRequest, sqlx::Error> {
    sqlx::query_as::<_, TrainingRequest>(&format!(
        "INSERT INTO training_requests (training_id, employee_empid, requested_at)
         VALUES ($1,$2,$3)
         RETURNING {COLUMNS}",
    ))
    .bind(training_id)
    .bind(employee_empid)
    .bind(requested_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    id: i64,
) -> Result<Option<TrainingRequest>, sqlx::Error> {
    sqlx::query_as::<_, TrainingRequest>(&format!(
        "SELECT {COLUMNS} FROM training_requests WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn exists_pending(
    pool: &PgPool,
    training_id: i64,
    employee_empid: &str,
) -> Result<bool, sqlx::Error> {
    let found: Option<i32> = sqlx::query_scalar(
        "SELECT 1 FROM training_requests
         WHERE training_id = $1 AND employee_empid = $2 AND status = 'pending'",
    )
    .bind(training_id)
    .bind(employee_empid)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

pub(crate) async fn list_for_employee(
    pool: &PgPool,
    employee_empid: &str,
) -> Result<Vec<TrainingRequest>, sqlx::Error> {
    sqlx::query_as::<_, TrainingRequest>(&format!(
        "SELECT {COLUMNS} FROM training_requests WHERE employee_empid = $1 ORDER BY id DESC"
    ))
    .bind(employee_empid)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_for_manager_team(
    pool: &PgPool,
    manager_empid: &str,
) -> Result<Vec<TrainingRequest>, sqlx::Error> {
    sqlx::query_as::<_, TrainingRequest>(
        "SELECT tr.id, tr.training_id, tr.employee_empid, tr.manager_empid, tr.status,
                tr.manager_notes, tr.requested_at, tr.responded_at
         FROM training_requests tr
         JOIN manager_employee me ON me.employee_empid = tr.employee_empid
         WHERE me.manager_empid = $1
         ORDER BY tr.id DESC",
    )
    .bind(manager_empid)
    .fetch_all(pool)
    .await
}

pub(crate) async fn respond(
    pool: &PgPool,
    id: i64,
    manager_empid: &str,
    status: &str,
    manager_notes: Option<&str>,
    responded_at: PrimitiveDateTime,
) -> Result<TrainingRequest, sqlx::Error> {
    sqlx::query_as::<_, TrainingRequest>(&format!(
        "UPDATE training_requests
         SET status = $1, manager_notes = $2, manager_empid = $3, responded_at = $4
         WHERE id = $5
         RETURNING {COLUMNS}",
    ))
    .bind(status)
    .bind(manager_notes)
    .bind(manager_empid)
    .bind(responded_at)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub(crate) async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM training_requests").fetch_one(pool).await
}
