use sqlx::{PgExecutor, PgPool};
use time::PrimitiveDateTime;

use crate::db::models::{TrainingAssignment, TrainingDetail};

const COLUMNS: &str = "id, training_id, employee_empid, manager_empid, assigned_at";

pub(crate) async fn delete_all(executor: impl PgExecutor<'_>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM training_assignments").execute(executor).await?;
    Ok(result.rows_affected())
}

pub(crate) struct CreateAssignment<'a> {
    pub training_id: i64,
    pub employee_empid: &'a str,
    pub manager_empid: &'a str,
    pub assigned_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAssignment<'_>,
) -> Result<TrainingAssignment, sqlx::Error> {
    sqlx::query_as::<_, TrainingAssignment>(&format!(
        "INSERT INTO training_assignments (training_id, employee_empid, manager_empid, assigned_at)
         VALUES ($1,$2,$3,$4)
         RETURNING {COLUMNS}",
    ))
    .bind(params.training_id)
    .bind(params.employee_empid)
    .bind(params.manager_empid)
    .bind(params.assigned_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn exists(
    pool: &PgPool,
    training_id: i64,
    employee_empid: &str,
) -> Result<bool, sqlx::Error> {
    let found: Option<i32> = sqlx::query_scalar(
        "SELECT 1 FROM training_assignments WHERE training_id = $1 AND employee_empid = $2",
    )
    .bind(training_id)
    .bind(employee_empid)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

pub(crate) async fn trainings_for_employee(
    pool: &PgPool,
    employee_empid: &str,
) -> Result<Vec<TrainingDetail>, sqlx::Error> {
    sqlx::query_as::<_, TrainingDetail>(
        "SELECT td.id, td.division, td.department, td.competency, td.skill, td.training_name,
                td.training_topics, td.prerequisites, td.skill_category, td.trainer_name,
                td.email, td.training_date, td.duration, td.time_slot, td.training_type,
                td.seats, td.assessment_details
         FROM training_details td
         JOIN training_assignments ta ON ta.training_id = td.id
         WHERE ta.employee_empid = $1
         ORDER BY td.id",
    )
    .bind(employee_empid)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_for_manager(
    pool: &PgPool,
    manager_empid: &str,
) -> Result<Vec<TrainingAssignment>, sqlx::Error> {
    sqlx::query_as::<_, TrainingAssignment>(&format!(
        "SELECT {COLUMNS} FROM training_assignments WHERE manager_empid = $1 ORDER BY id"
    ))
    .bind(manager_empid)
    .fetch_all(pool)
    .await
}

pub(crate) async fn delete(
    pool: &PgPool,
    training_id: i64,
    employee_empid: &str,
    manager_empid: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM training_assignments
         WHERE training_id = $1 AND employee_empid = $2 AND manager_empid = $3",
    )
    .bind(training_id)
    .bind(employee_empid)
    .bind(manager_empid)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
