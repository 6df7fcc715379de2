use sqlx::{PgExecutor, PgPool};

use crate::db::models::ManagerEmployee;

const COLUMNS: &str = "\
    manager_empid, employee_empid, manager_name, employee_name, \
    manager_is_trainer, employee_is_trainer";

pub(crate) async fn delete_all(executor: impl PgExecutor<'_>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM manager_employee").execute(executor).await?;
    Ok(result.rows_affected())
}

pub(crate) struct CreateRelationship<'a> {
    pub manager_empid: &'a str,
    pub employee_empid: &'a str,
    pub manager_name: Option<&'a str>,
    pub employee_name: Option<&'a str>,
    pub manager_is_trainer: bool,
    pub employee_is_trainer: bool,
}

pub(crate) async fn insert(
    executor: impl PgExecutor<'_>,
    params: CreateRelationship<'_>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO manager_employee (
            manager_empid, employee_empid, manager_name, employee_name,
            manager_is_trainer, employee_is_trainer
        ) VALUES ($1,$2,$3,$4,$5,$6)
        ON CONFLICT (manager_empid, employee_empid) DO UPDATE SET
            manager_name = EXCLUDED.manager_name,
            employee_name = EXCLUDED.employee_name,
            manager_is_trainer = EXCLUDED.manager_is_trainer,
            employee_is_trainer = EXCLUDED.employee_is_trainer",
    )
    .bind(params.manager_empid)
    .bind(params.employee_empid)
    .bind(params.manager_name)
    .bind(params.employee_name)
    .bind(params.manager_is_trainer)
    .bind(params.employee_is_trainer)
    .execute(executor)
    .await?;
    Ok(())
}

pub(crate) async fn team_for_manager(
    pool: &PgPool,
    manager_empid: &str,
) -> Result<Vec<ManagerEmployee>, sqlx::Error> {
    sqlx::query_as::<_, ManagerEmployee>(&format!(
        "SELECT {COLUMNS} FROM manager_employee WHERE manager_empid = $1 ORDER BY employee_empid"
    ))
    .bind(manager_empid)
    .fetch_all(pool)
    .await
}

pub(crate) async fn is_manager_of(
    pool: &PgPool,
    manager_empid: &str,
    employee_empid: &str,
) -> Result<bool, sqlx::Error> {
    let found: Option<i32> = sqlx::query_scalar(
        "SELECT 1 FROM manager_employee WHERE manager_empid = $1 AND employee_empid = $2",
    )
    .bind(manager_empid)
    .bind(employee_empid)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

pub(crate) async fn employee_name_for(
    pool: &PgPool,
    employee_empid: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<String>>(
        "SELECT employee_name FROM manager_employee WHERE employee_empid = $1 LIMIT 1",
    )
    .bind(employee_empid)
    .fetch_optional(pool)
    .await
    .map(|row| row.flatten())
}

pub(crate) async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM manager_employee").fetch_one(pool).await
}
