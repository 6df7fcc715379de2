use sqlx::{PgExecutor, PgPool};
use time::Date;

pub(crate) async fn delete_all(executor: impl PgExecutor<'_>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM employee_competency").execute(executor).await?;
    Ok(result.rows_affected())
}

pub(crate) struct CreateCompetency<'a> {
    pub employee_empid: &'a str,
    pub employee_name: Option<&'a str>,
    pub department: Option<&'a str>,
    pub division: Option<&'a str>,
    pub project: Option<&'a str>,
    pub role_specific_comp: Option<&'a str>,
    pub designation: Option<&'a str>,
    pub competency: Option<&'a str>,
    pub skill: Option<&'a str>,
    pub current_expertise: Option<&'a str>,
    pub target_expertise: Option<&'a str>,
    pub comments: Option<&'a str>,
    pub target_date: Option<Date>,
}

pub(crate) async fn insert(
    executor: impl PgExecutor<'_>,
    params: CreateCompetency<'_>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO employee_competency (
            employee_empid, employee_name, department, division, project,
            role_specific_comp, designation, competency, skill,
            current_expertise, target_expertise, comments, target_date
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)",
    )
    .bind(params.employee_empid)
    .bind(params.employee_name)
    .bind(params.department)
    .bind(params.division)
    .bind(params.project)
    .bind(params.role_specific_comp)
    .bind(params.designation)
    .bind(params.competency)
    .bind(params.skill)
    .bind(params.current_expertise)
    .bind(params.target_expertise)
    .bind(params.comments)
    .bind(params.target_date)
    .execute(executor)
    .await?;
    Ok(())
}

/// Backfills linked_user_id for rows whose empid matches a registered
/// username. Safe to run at any time.
pub(crate) async fn link_registered_users(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE employee_competency ec
         SET linked_user_id = u.id
         FROM users u
         WHERE ec.linked_user_id IS NULL AND ec.employee_empid = u.username",
    )
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee_competency").fetch_one(pool).await
}
