use sqlx::{PgExecutor, PgPool};

pub(crate) async fn delete_all(executor: impl PgExecutor<'_>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM trainers").execute(executor).await?;
    Ok(result.rows_affected())
}

pub(crate) struct CreateTrainer<'a> {
    pub skill: &'a str,
    pub competency: &'a str,
    pub trainer_name: &'a str,
    pub expertise_level: &'a str,
}

pub(crate) async fn insert(
    executor: impl PgExecutor<'_>,
    params: CreateTrainer<'_>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO trainers (skill, competency, trainer_name, expertise_level)
         VALUES ($1,$2,$3,$4)",
    )
    .bind(params.skill)
    .bind(params.competency)
    .bind(params.trainer_name)
    .bind(params.expertise_level)
    .execute(executor)
    .await?;
    Ok(())
}

pub(crate) async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trainers").fetch_one(pool).await
}
