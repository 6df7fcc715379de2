use sqlx::{PgExecutor, PgPool};
use time::Date;

use crate::db::models::TrainingDetail;

const COLUMNS: &str = "\
    id, division, department, competency, skill, training_name, training_topics, \
    prerequisites, skill_category, trainer_name, email, training_date, duration, \
    time_slot, training_type, seats, assessment_details";

pub(crate) async fn delete_all(executor: impl PgExecutor<'_>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM training_details").execute(executor).await?;
    Ok(result.rows_affected())
}

pub(crate) struct CreateTraining<'a> {
    pub division: Option<&'a str>,
    pub department: Option<&'a str>,
    pub competency: Option<&'a str>,
    pub skill: Option<&'a str>,
    pub training_name: &'a str,
    pub training_topics: Option<&'a str>,
    pub prerequisites: Option<&'a str>,
    pub skill_category: Option<&'a str>,
    pub trainer_name: &'a str,
    pub email: Option<&'a str>,
    pub training_date: Option<Date>,
    pub duration: Option<&'a str>,
    pub time_slot: Option<&'a str>,
    pub training_type: Option<&'a str>,
    pub seats: Option<&'a str>,
    pub assessment_details: Option<&'a str>,
}

pub(crate) async fn insert(
    executor: impl PgExecutor<'_>,
    params: CreateTraining<'_>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO training_details (
            division, department, competency, skill, training_name, training_topics,
            prerequisites, skill_category, trainer_name, email, training_date,
            duration, time_slot, training_type, seats, assessment_details
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)",
    )
    .bind(params.division)
    .bind(params.department)
    .bind(params.competency)
    .bind(params.skill)
    .bind(params.training_name)
    .bind(params.training_topics)
    .bind(params.prerequisites)
    .bind(params.skill_category)
    .bind(params.trainer_name)
    .bind(params.email)
    .bind(params.training_date)
    .bind(params.duration)
    .bind(params.time_slot)
    .bind(params.training_type)
    .bind(params.seats)
    .bind(params.assessment_details)
    .execute(executor)
    .await?;
    Ok(())
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    id: i64,
) -> Result<Option<TrainingDetail>, sqlx::Error> {
    sqlx::query_as::<_, TrainingDetail>(&format!(
        "SELECT {COLUMNS} FROM training_details WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM training_details").fetch_one(pool).await
}
