use sqlx::types::Json;
use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::{SharedAssignment, SharedFeedback};
use crate::schemas::shared_content::Question;

const ASSIGNMENT_COLUMNS: &str = "\
    id, training_id, trainer_username, title, description, questions, created_at, updated_at";

const FEEDBACK_COLUMNS: &str = "\
    id, training_id, trainer_username, form, created_at, updated_at";

pub(crate) struct UpsertAssignment<'a> {
    pub training_id: i64,
    pub trainer_username: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub questions: &'a [Question],
    pub now: PrimitiveDateTime,
}

/// Re-sharing replaces the content in place: the row id and created_at are
/// preserved, updated_at advances.
pub(crate) async fn upsert_assignment(
    pool: &PgPool,
    params: UpsertAssignment<'_>,
) -> Result<SharedAssignment, sqlx::Error> {
    sqlx::query_as::<_, SharedAssignment>(&format!(
        "INSERT INTO shared_assignments
            (training_id, trainer_username, title, description, questions, created_at, updated_at)
         VALUES ($1,$2,$3,$4,$5,$6,$6)
         ON CONFLICT (training_id) DO UPDATE SET
            trainer_username = EXCLUDED.trainer_username,
            title = EXCLUDED.title,
            description = EXCLUDED.description,
            questions = EXCLUDED.questions,
            updated_at = EXCLUDED.updated_at
         RETURNING {ASSIGNMENT_COLUMNS}",
    ))
    .bind(params.training_id)
    .bind(params.trainer_username)
    .bind(params.title)
    .bind(params.description)
    .bind(Json(params.questions))
    .bind(params.now)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_assignment_by_training(
    pool: &PgPool,
    training_id: i64,
) -> Result<Option<SharedAssignment>, sqlx::Error> {
    sqlx::query_as::<_, SharedAssignment>(&format!(
        "SELECT {ASSIGNMENT_COLUMNS} FROM shared_assignments WHERE training_id = $1"
    ))
    .bind(training_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_assignment(
    pool: &PgPool,
    id: i64,
    training_id: i64,
) -> Result<Option<SharedAssignment>, sqlx::Error> {
    sqlx::query_as::<_, SharedAssignment>(&format!(
        "SELECT {ASSIGNMENT_COLUMNS} FROM shared_assignments WHERE id = $1 AND training_id = $2"
    ))
    .bind(id)
    .bind(training_id)
    .fetch_optional(pool)
    .await
}

pub(crate) struct UpsertFeedback<'a> {
    pub training_id: i64,
    pub trainer_username: &'a str,
    pub form: &'a serde_json::Value,
    pub now: PrimitiveDateTime,
}

pub(crate) async fn upsert_feedback(
    pool: &PgPool,
    params: UpsertFeedback<'_>,
) -> Result<SharedFeedback, sqlx::Error> {
    sqlx::query_as::<_, SharedFeedback>(&format!(
        "INSERT INTO shared_feedback
            (training_id, trainer_username, form, created_at, updated_at)
         VALUES ($1,$2,$3,$4,$4)
         ON CONFLICT (training_id) DO UPDATE SET
            trainer_username = EXCLUDED.trainer_username,
            form = EXCLUDED.form,
            updated_at = EXCLUDED.updated_at
         RETURNING {FEEDBACK_COLUMNS}",
    ))
    .bind(params.training_id)
    .bind(params.trainer_username)
    .bind(Json(params.form))
    .bind(params.now)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_feedback_by_training(
    pool: &PgPool,
    training_id: i64,
) -> Result<Option<SharedFeedback>, sqlx::Error> {
    sqlx::query_as::<_, SharedFeedback>(&format!(
        "SELECT {FEEDBACK_COLUMNS} FROM shared_feedback WHERE training_id = $1"
    ))
    .bind(training_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_feedback(
    pool: &PgPool,
    id: i64,
    training_id: i64,
) -> Result<Option<SharedFeedback>, sqlx::Error> {
    sqlx::query_as::<_, SharedFeedback>(&format!(
        "SELECT {FEEDBACK_COLUMNS} FROM shared_feedback WHERE id = $1 AND training_id = $2"
    ))
    .bind(id)
    .bind(training_id)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::primitive_now_utc;
    use crate::schemas::shared_content::{QuestionKind, QuestionOption};
    use crate::test_support;
    use time::Duration;

    #[tokio::test]
    async fn resharing_preserves_created_at_and_advances_updated_at() {
        let Some(db) = test_support::test_db().await else {
            eprintln!("skipping: no database configured");
            return;
        };

        let questions = vec![Question {
            text: "Which layer owns retries?".to_string(),
            helper_text: None,
            kind: QuestionKind::SingleChoice,
            options: vec![QuestionOption { text: "transport".to_string(), is_correct: true }],
        }];

        let first_now = primitive_now_utc();
        let first = upsert_assignment(
            &db.pool,
            UpsertAssignment {
                training_id: 7,
                trainer_username: "jsmith",
                title: "Checkpoint",
                description: None,
                questions: &questions,
                now: first_now,
            },
        )
        .await
        .expect("first share");

        let second = upsert_assignment(
            &db.pool,
            UpsertAssignment {
                training_id: 7,
                trainer_username: "jsmith",
                title: "Checkpoint v2",
                description: Some("updated"),
                questions: &questions,
                now: first_now + Duration::seconds(5),
            },
        )
        .await
        .expect("second share");

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.updated_at, first.updated_at + Duration::seconds(5));
        assert_eq!(second.title, "Checkpoint v2");
    }
}
