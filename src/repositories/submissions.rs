use sqlx::types::Json;
use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::{AssignmentSubmission, FeedbackSubmission};
use crate::schemas::shared_content::Answer;

const ASSIGNMENT_COLUMNS: &str = "\
    id, training_id, shared_assignment_id, employee_empid, answers, score, \
    total_questions, correct_answers, submitted_at";

const FEEDBACK_COLUMNS: &str = "\
    id, training_id, shared_feedback_id, employee_empid, responses, submitted_at";

pub(crate) struct CreateSubmission<'a> {
    pub training_id: i64,
    pub shared_assignment_id: i64,
    pub employee_empid: &'a str,
    pub answers: &'a [Answer],
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub submitted_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateSubmission<'_>,
) -> Result<AssignmentSubmission, sqlx::Error> {
    sqlx::query_as::<_, AssignmentSubmission>(&format!(
        "INSERT INTO assignment_submissions (
            training_id, shared_assignment_id, employee_empid, answers,
            score, total_questions, correct_answers, submitted_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
        RETURNING {ASSIGNMENT_COLUMNS}",
    ))
    .bind(params.training_id)
    .bind(params.shared_assignment_id)
    .bind(params.employee_empid)
    .bind(Json(params.answers))
    .bind(params.score)
    .bind(params.total_questions)
    .bind(params.correct_answers)
    .bind(params.submitted_at)
    .fetch_one(pool)
    .await
}

/// Employees may submit several times; the latest submission is the result.
pub(crate) async fn latest_for(
    pool: &PgPool,
    training_id: i64,
    employee_empid: &str,
) -> Result<Option<AssignmentSubmission>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentSubmission>(&format!(
        "SELECT {ASSIGNMENT_COLUMNS} FROM assignment_submissions
         WHERE training_id = $1 AND employee_empid = $2
         ORDER BY submitted_at DESC, id DESC
         LIMIT 1",
    ))
    .bind(training_id)
    .bind(employee_empid)
    .fetch_optional(pool)
    .await
}

pub(crate) struct CreateFeedbackSubmission<'a> {
    pub training_id: i64,
    pub shared_feedback_id: i64,
    pub employee_empid: &'a str,
    pub responses: &'a serde_json::Value,
    pub submitted_at: PrimitiveDateTime,
}

pub(crate) async fn create_feedback(
    pool: &PgPool,
    params: CreateFeedbackSubmission<'_>,
) -> Result<FeedbackSubmission, sqlx::Error> {
    sqlx::query_as::<_, FeedbackSubmission>(&format!(
        "INSERT INTO feedback_submissions (
            training_id, shared_feedback_id, employee_empid, responses, submitted_at
        ) VALUES ($1,$2,$3,$4,$5)
        RETURNING {FEEDBACK_COLUMNS}",
    ))
    .bind(params.training_id)
    .bind(params.shared_feedback_id)
    .bind(params.employee_empid)
    .bind(Json(params.responses))
    .bind(params.submitted_at)
    .fetch_one(pool)
    .await
}
