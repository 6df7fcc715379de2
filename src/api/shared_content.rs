//! Trainer-shared assignments and feedback forms.
//!
//! Trainers publish content per training. Assigned employees see a redacted
//! view without the answer key, submit answers for automatic scoring, and
//! read back their latest result.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::core::time::{format_primitive, primitive_now_utc};
use crate::db::models::{SharedAssignment, SharedFeedback, TrainingDetail};
use crate::repositories;
use crate::schemas::shared_content::{
    AssignmentResultResponse, AssignmentSubmissionCreate, EmployeeAssignmentResponse,
    FeedbackSubmissionCreate, FeedbackSubmissionResponse, SharedAssignmentCreate,
    SharedAssignmentResponse, SharedFeedbackCreate, SharedFeedbackResponse,
};
use crate::services::{grading, trainer_identity};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/assignments", post(share_assignment))
        .route("/assignments/submit", post(submit_assignment))
        .route("/assignments/:training_id", get(employee_assignment))
        .route("/assignments/:training_id/result", get(assignment_result))
        .route("/trainer/assignments/:training_id", get(trainer_assignment))
        .route("/feedback", post(share_feedback))
        .route("/feedback/submit", post(submit_feedback))
        .route("/feedback/:training_id", get(employee_feedback))
        .route("/trainer/feedback/:training_id", get(trainer_feedback))
}

async fn load_training(state: &AppState, training_id: i64) -> Result<TrainingDetail, ApiError> {
    let training = repositories::trainings::find_by_id(state.db(), training_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load training"))?;

    training.ok_or_else(|| ApiError::NotFound("Training not found".to_string()))
}

async fn require_trainer(
    state: &AppState,
    training: &TrainingDetail,
    username: &str,
) -> Result<(), ApiError> {
    let is_trainer = trainer_identity::is_training_trainer(state.db(), training, username)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to verify trainer"))?;

    if is_trainer {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Only the training's trainer can manage its shared content"))
    }
}

async fn require_assigned(
    state: &AppState,
    training_id: i64,
    employee_empid: &str,
) -> Result<(), ApiError> {
    let assigned = repositories::assignments::exists(state.db(), training_id, employee_empid)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check assignment"))?;

    if assigned {
        Ok(())
    } else {
        Err(ApiError::Forbidden("You are not assigned to this training"))
    }
}

fn assignment_response(model: SharedAssignment) -> SharedAssignmentResponse {
    SharedAssignmentResponse {
        id: model.id,
        training_id: model.training_id,
        trainer_username: model.trainer_username,
        title: model.title,
        description: model.description,
        questions: model.questions.0,
        created_at: format_primitive(model.created_at),
        updated_at: format_primitive(model.updated_at),
    }
}

fn feedback_response(model: SharedFeedback) -> SharedFeedbackResponse {
    let form = model.form.0;
    let section = |key: &str| -> Vec<serde_json::Value> {
        form.get(key).and_then(|v| v.as_array()).cloned().unwrap_or_default()
    };

    SharedFeedbackResponse {
        id: model.id,
        training_id: model.training_id,
        trainer_username: model.trainer_username,
        default_questions: section("defaultQuestions"),
        custom_questions: section("customQuestions"),
        created_at: format_primitive(model.created_at),
        updated_at: format_primitive(model.updated_at),
    }
}

async fn share_assignment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<SharedAssignmentCreate>,
) -> Result<(StatusCode, Json<SharedAssignmentResponse>), ApiError> {
    payload.validate().map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let training = load_training(&state, payload.training_id).await?;
    require_trainer(&state, &training, &user.username).await?;

    let shared = repositories::shared_content::upsert_assignment(
        state.db(),
        repositories::shared_content::UpsertAssignment {
            training_id: payload.training_id,
            trainer_username: &user.username,
            title: &payload.title,
            description: payload.description.as_deref(),
            questions: &payload.questions,
            now: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to share assignment"))?;

    tracing::info!(
        training_id = payload.training_id,
        trainer = %user.username,
        questions = shared.questions.0.len(),
        "Assignment shared"
    );

    Ok((StatusCode::CREATED, Json(assignment_response(shared))))
}

async fn employee_assignment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(training_id): Path<i64>,
) -> Result<Json<EmployeeAssignmentResponse>, ApiError> {
    require_assigned(&state, training_id, &user.username).await?;

    let shared = repositories::shared_content::find_assignment_by_training(state.db(), training_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load shared assignment"))?
        .ok_or_else(|| ApiError::NotFound("No assignment shared for this training".to_string()))?;

    let response = EmployeeAssignmentResponse {
        id: shared.id,
        training_id: shared.training_id,
        title: shared.title,
        description: shared.description,
        questions: shared.questions.0.iter().map(|q| q.redacted()).collect(),
        created_at: format_primitive(shared.created_at),
        updated_at: format_primitive(shared.updated_at),
    };

    Ok(Json(response))
}

async fn trainer_assignment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(training_id): Path<i64>,
) -> Result<Json<SharedAssignmentResponse>, ApiError> {
    let training = load_training(&state, training_id).await?;
    require_trainer(&state, &training, &user.username).await?;

    let shared = repositories::shared_content::find_assignment_by_training(state.db(), training_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load shared assignment"))?
        .ok_or_else(|| ApiError::NotFound("No assignment shared for this training".to_string()))?;

    Ok(Json(assignment_response(shared)))
}

async fn submit_assignment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<AssignmentSubmissionCreate>,
) -> Result<(StatusCode, Json<AssignmentResultResponse>), ApiError> {
    require_assigned(&state, payload.training_id, &user.username).await?;

    let shared = repositories::shared_content::find_assignment(
        state.db(),
        payload.shared_assignment_id,
        payload.training_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to load shared assignment"))?
    .ok_or_else(|| ApiError::NotFound("Shared assignment not found".to_string()))?;

    let graded = grading::grade(&shared.questions.0, &payload.answers);

    let submission = repositories::submissions::create(
        state.db(),
        repositories::submissions::CreateSubmission {
            training_id: payload.training_id,
            shared_assignment_id: shared.id,
            employee_empid: &user.username,
            answers: &payload.answers,
            score: graded.score,
            total_questions: graded.total_questions,
            correct_answers: graded.correct_answers,
            submitted_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to record submission"))?;

    tracing::info!(
        training_id = payload.training_id,
        employee = %user.username,
        score = graded.score,
        "Assignment submitted"
    );

    let response = AssignmentResultResponse {
        id: submission.id,
        training_id: submission.training_id,
        score: submission.score,
        total_questions: submission.total_questions,
        correct_answers: submission.correct_answers,
        question_results: graded.question_results,
        submitted_at: format_primitive(submission.submitted_at),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// The stored score is authoritative; only the per-question breakdown is
/// rebuilt from the saved answers and the current answer key.
async fn assignment_result(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(training_id): Path<i64>,
) -> Result<Json<AssignmentResultResponse>, ApiError> {
    require_assigned(&state, training_id, &user.username).await?;

    let shared = repositories::shared_content::find_assignment_by_training(state.db(), training_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load shared assignment"))?
        .ok_or_else(|| ApiError::NotFound("No assignment shared for this training".to_string()))?;

    let submission = repositories::submissions::latest_for(state.db(), training_id, &user.username)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load submission"))?
        .ok_or_else(|| ApiError::NotFound("No submission found for this training".to_string()))?;

    let graded = grading::grade(&shared.questions.0, &submission.answers.0);

    let response = AssignmentResultResponse {
        id: submission.id,
        training_id: submission.training_id,
        score: submission.score,
        total_questions: submission.total_questions,
        correct_answers: submission.correct_answers,
        question_results: graded.question_results,
        submitted_at: format_primitive(submission.submitted_at),
    };

    Ok(Json(response))
}

async fn share_feedback(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<SharedFeedbackCreate>,
) -> Result<(StatusCode, Json<SharedFeedbackResponse>), ApiError> {
    payload.validate().map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let training = load_training(&state, payload.training_id).await?;
    require_trainer(&state, &training, &user.username).await?;

    let form = serde_json::json!({
        "defaultQuestions": payload.default_questions,
        "customQuestions": payload.custom_questions,
    });

    let shared = repositories::shared_content::upsert_feedback(
        state.db(),
        repositories::shared_content::UpsertFeedback {
            training_id: payload.training_id,
            trainer_username: &user.username,
            form: &form,
            now: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to share feedback form"))?;

    Ok((StatusCode::CREATED, Json(feedback_response(shared))))
}

async fn employee_feedback(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(training_id): Path<i64>,
) -> Result<Json<SharedFeedbackResponse>, ApiError> {
    require_assigned(&state, training_id, &user.username).await?;

    let shared = repositories::shared_content::find_feedback_by_training(state.db(), training_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load feedback form"))?
        .ok_or_else(|| ApiError::NotFound("No feedback form shared for this training".to_string()))?;

    Ok(Json(feedback_response(shared)))
}

async fn trainer_feedback(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(training_id): Path<i64>,
) -> Result<Json<SharedFeedbackResponse>, ApiError> {
    let training = load_training(&state, training_id).await?;
    require_trainer(&state, &training, &user.username).await?;

    let shared = repositories::shared_content::find_feedback_by_training(state.db(), training_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load feedback form"))?
        .ok_or_else(|| ApiError::NotFound("No feedback form shared for this training".to_string()))?;

    Ok(Json(feedback_response(shared)))
}

async fn submit_feedback(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<FeedbackSubmissionCreate>,
) -> Result<(StatusCode, Json<FeedbackSubmissionResponse>), ApiError> {
    require_assigned(&state, payload.training_id, &user.username).await?;

    let shared = repositories::shared_content::find_feedback(
        state.db(),
        payload.shared_feedback_id,
        payload.training_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to load feedback form"))?
    .ok_or_else(|| ApiError::NotFound("Shared feedback form not found".to_string()))?;

    let submission = repositories::submissions::create_feedback(
        state.db(),
        repositories::submissions::CreateFeedbackSubmission {
            training_id: payload.training_id,
            shared_feedback_id: shared.id,
            employee_empid: &user.username,
            responses: &payload.responses,
            submitted_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to record feedback"))?;

    let response = FeedbackSubmissionResponse {
        id: submission.id,
        training_id: submission.training_id,
        submitted_at: format_primitive(submission.submitted_at),
    };

    Ok((StatusCode::CREATED, Json(response)))
}
