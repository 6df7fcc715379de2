use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentManager, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::training::{AssignTrainingRequest, AssignmentResponse, TrainingResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(assign_training))
        .route("/my", get(my_trainings))
        .route("/manager/team", get(team_assignments))
        .route("/:training_id/:employee_empid", delete(unassign_training))
}

async fn assign_training(
    State(state): State<AppState>,
    CurrentManager(manager): CurrentManager,
    Json(payload): Json<AssignTrainingRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), ApiError> {
    payload.validate().map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let training = repositories::trainings::find_by_id(state.db(), payload.training_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load training"))?;
    if training.is_none() {
        return Err(ApiError::NotFound("Training not found".to_string()));
    }

    let is_team_member = repositories::relationships::is_manager_of(
        state.db(),
        &manager.username,
        &payload.employee_empid,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to check team membership"))?;
    if !is_team_member {
        return Err(ApiError::Forbidden("You can only assign trainings to your own team"));
    }

    let already_assigned =
        repositories::assignments::exists(state.db(), payload.training_id, &payload.employee_empid)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to check existing assignment"))?;
    if already_assigned {
        return Err(ApiError::BadRequest(
            "Training is already assigned to this employee".to_string(),
        ));
    }

    let assignment = repositories::assignments::create(
        state.db(),
        repositories::assignments::CreateAssignment {
            training_id: payload.training_id,
            employee_empid: &payload.employee_empid,
            manager_empid: &manager.username,
            assigned_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create assignment"))?;

    Ok((StatusCode::CREATED, Json(assignment.into())))
}

async fn my_trainings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<TrainingResponse>>, ApiError> {
    let trainings =
        repositories::assignments::trainings_for_employee(state.db(), &user.username)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load assigned trainings"))?;

    Ok(Json(trainings.into_iter().map(TrainingResponse::from).collect()))
}

async fn team_assignments(
    State(state): State<AppState>,
    CurrentManager(manager): CurrentManager,
) -> Result<Json<Vec<AssignmentResponse>>, ApiError> {
    let assignments =
        repositories::assignments::list_for_manager(state.db(), &manager.username)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load team assignments"))?;

    Ok(Json(assignments.into_iter().map(AssignmentResponse::from).collect()))
}

async fn unassign_training(
    State(state): State<AppState>,
    CurrentManager(manager): CurrentManager,
    Path((training_id, employee_empid)): Path<(i64, String)>,
) -> Result<StatusCode, ApiError> {
    let removed = repositories::assignments::delete(
        state.db(),
        training_id,
        &employee_empid,
        &manager.username,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to remove assignment"))?;

    if removed == 0 {
        return Err(ApiError::NotFound("Assignment not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
