use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentManager, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::RequestStatus;
use crate::repositories;
use crate::schemas::training::{
    TrainingRequestCreate, TrainingRequestRespond, TrainingRequestResponse,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_request))
        .route("/my", get(my_requests))
        .route("/team", get(team_requests))
        .route("/:id/respond", post(respond_to_request))
}

async fn create_request(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<TrainingRequestCreate>,
) -> Result<(StatusCode, Json<TrainingRequestResponse>), ApiError> {
    let training = repositories::trainings::find_by_id(state.db(), payload.training_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load training"))?;
    if training.is_none() {
        return Err(ApiError::NotFound("Training not found".to_string()));
    }

    let duplicate =
        repositories::requests::exists_pending(state.db(), payload.training_id, &user.username)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to check existing request"))?;
    if duplicate {
        return Err(ApiError::BadRequest(
            "A pending request for this training already exists".to_string(),
        ));
    }

    let request = repositories::requests::create(
        state.db(),
        payload.training_id,
        &user.username,
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create training request"))?;

    Ok((StatusCode::CREATED, Json(request.into())))
}

async fn my_requests(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<TrainingRequestResponse>>, ApiError> {
    let requests = repositories::requests::list_for_employee(state.db(), &user.username)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load training requests"))?;

    Ok(Json(requests.into_iter().map(TrainingRequestResponse::from).collect()))
}

async fn team_requests(
    State(state): State<AppState>,
    CurrentManager(manager): CurrentManager,
) -> Result<Json<Vec<TrainingRequestResponse>>, ApiError> {
    let requests = repositories::requests::list_for_manager_team(state.db(), &manager.username)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load team requests"))?;

    Ok(Json(requests.into_iter().map(TrainingRequestResponse::from).collect()))
}

async fn respond_to_request(
    State(state): State<AppState>,
    CurrentManager(manager): CurrentManager,
    Path(id): Path<i64>,
    Json(payload): Json<TrainingRequestRespond>,
) -> Result<Json<TrainingRequestResponse>, ApiError> {
    if payload.status == RequestStatus::Pending {
        return Err(ApiError::BadRequest(
            "Response status must be approved or rejected".to_string(),
        ));
    }

    let request = repositories::requests::find_by_id(state.db(), id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load training request"))?;
    let Some(request) = request else {
        return Err(ApiError::NotFound("Training request not found".to_string()));
    };

    let is_team_member = repositories::relationships::is_manager_of(
        state.db(),
        &manager.username,
        &request.employee_empid,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to check team membership"))?;
    if !is_team_member {
        return Err(ApiError::Forbidden("You can only respond to requests from your own team"));
    }

    let updated = repositories::requests::respond(
        state.db(),
        id,
        &manager.username,
        payload.status.as_str(),
        payload.manager_notes.as_deref(),
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update training request"))?;

    Ok(Json(updated.into()))
}
