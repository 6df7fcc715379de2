use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::{Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentManager;
use crate::core::config::Settings;
use crate::core::state::AppState;
use crate::services::import;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xls"];
const CSV_EXTENSIONS: &[&str] = &["csv"];

pub(crate) fn router(settings: &Settings) -> Router<AppState> {
    let max_bytes = settings.import().max_upload_size_mb as usize * 1024 * 1024;

    Router::new()
        .route("/workbook", post(import_workbook))
        .route("/manager-employee-csv", post(import_manager_employee_csv))
        .route("/employee-competency", post(import_employee_competency))
        .layer(DefaultBodyLimit::max(max_bytes))
}

async fn import_workbook(
    State(state): State<AppState>,
    CurrentManager(user): CurrentManager,
    multipart: Multipart,
) -> Result<Json<import::WorkbookImportSummary>, ApiError> {
    let bytes = read_upload(multipart, WORKBOOK_EXTENSIONS).await?;
    tracing::info!(manager = %user.username, size = bytes.len(), "Workbook import requested");

    let summary = import::load_all_from_workbook(state.db(), &bytes).await?;
    Ok(Json(summary))
}

async fn import_manager_employee_csv(
    State(state): State<AppState>,
    CurrentManager(user): CurrentManager,
    multipart: Multipart,
) -> Result<Json<import::CsvImportSummary>, ApiError> {
    let bytes = read_upload(multipart, CSV_EXTENSIONS).await?;
    tracing::info!(manager = %user.username, size = bytes.len(), "Relationship import requested");

    let summary =
        import::load_manager_employee_from_csv(state.db(), state.settings(), &bytes).await?;
    Ok(Json(summary))
}

async fn import_employee_competency(
    State(state): State<AppState>,
    CurrentManager(user): CurrentManager,
    multipart: Multipart,
) -> Result<Json<import::CompetencyImportSummary>, ApiError> {
    let bytes = read_upload(multipart, WORKBOOK_EXTENSIONS).await?;
    tracing::info!(manager = %user.username, size = bytes.len(), "Competency import requested");

    let summary = import::load_employee_competency_from_workbook(state.db(), &bytes).await?;
    Ok(Json(summary))
}

/// Pulls the first file field out of the multipart body and checks its
/// extension against the endpoint's accepted formats.
async fn read_upload(
    mut multipart: Multipart,
    accepted_extensions: &[&str],
) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(format!("invalid multipart body: {err}")))?
    {
        let Some(filename) = field.file_name().map(|name| name.to_string()) else {
            continue;
        };

        let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();
        if !accepted_extensions.contains(&extension.as_str()) {
            return Err(ApiError::BadRequest(format!(
                "unsupported file type '{filename}'; expected one of: {}",
                accepted_extensions.join(", ")
            )));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(format!("failed to read upload: {err}")))?;

        if bytes.is_empty() {
            return Err(ApiError::BadRequest("uploaded file is empty".to_string()));
        }

        return Ok(bytes.to_vec());
    }

    Err(ApiError::BadRequest("no file found in upload".to_string()))
}
