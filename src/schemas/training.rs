use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::{format_date, format_primitive};
use crate::db::models::{TrainingAssignment, TrainingDetail, TrainingRequest};
use crate::db::types::RequestStatus;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AssignTrainingRequest {
    pub(crate) training_id: i64,
    #[validate(length(min = 1, message = "employee_empid must not be empty"))]
    pub(crate) employee_empid: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TrainingResponse {
    pub(crate) id: i64,
    pub(crate) division: Option<String>,
    pub(crate) department: Option<String>,
    pub(crate) competency: Option<String>,
    pub(crate) skill: Option<String>,
    pub(crate) training_name: String,
    pub(crate) training_topics: Option<String>,
    pub(crate) prerequisites: Option<String>,
    pub(crate) skill_category: Option<String>,
    pub(crate) trainer_name: String,
    pub(crate) email: Option<String>,
    pub(crate) training_date: Option<String>,
    pub(crate) duration: Option<String>,
    pub(crate) time_slot: Option<String>,
    pub(crate) training_type: Option<String>,
    pub(crate) seats: Option<String>,
    pub(crate) assessment_details: Option<String>,
}

impl From<TrainingDetail> for TrainingResponse {
    fn from(detail: TrainingDetail) -> Self {
        Self {
            id: detail.id,
            division: detail.division,
            department: detail.department,
            competency: detail.competency,
            skill: detail.skill,
            training_name: detail.training_name,
            training_topics: detail.training_topics,
            prerequisites: detail.prerequisites,
            skill_category: detail.skill_category,
            trainer_name: detail.trainer_name,
            email: detail.email,
            training_date: detail.training_date.map(format_date),
            duration: detail.duration,
            time_slot: detail.time_slot,
            training_type: detail.training_type,
            seats: detail.seats,
            assessment_details: detail.assessment_details,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentResponse {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) employee_empid: String,
    pub(crate) manager_empid: String,
    pub(crate) assigned_at: String,
}

impl From<TrainingAssignment> for AssignmentResponse {
    fn from(assignment: TrainingAssignment) -> Self {
        Self {
            id: assignment.id,
            training_id: assignment.training_id,
            employee_empid: assignment.employee_empid,
            manager_empid: assignment.manager_empid,
            assigned_at: format_primitive(assignment.assigned_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrainingRequestCreate {
    pub(crate) training_id: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrainingRequestRespond {
    pub(crate) status: RequestStatus,
    #[serde(default)]
    pub(crate) manager_notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TrainingRequestResponse {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) employee_empid: String,
    pub(crate) manager_empid: Option<String>,
    pub(crate) status: String,
    pub(crate) manager_notes: Option<String>,
    pub(crate) requested_at: String,
    pub(crate) responded_at: Option<String>,
}

impl From<TrainingRequest> for TrainingRequestResponse {
    fn from(request: TrainingRequest) -> Self {
        Self {
            id: request.id,
            training_id: request.training_id,
            employee_empid: request.employee_empid,
            manager_empid: request.manager_empid,
            status: request.status,
            manager_notes: request.manager_notes,
            requested_at: format_primitive(request.requested_at),
            responded_at: request.responded_at.map(format_primitive),
        }
    }
}
