use sqlx::types::Json;
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime};

use crate::db::types::UserRole;
use crate::schemas::shared_content::{Answer, Question};

#[derive(Debug, Clone, FromRow)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) hashed_password: String,
    pub(crate) role: UserRole,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct Trainer {
    pub(crate) id: i64,
    pub(crate) skill: String,
    pub(crate) competency: String,
    pub(crate) trainer_name: String,
    pub(crate) expertise_level: String,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct TrainingDetail {
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
    pub(crate) training_date: Option<Date>,
    pub(crate) duration: Option<String>,
    pub(crate) time_slot: Option<String>,
    pub(crate) training_type: Option<String>,
    pub(crate) seats: Option<String>,
    pub(crate) assessment_details: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct ManagerEmployee {
    pub(crate) manager_empid: String,
    pub(crate) employee_empid: String,
    pub(crate) manager_name: Option<String>,
    pub(crate) employee_name: Option<String>,
    pub(crate) manager_is_trainer: bool,
    pub(crate) employee_is_trainer: bool,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct EmployeeCompetency {
    pub(crate) id: i64,
    pub(crate) employee_empid: String,
    pub(crate) linked_user_id: Option<String>,
    pub(crate) employee_name: Option<String>,
    pub(crate) department: Option<String>,
    pub(crate) division: Option<String>,
    pub(crate) project: Option<String>,
    pub(crate) role_specific_comp: Option<String>,
    pub(crate) designation: Option<String>,
    pub(crate) competency: Option<String>,
    pub(crate) skill: Option<String>,
    pub(crate) current_expertise: Option<String>,
    pub(crate) target_expertise: Option<String>,
    pub(crate) comments: Option<String>,
    pub(crate) target_date: Option<Date>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct TrainingAssignment {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) employee_empid: String,
    pub(crate) manager_empid: String,
    pub(crate) assigned_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct TrainingRequest {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) employee_empid: String,
    pub(crate) manager_empid: Option<String>,
    pub(crate) status: String,
    pub(crate) manager_notes: Option<String>,
    pub(crate) requested_at: PrimitiveDateTime,
    pub(crate) responded_at: Option<PrimitiveDateTime>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct SharedAssignment {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) trainer_username: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) questions: Json<Vec<Question>>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct SharedFeedback {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) trainer_username: String,
    pub(crate) form: Json<serde_json::Value>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct AssignmentSubmission {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) shared_assignment_id: i64,
    pub(crate) employee_empid: String,
    pub(crate) answers: Json<Vec<Answer>>,
    pub(crate) score: i32,
    pub(crate) total_questions: i32,
    pub(crate) correct_answers: i32,
    pub(crate) submitted_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct FeedbackSubmission {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) shared_feedback_id: i64,
    pub(crate) employee_empid: String,
    pub(crate) responses: Json<serde_json::Value>,
    pub(crate) submitted_at: PrimitiveDateTime,
}
