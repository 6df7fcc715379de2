//! Matching a logged-in user against a training's trainer_name.
//!
//! trainer_name comes straight from spreadsheets and may hold several names
//! in one cell, so the check falls back to case-insensitive containment.

use sqlx::PgPool;

use crate::db::models::TrainingDetail;
use crate::repositories;
use crate::services::import::rows::NOT_ASSIGNED;

pub(crate) fn matches_trainer(
    trainer_name: &str,
    username: &str,
    employee_name: Option<&str>,
) -> bool {
    let trainer_name = trainer_name.trim().to_lowercase();
    if trainer_name.is_empty() {
        return false;
    }

    let username = username.to_lowercase();
    if trainer_name == username || trainer_name.contains(&username) {
        return true;
    }

    if let Some(employee_name) = employee_name {
        let employee_name = employee_name.trim().to_lowercase();
        if !employee_name.is_empty()
            && (trainer_name == employee_name || trainer_name.contains(&employee_name))
        {
            return true;
        }
    }

    false
}

/// Looks up the caller's recorded employee name and checks them against the
/// training's trainer. The "Not Assigned" sentinel never matches anyone.
pub(crate) async fn is_training_trainer(
    pool: &PgPool,
    training: &TrainingDetail,
    username: &str,
) -> Result<bool, sqlx::Error> {
    if training.trainer_name.trim().is_empty() || training.trainer_name == NOT_ASSIGNED {
        return Ok(false);
    }

    let employee_name = repositories::relationships::employee_name_for(pool, username).await?;
    Ok(matches_trainer(&training.trainer_name, username, employee_name.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_username_match() {
        assert!(matches_trainer("jsmith", "JSmith", None));
    }

    #[test]
    fn exact_employee_name_match() {
        assert!(matches_trainer("Jordan Smith", "jsmith", Some("jordan smith")));
    }

    #[test]
    fn containment_covers_multi_trainer_cells() {
        assert!(matches_trainer("Jordan Smith\nPat Lee", "jsmith", Some("Jordan Smith")));
        assert!(matches_trainer("pat lee, jsmith", "jsmith", None));
    }

    #[test]
    fn unrelated_user_does_not_match() {
        assert!(!matches_trainer("Jordan Smith", "plee", Some("Pat Lee")));
        assert!(!matches_trainer("", "plee", None));
    }
}
