use crate::core::state::AppState;
use crate::repositories;

/// Competency rows are imported without a user foreign key; link the ones
/// whose empid now matches a registered account.
pub(crate) async fn reconcile_competency_links(state: &AppState) -> Result<(), sqlx::Error> {
    let linked = repositories::competencies::link_registered_users(state.db()).await?;
    if linked > 0 {
        tracing::info!(linked, "Linked competency rows to registered users");
    }
    Ok(())
}
