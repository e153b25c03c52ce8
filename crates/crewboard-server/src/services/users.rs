use crate::services::store_err;
use crate::AppState;
use crewboard_api::{ApiError, UserProfile};

/// Directory listing for assignee pickers. Public projections only.
pub async fn list(state: &AppState) -> Result<Vec<UserProfile>, ApiError> {
    let store = state.store.lock().await;
    let users = store.list_users().map_err(store_err)?;
    Ok(users.iter().map(UserProfile::from).collect())
}
