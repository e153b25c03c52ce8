use crate::services::store_err;
use crate::AppState;
use crewboard_api::{ApiError, NotificationView};
use crewboard_model::{NotificationId, User};

pub async fn list(state: &AppState, caller: &User) -> Result<Vec<NotificationView>, ApiError> {
    let store = state.store.lock().await;
    store.list_notifications(&caller.id).map_err(store_err)
}

/// Marks one of the caller's notifications read. A notification that
/// belongs to someone else answers exactly like a missing one, so ids
/// cannot be probed across accounts.
pub async fn mark_read(
    state: &AppState,
    caller: &User,
    id: &NotificationId,
) -> Result<NotificationView, ApiError> {
    let store = state.store.lock().await;
    let mut notification = store
        .fetch_notification(id)
        .map_err(store_err)?
        .filter(|n| n.recipient == caller.id)
        .ok_or_else(|| ApiError::not_found("Notification not found"))?;

    notification.is_read = true;
    store.update_notification(&notification).map_err(store_err)?;
    Ok(notification)
}
