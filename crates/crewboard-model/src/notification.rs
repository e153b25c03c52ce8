use crate::ids::{NotificationId, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-recipient message created as a side effect of assignment. Only
/// the recipient may flip `is_read`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: UserId,
    pub message: String,
    #[serde(default)]
    pub task: Option<TaskId>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
