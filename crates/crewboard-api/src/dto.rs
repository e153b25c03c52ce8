use chrono::{DateTime, NaiveDate, Utc};
use crewboard_model::{
    Comment, LogAction, LogEntry, Notification, Priority, Role, Status, Subtask, Task, User,
};
use serde::{Deserialize, Serialize};

/// Public projection of a user record. Credentials and single-use
/// tokens never leave the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            is_verified: user.is_verified,
        }
    }
}

/// Short user reference embedded in task/comment/log views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Task with references resolved to display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub assignees: Vec<UserRef>,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskView {
    #[must_use]
    pub fn new(task: Task, assignees: Vec<UserRef>, created_by: UserRef) -> Self {
        Self {
            id: task.id.as_str().to_string(),
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            tags: task.tags,
            assignees,
            created_by,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// List envelope: `{ tasks, totalPages, currentPage, totalTasks }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub tasks: Vec<TaskView>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_tasks: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskView {
    pub id: String,
    pub task: String,
    pub title: String,
    pub status: Status,
    pub assignee: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubtaskView {
    #[must_use]
    pub fn new(subtask: Subtask, assignee: Option<UserRef>) -> Self {
        Self {
            id: subtask.id.as_str().to_string(),
            task: subtask.task.as_str().to_string(),
            title: subtask.title,
            status: subtask.status,
            assignee,
            created_at: subtask.created_at,
            updated_at: subtask.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub task: String,
    pub user: UserRef,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CommentView {
    #[must_use]
    pub fn new(comment: Comment, user: UserRef) -> Self {
        Self {
            id: comment.id.as_str().to_string(),
            task: comment.task.as_str().to_string(),
            user,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogView {
    pub id: String,
    pub task: String,
    pub user: UserRef,
    pub action: LogAction,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl LogView {
    #[must_use]
    pub fn new(entry: LogEntry, user: UserRef) -> Self {
        Self {
            id: entry.id.as_str().to_string(),
            task: entry.task.as_str().to_string(),
            user,
            action: entry.action,
            details: entry.details,
            created_at: entry.created_at,
        }
    }
}

/// Notifications go out as stored; the recipient is the caller.
pub type NotificationView = Notification;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
