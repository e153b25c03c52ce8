#![forbid(unsafe_code)]
//! Domain model SSOT for the crewboard task service.
//!
//! Everything the services validate lives here: id newtypes, the closed
//! status/priority/role/action enums, the entity documents, and the
//! explicit patch structs applied by update operations.

mod activity;
mod ids;
mod notification;
mod subtask;
mod task;
mod user;

pub use activity::{Comment, LogAction, LogEntry, NewComment};
pub use ids::{CommentId, LogId, NotificationId, ParseIdError, SubtaskId, TaskId, UserId};
pub use notification::Notification;
pub use subtask::{NewSubtask, Subtask, SubtaskPatch};
pub use task::{
    normalize_assignees, normalize_tags, normalize_title, NewTask, Priority, Status, Task,
    TaskPatch, TITLE_MAX_LEN,
};
pub use user::{Role, User};

pub const CRATE_NAME: &str = "crewboard-model";

/// Field-level validation failure raised before any store write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}
