use crate::ids::{CommentId, LogId, TaskId, UserId};
use crate::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag for one append-only activity record. One entry per mutating
/// action on a task or its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogAction {
    CreatedTask,
    UpdatedTask,
    DeletedTask,
    AddedComment,
    CreatedSubtask,
    UpdatedSubtask,
    DeletedSubtask,
}

impl LogAction {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input {
            "CREATED_TASK" => Ok(Self::CreatedTask),
            "UPDATED_TASK" => Ok(Self::UpdatedTask),
            "DELETED_TASK" => Ok(Self::DeletedTask),
            "ADDED_COMMENT" => Ok(Self::AddedComment),
            "CREATED_SUBTASK" => Ok(Self::CreatedSubtask),
            "UPDATED_SUBTASK" => Ok(Self::UpdatedSubtask),
            "DELETED_SUBTASK" => Ok(Self::DeletedSubtask),
            other => Err(ValidationError(format!("invalid log action: {other}"))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedTask => "CREATED_TASK",
            Self::UpdatedTask => "UPDATED_TASK",
            Self::DeletedTask => "DELETED_TASK",
            Self::AddedComment => "ADDED_COMMENT",
            Self::CreatedSubtask => "CREATED_SUBTASK",
            Self::UpdatedSubtask => "UPDATED_SUBTASK",
            Self::DeletedSubtask => "DELETED_SUBTASK",
        }
    }
}

/// Activity record. Append-only; survives the parent task's soft-delete
/// so history stays auditable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: LogId,
    pub task: TaskId,
    pub user: UserId,
    pub action: LogAction,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

/// Immutable once created; no update or delete path exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub task: TaskId,
    pub user: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewComment {
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_action_wire_strings_round_trip() {
        for action in [
            LogAction::CreatedTask,
            LogAction::UpdatedTask,
            LogAction::DeletedTask,
            LogAction::AddedComment,
            LogAction::CreatedSubtask,
            LogAction::UpdatedSubtask,
            LogAction::DeletedSubtask,
        ] {
            let wire = serde_json::to_string(&action).unwrap();
            assert_eq!(wire, format!("\"{}\"", action.as_str()));
            assert_eq!(LogAction::parse(action.as_str()).unwrap(), action);
        }
    }

    #[test]
    fn log_action_rejects_unknown() {
        assert!(LogAction::parse("ARCHIVED_TASK").is_err());
    }
}
