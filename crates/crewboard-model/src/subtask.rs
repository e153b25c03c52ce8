use crate::ids::{SubtaskId, TaskId, UserId};
use crate::task::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Child work item of a task. Single-assignee cardinality; shares the
/// task status enum and the soft-delete exclusion invariant. Subtasks do
/// not carry their own activity stream — log entries land on the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: SubtaskId,
    pub task: TaskId,
    pub title: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub assignee: Option<UserId>,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewSubtask {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub assignee: Option<UserId>,
}

/// Patchable subtask fields; the parent reference is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubtaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    /// `Some(Some(id))` assigns, `Some(None)` clears, `None` leaves the
    /// assignee untouched.
    #[serde(default, deserialize_with = "double_option")]
    pub assignee: Option<Option<UserId>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<UserId>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<UserId>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_rejects_parent_reassignment() {
        assert!(serde_json::from_str::<SubtaskPatch>(r#"{"task":"t2"}"#).is_err());
        assert!(serde_json::from_str::<SubtaskPatch>(r#"{"isDeleted":true}"#).is_err());
    }

    #[test]
    fn patch_distinguishes_clear_from_absent() {
        let absent: SubtaskPatch = serde_json::from_str("{}").unwrap();
        assert!(absent.assignee.is_none());
        let cleared: SubtaskPatch = serde_json::from_str(r#"{"assignee":null}"#).unwrap();
        assert_eq!(cleared.assignee, Some(None));
        let set: SubtaskPatch = serde_json::from_str(r#"{"assignee":"u2"}"#).unwrap();
        assert_eq!(
            set.assignee,
            Some(Some(UserId::parse("u2").unwrap()))
        );
    }
}
