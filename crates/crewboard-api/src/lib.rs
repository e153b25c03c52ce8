#![forbid(unsafe_code)]
//! Wire surface of the crewboard API: the error taxonomy with its
//! status-code mapping, response DTOs with display names resolved, and
//! query-parameter parsing for the task list.

mod dto;
mod error_mapping;
mod errors;
mod params;

pub use dto::{
    AuthResponse, CommentView, LogView, MessageResponse, NotificationView, SubtaskView, TaskPage,
    TaskView, UserProfile, UserRef,
};
pub use error_mapping::map_error;
pub use errors::{ApiError, ApiErrorCode};
pub use params::{parse_task_list_params, TaskListQuery, DEFAULT_PAGE_LIMIT};

pub const CRATE_NAME: &str = "crewboard-api";
