use crate::ApiError;
use chrono::NaiveDate;
use crewboard_model::{Priority, Status, UserId};
use std::collections::HashMap;

pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Parsed task-list query. Filters compose as a conjunction; page and
/// limit are 1-based positive integers with no enforced upper bound.
#[derive(Debug, Clone, Default)]
pub struct TaskListQuery {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<UserId>,
    pub due_date: Option<NaiveDate>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub page: u64,
    pub limit: u64,
}

pub fn parse_task_list_params(
    params: &HashMap<String, String>,
) -> Result<TaskListQuery, ApiError> {
    let mut query = TaskListQuery {
        page: 1,
        limit: DEFAULT_PAGE_LIMIT,
        ..TaskListQuery::default()
    };

    if let Some(raw) = non_empty(params, "status") {
        query.status = Some(Status::parse(raw)?);
    }
    if let Some(raw) = non_empty(params, "priority") {
        query.priority = Some(Priority::parse(raw)?);
    }
    if let Some(raw) = non_empty(params, "assignee") {
        let id = UserId::parse(raw)
            .map_err(|e| ApiError::validation(format!("invalid assignee: {e}")))?;
        query.assignee = Some(id);
    }
    if let Some(raw) = non_empty(params, "dueDate") {
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ApiError::validation(format!("invalid dueDate: {raw}")))?;
        query.due_date = Some(date);
    }
    if let Some(raw) = non_empty(params, "tags") {
        query.tag = Some(raw.to_string());
    }
    if let Some(raw) = non_empty(params, "search") {
        query.search = Some(raw.to_string());
    }
    if let Some(raw) = non_empty(params, "page") {
        query.page = positive_int("page", raw)?;
    }
    if let Some(raw) = non_empty(params, "limit") {
        query.limit = positive_int("limit", raw)?;
    }

    Ok(query)
}

fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn positive_int(name: &str, raw: &str) -> Result<u64, ApiError> {
    match raw.parse::<u64>() {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(ApiError::validation(format!(
            "{name} must be a positive integer"
        ))),
    }
}
