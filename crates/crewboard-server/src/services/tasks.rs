use crate::services::{fresh_id, logs, store_err, task_view, user_ref};
use crate::AppState;
use chrono::Utc;
use crewboard_api::{ApiError, MessageResponse, TaskListQuery, TaskPage, TaskView};
use crewboard_model::{
    normalize_assignees, normalize_tags, normalize_title, LogAction, NewTask, Notification,
    NotificationId, Task, TaskId, TaskPatch, User, UserId,
};
use crewboard_store::{Store, TaskFilter};
use tracing::warn;

pub async fn create(state: &AppState, caller: &User, payload: NewTask) -> Result<TaskView, ApiError> {
    let title = normalize_title(&payload.title)?;
    let now = Utc::now();
    let task = Task {
        id: fresh_id(TaskId::parse)?,
        title,
        description: payload.description,
        status: payload.status.unwrap_or_default(),
        priority: payload.priority.unwrap_or_default(),
        due_date: payload.due_date,
        tags: normalize_tags(payload.tags.unwrap_or_default()),
        assignees: normalize_assignees(payload.assignees.unwrap_or_default()),
        created_by: caller.id.clone(),
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };

    let store = state.store.lock().await;
    store.insert_task(&task).map_err(store_err)?;
    logs::append(
        &store,
        &task.id,
        &caller.id,
        LogAction::CreatedTask,
        format!("Task \"{}\" created.", task.title),
    );
    notify_assignees(&store, &task, &caller.id, task.assignees.iter());
    task_view(&store, task)
}

pub async fn list(state: &AppState, query: TaskListQuery) -> Result<TaskPage, ApiError> {
    let filter = TaskFilter {
        status: query.status,
        priority: query.priority,
        assignee: query.assignee,
        due_date: query.due_date,
        tag: query.tag,
        search: query.search,
    };

    let store = state.store.lock().await;
    let matched = store.list_tasks(&filter).map_err(store_err)?;
    let total_tasks = matched.len() as u64;
    let total_pages = total_tasks.div_ceil(query.limit);
    let skip = (query.page - 1).saturating_mul(query.limit);

    let mut tasks = Vec::new();
    for task in matched
        .into_iter()
        .skip(skip as usize)
        .take(query.limit as usize)
    {
        tasks.push(task_view(&store, task)?);
    }
    Ok(TaskPage {
        tasks,
        total_pages,
        current_page: query.page,
        total_tasks,
    })
}

pub async fn get(state: &AppState, id: &TaskId) -> Result<TaskView, ApiError> {
    let store = state.store.lock().await;
    let task = fetch_live(&store, id)?;
    task_view(&store, task)
}

pub async fn update(
    state: &AppState,
    caller: &User,
    id: &TaskId,
    patch: TaskPatch,
) -> Result<TaskView, ApiError> {
    let store = state.store.lock().await;
    let mut task = fetch_live(&store, id)?;
    if !may_update(caller, &task) {
        return Err(ApiError::forbidden("Not authorized to update this task"));
    }

    let previous_assignees = task.assignees.clone();
    if let Some(title) = patch.title {
        task.title = normalize_title(&title)?;
    }
    if let Some(description) = patch.description {
        task.description = Some(description);
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = Some(due_date);
    }
    if let Some(tags) = patch.tags {
        task.tags = normalize_tags(tags);
    }
    if let Some(assignees) = patch.assignees {
        task.assignees = normalize_assignees(assignees);
    }
    task.updated_at = Utc::now();
    store.update_task(&task).map_err(store_err)?;

    logs::append(
        &store,
        &task.id,
        &caller.id,
        LogAction::UpdatedTask,
        "Task updated.".to_string(),
    );
    // Only newly added assignees are notified; the existing crew already
    // heard about this task.
    let added = task
        .assignees
        .iter()
        .filter(|a| !previous_assignees.contains(a));
    notify_assignees(&store, &task, &caller.id, added);
    task_view(&store, task)
}

pub async fn delete(
    state: &AppState,
    caller: &User,
    id: &TaskId,
) -> Result<MessageResponse, ApiError> {
    let store = state.store.lock().await;
    let mut task = fetch_live(&store, id)?;
    if !may_delete(caller, &task) {
        return Err(ApiError::forbidden("Not authorized to delete this task"));
    }

    task.is_deleted = true;
    task.updated_at = Utc::now();
    store.update_task(&task).map_err(store_err)?;
    logs::append(
        &store,
        &task.id,
        &caller.id,
        LogAction::DeletedTask,
        "Task soft deleted.".to_string(),
    );
    Ok(MessageResponse::new("Task removed (soft delete)"))
}

/// CSV export of every live task, no pagination. Assignees and the
/// creator are rendered as usernames so the file stands alone.
pub async fn export_csv(state: &AppState) -> Result<String, ApiError> {
    let store = state.store.lock().await;
    let tasks = store.list_tasks(&TaskFilter::default()).map_err(store_err)?;

    let mut out = String::from("id,title,status,priority,dueDate,tags,assignees,createdBy,createdAt\n");
    for task in tasks {
        let mut assignees = Vec::with_capacity(task.assignees.len());
        for id in &task.assignees {
            assignees.push(user_ref(&store, id)?.username);
        }
        let created_by = user_ref(&store, &task.created_by)?.username;
        let row = [
            task.id.as_str().to_string(),
            task.title,
            task.status.as_str().to_string(),
            task.priority.as_str().to_string(),
            task.due_date.map(|d| d.to_string()).unwrap_or_default(),
            task.tags.join(";"),
            assignees.join(";"),
            created_by,
            task.created_at.to_rfc3339(),
        ];
        let rendered: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&rendered.join(","));
        out.push('\n');
    }
    Ok(out)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn fetch_live(store: &Store, id: &TaskId) -> Result<Task, ApiError> {
    store
        .fetch_task(id)
        .map_err(store_err)?
        .ok_or_else(|| ApiError::not_found("Task not found"))
}

fn may_update(caller: &User, task: &Task) -> bool {
    caller.is_admin() || task.created_by == caller.id || task.is_assignee(&caller.id)
}

fn may_delete(caller: &User, task: &Task) -> bool {
    caller.is_admin() || task.created_by == caller.id
}

/// Assignment fan-out. One notification per recipient, skipping the
/// acting user; a failed write is logged and skipped so one bad row
/// cannot sink the mutation that triggered it.
fn notify_assignees<'a>(
    store: &Store,
    task: &Task,
    actor: &UserId,
    recipients: impl Iterator<Item = &'a UserId>,
) {
    for recipient in recipients {
        if recipient == actor {
            continue;
        }
        let notification = match fresh_id(NotificationId::parse) {
            Ok(id) => Notification {
                id,
                recipient: recipient.clone(),
                message: format!("You have been assigned to task \"{}\"", task.title),
                task: Some(task.id.clone()),
                is_read: false,
                created_at: Utc::now(),
            },
            Err(err) => {
                warn!(task = %task.id, recipient = %recipient, "notification id failed: {err}");
                continue;
            }
        };
        if let Err(err) = store.insert_notification(&notification) {
            warn!(task = %task.id, recipient = %recipient, "notification write failed: {err}");
        }
    }
}
