use crate::services::{fresh_id, logs, store_err, user_ref};
use crate::AppState;
use chrono::Utc;
use crewboard_api::{ApiError, CommentView};
use crewboard_model::{Comment, CommentId, LogAction, NewComment, TaskId, User};

/// Activity detail keeps a preview of the comment, not the whole body.
const DETAIL_PREVIEW_LEN: usize = 50;

pub async fn add(
    state: &AppState,
    caller: &User,
    task_id: &TaskId,
    payload: NewComment,
) -> Result<CommentView, ApiError> {
    let content = payload.content.trim().to_string();
    if content.is_empty() {
        return Err(ApiError::validation("content is required"));
    }

    let store = state.store.lock().await;
    let parent = store
        .fetch_task(task_id)
        .map_err(store_err)?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    let comment = Comment {
        id: fresh_id(CommentId::parse)?,
        task: parent.id.clone(),
        user: caller.id.clone(),
        content,
        created_at: Utc::now(),
    };
    store.insert_comment(&comment).map_err(store_err)?;
    logs::append(
        &store,
        &parent.id,
        &caller.id,
        LogAction::AddedComment,
        format!("Added comment: {}", preview(&comment.content)),
    );

    let user = user_ref(&store, &caller.id)?;
    Ok(CommentView::new(comment, user))
}

pub async fn list(state: &AppState, task_id: &TaskId) -> Result<Vec<CommentView>, ApiError> {
    let store = state.store.lock().await;
    if store.fetch_task(task_id).map_err(store_err)?.is_none() {
        return Err(ApiError::not_found("Task not found"));
    }
    let comments = store.list_comments(task_id).map_err(store_err)?;
    let mut views = Vec::with_capacity(comments.len());
    for comment in comments {
        let user = user_ref(&store, &comment.user)?;
        views.push(CommentView::new(comment, user));
    }
    Ok(views)
}

fn preview(content: &str) -> String {
    if content.chars().count() <= DETAIL_PREVIEW_LEN {
        return content.to_string();
    }
    let clipped: String = content.chars().take(DETAIL_PREVIEW_LEN).collect();
    format!("{clipped}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_clips_long_comments() {
        let short = "looks good";
        assert_eq!(preview(short), short);

        let long = "x".repeat(80);
        let clipped = preview(&long);
        assert!(clipped.ends_with("..."));
        assert_eq!(clipped.chars().count(), DETAIL_PREVIEW_LEN + 3);
    }
}
