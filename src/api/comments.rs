use axum::{Json, extract::State};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::required_text;
use super::{ApiError, AppState, CommentDto, PostDto, ThreadResponse};

const MAX_COMMENT_CHARS: usize = 300;

const POST_AUTHOR: &str = "Change can";
const POST_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1548199973-03cce0bbc87b?auto=format&fit=crop&w=1200&q=80";

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub message: Option<String>,
}

fn post_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 10, 16, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// GET /it09/thread
/// The post is fixed; only its comments are stored.
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ThreadResponse>, ApiError> {
    let comments = state.store().list_comments().await?;

    Ok(Json(ThreadResponse {
        post: PostDto {
            author: POST_AUTHOR,
            created_at_utc: post_created_at(),
            image_url: POST_IMAGE_URL,
        },
        comments: comments.into_iter().map(CommentDto::from).collect(),
    }))
}

pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<Json<CommentDto>, ApiError> {
    let message = required_text(payload.message.as_deref(), "Message", MAX_COMMENT_CHARS)?;

    let comment = state.store().add_comment(&message, Utc::now()).await?;

    Ok(Json(comment.into()))
}
