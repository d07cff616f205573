use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::Payload;
use crate::api::server::{AppState, MessageResponse};
use crate::db::models::{Reply, Thread};

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateThreadPayload {
    pub thread: String,
    pub user_id: String,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct LikePayload {
    pub thread_id: String,
    pub user_id: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ThreadIdPayload {
    pub id: String,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateReplyPayload {
    pub id: String,
    pub user_id: String,
    pub reply: String,
}

#[derive(Serialize)]
pub struct ThreadListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub threads: Vec<Thread>,
}

#[derive(Serialize)]
pub struct RepliesResponse {
    pub replies: VecDeque<Reply>,
    pub title: String,
}

pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<CreateThreadPayload>,
) -> Json<ThreadListResponse> {
    let thread = Thread::new(payload.thread, payload.user_id);
    tracing::info!("User {} created thread {}", thread.user_id, thread.id);

    let threads = state.store.insert_thread(thread).await;
    Json(ThreadListResponse {
        message: Some("Thread created successfully!".to_string()),
        threads,
    })
}

pub async fn all_threads(State(state): State<Arc<AppState>>) -> Json<ThreadListResponse> {
    Json(ThreadListResponse {
        message: None,
        threads: state.store.list_threads().await,
    })
}

pub async fn like_thread(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<LikePayload>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .store
        .append_like(&payload.thread_id, &payload.user_id)
        .await?;

    tracing::debug!("User {} liked thread {}", payload.user_id, payload.thread_id);
    Ok(Json(MessageResponse::new("You've reacted to the post!")))
}

pub async fn thread_replies(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<ThreadIdPayload>,
) -> ApiResult<Json<RepliesResponse>> {
    let thread = state
        .store
        .find_thread(&payload.id)
        .await
        .ok_or(ApiError::ThreadNotFound(payload.id))?;

    Ok(Json(RepliesResponse {
        replies: thread.replies,
        title: thread.title,
    }))
}

pub async fn create_reply(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<CreateReplyPayload>,
) -> ApiResult<Json<MessageResponse>> {
    let user = state
        .store
        .find_user(&payload.user_id)
        .await
        .ok_or_else(|| ApiError::UserNotFound(payload.user_id.clone()))?;

    let reply = Reply {
        user_id: user.id,
        name: user.username,
        text: payload.reply,
    };
    state.store.append_reply(&payload.id, reply).await?;

    tracing::debug!("User {} replied to thread {}", payload.user_id, payload.id);
    Ok(Json(MessageResponse::new("Response added successfully!")))
}
