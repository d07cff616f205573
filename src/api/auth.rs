use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::Payload;
use crate::api::server::{AppState, MessageResponse};
use crate::db::models::{User, generate_id};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub id: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<RegisterPayload>,
) -> ApiResult<Json<MessageResponse>> {
    let user = User {
        id: generate_id(),
        email: payload.email,
        password: payload.password,
        username: payload.username,
    };
    tracing::info!(
        "Registering user {} (email: {}, username: {})",
        user.id,
        user.email,
        user.username
    );

    state.store.insert_user(user).await?;
    Ok(Json(MessageResponse::new("Account created successfully")))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<LoginPayload>,
) -> ApiResult<Json<LoginResponse>> {
    let matches = state
        .store
        .find_users_by_credentials(&payload.email, &payload.password)
        .await;

    // Duplicate credentials are treated the same as a miss.
    let [user] = matches.as_slice() else {
        tracing::debug!(
            "Login failed for {}: {} matching accounts",
            payload.email,
            matches.len()
        );
        return Err(ApiError::IncorrectCredentials);
    };

    tracing::info!("User {} logged in", user.id);
    Ok(Json(LoginResponse {
        message: "Login successfully".to_string(),
        id: user.id.clone(),
    }))
}
