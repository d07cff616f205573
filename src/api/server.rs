use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{auth, threads};
use crate::config::ServerConfig;
use crate::db::repo::{ForumStore, InMemoryStore};

pub struct AppState {
    pub store: Arc<dyn ForumStore>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello world"))
}

pub fn make_app(store: Arc<dyn ForumStore>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/api", get(hello))
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/create/thread", post(threads::create_thread))
        .route("/api/all/threads", get(threads::all_threads))
        .route("/api/thread/like", post(threads::like_thread))
        .route("/api/thread/replies", post(threads::thread_replies))
        .route("/api/create/reply", post(threads::create_reply))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: &ServerConfig) -> anyhow::Result<()> {
    let app = make_app(Arc::new(InMemoryStore::new()));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Server listening on {}", address);

    axum::serve(listener, app).await?;
    Ok(())
}
