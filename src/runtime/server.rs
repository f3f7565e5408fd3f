use axum::{routing::get, Router};
use tokio::net::TcpListener;

use super::RuntimeError;

pub fn router() -> Router {
    Router::new().route("/", get(root)).route("/health", get(health))
}

async fn root() -> &'static str {
    "Bot is running!"
}

async fn health() -> &'static str {
    "ok"
}

pub async fn bind(port: u16) -> Result<TcpListener, RuntimeError> {
    TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|e| RuntimeError::Bind(port, e))
}

pub async fn serve(listener: TcpListener) -> Result<(), RuntimeError> {
    axum::serve(listener, router()).await.map_err(RuntimeError::Serve)
}
