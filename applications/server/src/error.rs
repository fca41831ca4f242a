//! Server errors and their JSON responses
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The catalog store failed; clients only see a generic message
    #[error("Database error: {0}")]
    Database(#[from] lyra_storage::StorageError),

    /// Invalid or unreadable configuration, raised before serving
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServerError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::Database(e) => {
                tracing::error!(error = ?e, "Catalog query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            ServerError::Config(msg) => {
                tracing::error!(%msg, "Configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
