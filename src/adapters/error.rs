use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::MediaFileNotFound(ref path) => {
                warn!("Media file not found: {}", path);
                (
                    StatusCode::BAD_REQUEST,
                    format!("Media file not found: {}", path),
                )
            }
            ApplicationError::SidecarNotFound(ref path) => {
                warn!("Metadata file not found: {}", path);
                (
                    StatusCode::BAD_REQUEST,
                    format!("Metadata file not found: {}", path),
                )
            }
            ApplicationError::MalformedSidecar(ref msg) => {
                warn!("Malformed sidecar: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApplicationError::InvalidFilename(ref name) => {
                warn!("Rejected filename: {:?}", name);
                (StatusCode::BAD_REQUEST, "Invalid filename".to_string())
            }
            ApplicationError::BadRequest(ref msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApplicationError::UnknownTask(ref method) => {
                warn!("Unhandled admin task: {}", method);
                (StatusCode::NOT_FOUND, "Unknown task".to_string())
            }
            ApplicationError::Unauthorized => {
                warn!("Unauthorized access attempt");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApplicationError::InvalidConfiguration(ref msg) => {
                error!("Invalid configuration: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": { "msg": error_message },
        }));

        (status, body).into_response()
    }
}
