use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{application::error::ApplicationError, domain::config::server::ServerConfig};

pub const ADMIN_SECRET_HEADER: &str = "X-Admin-Secret";

/// Rejects admin requests without the configured `X-Admin-Secret` header.
/// Does nothing when no secret is configured.
pub async fn require_admin_secret(
    State(config): State<Arc<ServerConfig>>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected_secret) = config.admin_secret.as_deref() else {
        return next.run(request).await;
    };

    match headers.get(ADMIN_SECRET_HEADER).map(|v| v.to_str()) {
        Some(Ok(provided_secret)) if provided_secret == expected_secret => next.run(request).await,
        Some(Ok(_)) => {
            warn!("Invalid secret provided in {} header", ADMIN_SECRET_HEADER);
            ApplicationError::Unauthorized.into_response()
        }
        Some(Err(_)) => {
            warn!("{} header contains invalid UTF-8", ADMIN_SECRET_HEADER);
            ApplicationError::BadRequest("Bad request".to_string()).into_response()
        }
        None => {
            warn!("{} header is missing", ADMIN_SECRET_HEADER);
            ApplicationError::Unauthorized.into_response()
        }
    }
}
