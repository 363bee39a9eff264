use std::sync::Arc;

use axum::extract::FromRef;
use chrono::{DateTime, Utc};

use crate::{
    application::{
        repositories::media_lookup::MediaLookup,
        services::{SidecarManager, TemplateRenderer},
    },
    domain::config::server::ServerConfig,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub sidecar_manager: Arc<SidecarManager>,
    pub media_lookup: Arc<dyn MediaLookup>,
    pub renderer: Arc<dyn TemplateRenderer>,
    pub started_at: DateTime<Utc>,
}
