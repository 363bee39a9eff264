pub mod adapters;
pub mod application;
pub mod domain;
pub mod services;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};

use adapters::{
    controllers::{
        health_controller::HealthController, media_controller::MediaController,
        metadata_controller::MetadataController,
    },
    middleware::require_admin_secret,
    repositories::{FsMediaLookup, YamlFieldConfigSource},
    state::AppState,
};
use application::{
    repositories::{field_config_source::FieldConfigSource, media_lookup::MediaLookup},
    services::{SidecarManager, SidecarStore, TemplateRenderer},
};
use domain::config::{form::MetadataForm, server::ServerConfig};
use services::{HtmlModalRenderer, YamlSidecarStore};

/// Wires the filesystem-backed collaborators into an application state.
pub fn build_state(config: ServerConfig, form: MetadataForm) -> AppState {
    let media_lookup =
        Arc::new(FsMediaLookup::new(config.pages_root.clone())) as Arc<dyn MediaLookup>;
    let field_config = Arc::new(YamlFieldConfigSource::new(form, media_lookup.clone()))
        as Arc<dyn FieldConfigSource>;
    let store = Arc::new(YamlSidecarStore::new()) as Arc<dyn SidecarStore>;

    AppState {
        config: Arc::new(config),
        sidecar_manager: Arc::new(SidecarManager::new(
            media_lookup.clone(),
            field_config,
            store,
        )),
        media_lookup,
        renderer: Arc::new(HtmlModalRenderer::new()) as Arc<dyn TemplateRenderer>,
        started_at: Utc::now(),
    }
}

pub fn build_router(app_state: AppState) -> Router {
    let cors = match &app_state.config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    };

    // Admin routes, guarded by X-Admin-Secret when one is configured
    let admin_routes = Router::new()
        .route("/media-metadata", get(MetadataController::bootstrap))
        .route(
            "/media-metadata/inline.js",
            get(MetadataController::inline_script),
        )
        .route("/media-metadata/task", post(MetadataController::handle_task))
        .route(
            "/media-metadata/uploaded",
            post(MetadataController::media_uploaded),
        )
        .route("/media", post(MediaController::upload_media))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_admin_secret,
        ));

    let admin_base = app_state.config.admin_base.clone();
    let router = Router::new().route("/health", get(HealthController::health_check));
    let router = if admin_base.is_empty() {
        router.merge(admin_routes)
    } else {
        router.nest(&admin_base, admin_routes)
    };

    router.layer(cors).with_state(app_state)
}
