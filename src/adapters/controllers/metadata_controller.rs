use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use tracing::info;

use crate::{
    adapters::{
        dto::{
            bootstrap_dto::BootstrapResponse,
            media_dto::{MediaUploadedRequest, PageQuery},
        },
        state::AppState,
    },
    application::{dto::admin_task_dto::AdminTaskDTO, error::ApplicationError},
};

pub struct MetadataController;

impl MetadataController {
    /// Field list, prefilled media list and dialog markup for a page
    /// GET {admin}/media-metadata?page=<route>
    pub async fn bootstrap(
        State(app_state): State<AppState>,
        Query(query): Query<PageQuery>,
    ) -> Result<Json<BootstrapResponse>, ApplicationError> {
        Ok(Json(Self::build_bootstrap(&app_state, query.route()?).await?))
    }

    /// Same payload as `bootstrap`, as inline script declarations
    /// GET {admin}/media-metadata/inline.js?page=<route>
    pub async fn inline_script(
        State(app_state): State<AppState>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, ApplicationError> {
        let payload = Self::build_bootstrap(&app_state, query.route()?).await?;
        let script = payload
            .to_inline_js()
            .map_err(|e| ApplicationError::InternalError(e.to_string()))?;

        Ok((
            [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
            script,
        )
            .into_response())
    }

    /// Shared admin task hook; only the metadata edit task is handled here
    /// POST {admin}/media-metadata/task?page=<route>
    pub async fn handle_task(
        State(app_state): State<AppState>,
        Query(query): Query<PageQuery>,
        Form(form): Form<HashMap<String, String>>,
    ) -> Result<StatusCode, ApplicationError> {
        let page = query.route()?;
        let task = AdminTaskDTO::from_form(form);

        if !task.is_metadata_edit() {
            return Err(ApplicationError::UnknownTask(task.method));
        }

        let filename = task
            .filename
            .as_deref()
            .ok_or_else(|| ApplicationError::BadRequest("Missing filename".to_string()))?;

        info!("Saving metadata for {} on page {}", filename, page);
        app_state
            .sidecar_manager
            .edit_submitted(page, filename, &task.values)
            .await?;

        Ok(StatusCode::NO_CONTENT)
    }

    /// Upload notification hook, fired once the media file is stored
    /// POST {admin}/media-metadata/uploaded?page=<route>
    pub async fn media_uploaded(
        State(app_state): State<AppState>,
        Query(query): Query<PageQuery>,
        Form(body): Form<MediaUploadedRequest>,
    ) -> Result<StatusCode, ApplicationError> {
        let page = query.route()?;
        let created = app_state
            .sidecar_manager
            .media_uploaded(page, &body.filename)
            .await?;

        info!(
            "Upload hook for {} on page {} (sidecar created: {})",
            body.filename, page, created
        );
        Ok(StatusCode::NO_CONTENT)
    }

    async fn build_bootstrap(
        app_state: &AppState,
        page: &str,
    ) -> Result<BootstrapResponse, ApplicationError> {
        let listing = app_state.sidecar_manager.media_listing(page).await?;
        let modal = app_state.renderer.render_modal(&listing.form)?;

        Ok(BootstrapResponse::new(
            &listing,
            app_state.config.task_url(page),
            modal,
        ))
    }
}
