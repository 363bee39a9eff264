use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::media_dto::{PageQuery, UploadMediaResponse},
        state::AppState,
    },
    application::error::ApplicationError,
    domain::models::media::clean_filename,
};

pub struct MediaController;

impl MediaController {
    /// Stores an uploaded media file in the page directory and creates its sidecar
    /// POST {admin}/media?page=<route>
    /// Multipart: `file` (required), `filename` (optional, overrides the part's file name)
    pub async fn upload_media(
        State(app_state): State<AppState>,
        Query(query): Query<PageQuery>,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<UploadMediaResponse>), ApplicationError> {
        let page = query.route()?;

        let mut file_bytes: Option<Vec<u8>> = None;
        let mut part_filename: Option<String> = None;
        let mut filename: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    part_filename = field.file_name().map(String::from);
                    file_bytes = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|e| {
                                warn!("Cannot read file bytes: {}", e);
                                ApplicationError::BadRequest("Invalid file data".to_string())
                            })?
                            .to_vec(),
                    );
                }
                "filename" => {
                    filename = Some(field.text().await.map_err(|e| {
                        warn!("Invalid filename field: {}", e);
                        ApplicationError::BadRequest("Invalid request data".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let file_bytes = file_bytes.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest("Missing required field".to_string())
        })?;
        let raw_filename = filename.or(part_filename).ok_or_else(|| {
            warn!("Upload carries no filename");
            ApplicationError::BadRequest("Missing required field".to_string())
        })?;
        let filename = clean_filename(&raw_filename)
            .ok_or_else(|| ApplicationError::InvalidFilename(raw_filename.clone()))?;

        app_state
            .media_lookup
            .save_media(page, &filename, &file_bytes)
            .await?;
        let metadata_created = app_state
            .sidecar_manager
            .media_uploaded(page, &filename)
            .await?;

        info!(
            "Uploaded {} to page {} (sidecar created: {})",
            filename, page, metadata_created
        );

        Ok((
            StatusCode::CREATED,
            Json(UploadMediaResponse {
                filename,
                metadata_created,
            }),
        ))
    }
}
