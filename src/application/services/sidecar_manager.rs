use std::{collections::HashMap, path::Path, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    application::{
        error::ApplicationError,
        repositories::{field_config_source::FieldConfigSource, media_lookup::MediaLookup},
        services::SidecarStore,
    },
    domain::{
        config::form::MetadataForm,
        models::{
            field::{editable_field_names, EditableFields, FieldDescriptor},
            media::{clean_filename, is_media_name, MediaEntry},
            metadata::{sanitize_value, sidecar_path, MetadataRecord},
        },
    },
};

/// Everything the media browser needs to prefill the metadata dialog.
#[derive(Debug, Clone)]
pub struct MediaListing {
    pub form: MetadataForm,
    pub editable: EditableFields,
    pub media: Vec<MediaEntry>,
}

/// Creates and updates the metadata sidecar kept next to each media file.
pub struct SidecarManager {
    media_lookup: Arc<dyn MediaLookup>,
    field_config: Arc<dyn FieldConfigSource>,
    store: Arc<dyn SidecarStore>,
}

impl SidecarManager {
    pub fn new(
        media_lookup: Arc<dyn MediaLookup>,
        field_config: Arc<dyn FieldConfigSource>,
        store: Arc<dyn SidecarStore>,
    ) -> Self {
        Self {
            media_lookup,
            field_config,
            store,
        }
    }

    /// Writes an empty record for a media file unless one already exists.
    ///
    /// Returns `true` when a new sidecar was written.
    pub async fn ensure_record(
        &self,
        media_path: &Path,
        descriptors: &[FieldDescriptor],
    ) -> Result<bool, ApplicationError> {
        self.require_media(media_path).await?;

        let sidecar = sidecar_path(media_path);
        if self.store.exists(&sidecar).await? {
            debug!("Sidecar already present: {}", sidecar.display());
            return Ok(false);
        }

        let editable = editable_field_names(descriptors);
        let record = MetadataRecord::empty_for(editable.names());
        self.store.save(&sidecar, &record).await?;

        info!(
            "Created sidecar {} with {} field(s)",
            sidecar.display(),
            record.len()
        );
        Ok(true)
    }

    /// Merges posted values for the editable fields into the stored record.
    ///
    /// Only editable fields present in `posted` are overwritten; every other
    /// key in the record is written back unchanged.
    pub async fn apply_edits(
        &self,
        media_path: &Path,
        descriptors: &[FieldDescriptor],
        posted: &HashMap<String, String>,
    ) -> Result<MetadataRecord, ApplicationError> {
        self.require_media(media_path).await?;

        let sidecar = sidecar_path(media_path);
        let mut record = self.store.load(&sidecar).await?;

        let mut updated = 0;
        for name in editable_field_names(descriptors).names() {
            if let Some(value) = posted.get(name) {
                record.set(name, sanitize_value(value));
                updated += 1;
            }
        }

        self.store.save(&sidecar, &record).await?;

        info!("Updated {} field(s) in {}", updated, sidecar.display());
        Ok(record)
    }

    /// Upload hook: makes sure a freshly stored media file has a sidecar.
    pub async fn media_uploaded(&self, page: &str, filename: &str) -> Result<bool, ApplicationError> {
        let filename = Self::filename(filename)?;
        let media_path = self.media_lookup.media_path(page, &filename)?;
        let form = self.field_config.metadata_form(page).await?;

        self.ensure_record(&media_path, &form.fields).await
    }

    /// Edit hook: applies a submitted metadata form to a page's media file.
    pub async fn edit_submitted(
        &self,
        page: &str,
        filename: &str,
        posted: &HashMap<String, String>,
    ) -> Result<MetadataRecord, ApplicationError> {
        let filename = Self::filename(filename)?;
        let media_path = self.media_lookup.media_path(page, &filename)?;
        let form = self.field_config.metadata_form(page).await?;

        self.apply_edits(&media_path, &form.fields, posted).await
    }

    pub async fn media_listing(&self, page: &str) -> Result<MediaListing, ApplicationError> {
        let form = self.field_config.metadata_form(page).await?;
        let media = self.media_lookup.list_media(page).await?;

        Ok(MediaListing {
            editable: form.editable_fields(),
            form,
            media,
        })
    }

    async fn require_media(&self, media_path: &Path) -> Result<(), ApplicationError> {
        if self.media_lookup.media_exists(media_path).await? {
            Ok(())
        } else {
            warn!("Media file not found: {}", media_path.display());
            Err(ApplicationError::MediaFileNotFound(
                media_path.display().to_string(),
            ))
        }
    }

    fn filename(raw: &str) -> Result<String, ApplicationError> {
        clean_filename(raw)
            .filter(|name| is_media_name(name))
            .ok_or_else(|| ApplicationError::InvalidFilename(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{BTreeMap, HashSet},
        path::PathBuf,
        sync::Mutex,
    };

    use async_trait::async_trait;

    use super::*;

    const PAGE_DIR: &str = "/pages/blog";

    #[derive(Default)]
    struct MemoryMedia {
        files: Mutex<HashSet<PathBuf>>,
    }

    #[async_trait]
    impl MediaLookup for MemoryMedia {
        fn page_dir(&self, page: &str) -> Result<PathBuf, ApplicationError> {
            Ok(Path::new("/pages").join(page))
        }

        fn media_path(&self, page: &str, filename: &str) -> Result<PathBuf, ApplicationError> {
            Ok(self.page_dir(page)?.join(filename))
        }

        async fn media_exists(&self, path: &Path) -> Result<bool, ApplicationError> {
            Ok(self.files.lock().unwrap().contains(path))
        }

        async fn list_media(&self, _page: &str) -> Result<Vec<MediaEntry>, ApplicationError> {
            Ok(Vec::new())
        }

        async fn save_media(
            &self,
            page: &str,
            filename: &str,
            _content: &[u8],
        ) -> Result<PathBuf, ApplicationError> {
            let path = self.media_path(page, filename)?;
            self.files.lock().unwrap().insert(path.clone());
            Ok(path)
        }
    }

    struct StaticForm(MetadataForm);

    #[async_trait]
    impl FieldConfigSource for StaticForm {
        async fn metadata_form(&self, _page: &str) -> Result<MetadataForm, ApplicationError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<BTreeMap<PathBuf, MetadataRecord>>,
    }

    #[async_trait]
    impl SidecarStore for MemoryStore {
        async fn exists(&self, sidecar: &Path) -> Result<bool, ApplicationError> {
            Ok(self.records.lock().unwrap().contains_key(sidecar))
        }

        async fn load(&self, sidecar: &Path) -> Result<MetadataRecord, ApplicationError> {
            self.records
                .lock()
                .unwrap()
                .get(sidecar)
                .cloned()
                .ok_or_else(|| ApplicationError::SidecarNotFound(sidecar.display().to_string()))
        }

        async fn save(&self, sidecar: &Path, record: &MetadataRecord) -> Result<(), ApplicationError> {
            self.records
                .lock()
                .unwrap()
                .insert(sidecar.to_path_buf(), record.clone());
            Ok(())
        }
    }

    fn descriptors() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("filename", "text"),
            FieldDescriptor::new("alt", "text"),
            FieldDescriptor::new("caption", "text"),
        ]
    }

    fn setup() -> (SidecarManager, Arc<MemoryMedia>, Arc<MemoryStore>) {
        let media = Arc::new(MemoryMedia::default());
        let store = Arc::new(MemoryStore::default());
        let manager = SidecarManager::new(
            media.clone(),
            Arc::new(StaticForm(MetadataForm::new(descriptors()))),
            store.clone(),
        );
        (manager, media, store)
    }

    fn posted(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn stored(store: &MemoryStore, path: &str) -> MetadataRecord {
        store.records.lock().unwrap()[Path::new(path)].clone()
    }

    #[tokio::test]
    async fn ensure_record_creates_blank_fields() {
        let (manager, media, store) = setup();
        let photo = media.save_media("blog", "photo.jpg", b"jpg").await.unwrap();

        assert!(manager.ensure_record(&photo, &descriptors()).await.unwrap());

        let record = stored(&store, "/pages/blog/photo.jpg.meta.yaml");
        assert_eq!(record, MetadataRecord::empty_for(["alt", "caption"]));
        assert!(!record.contains_key("filename"));
    }

    #[tokio::test]
    async fn ensure_record_is_idempotent() {
        let (manager, media, store) = setup();
        let photo = media.save_media("blog", "photo.jpg", b"jpg").await.unwrap();

        manager.ensure_record(&photo, &descriptors()).await.unwrap();
        let first = stored(&store, "/pages/blog/photo.jpg.meta.yaml");

        assert!(!manager.ensure_record(&photo, &descriptors()).await.unwrap());
        assert_eq!(stored(&store, "/pages/blog/photo.jpg.meta.yaml"), first);
    }

    #[tokio::test]
    async fn ensure_record_keeps_existing_sidecar() {
        let (manager, media, store) = setup();
        let photo = media.save_media("blog", "photo.jpg", b"jpg").await.unwrap();
        let mut existing = MetadataRecord::new();
        existing.set("alt", "already here".to_string());
        store
            .save(Path::new("/pages/blog/photo.jpg.meta.yaml"), &existing)
            .await
            .unwrap();

        assert!(!manager.media_uploaded("blog", "photo.jpg").await.unwrap());
        assert_eq!(stored(&store, "/pages/blog/photo.jpg.meta.yaml"), existing);
    }

    #[tokio::test]
    async fn apply_edits_merges_without_dropping_keys() {
        let (manager, media, store) = setup();
        let photo = media.save_media("blog", "photo.jpg", b"jpg").await.unwrap();
        let mut existing = MetadataRecord::new();
        existing.set("alt", "dog".to_string());
        existing.set("caption", String::new());
        existing.set("extra", "keep-me".to_string());
        store
            .save(Path::new("/pages/blog/photo.jpg.meta.yaml"), &existing)
            .await
            .unwrap();

        let merged = manager
            .apply_edits(&photo, &descriptors(), &posted(&[("alt", "new dog photo")]))
            .await
            .unwrap();

        assert_eq!(merged.get_str("alt"), Some("new dog photo"));
        assert_eq!(merged.get_str("caption"), Some(""));
        assert_eq!(merged.get_str("extra"), Some("keep-me"));
        assert_eq!(merged.len(), 3);
        assert_eq!(stored(&store, "/pages/blog/photo.jpg.meta.yaml"), merged);
    }

    #[tokio::test]
    async fn apply_edits_ignores_unrecognized_and_reserved_keys() {
        let (manager, media, store) = setup();
        let photo = media.save_media("blog", "photo.jpg", b"jpg").await.unwrap();
        manager.ensure_record(&photo, &descriptors()).await.unwrap();

        let merged = manager
            .apply_edits(
                &photo,
                &descriptors(),
                &posted(&[
                    ("caption", "<em>Sunset</em> at the lake"),
                    ("filename", "renamed.jpg"),
                    ("rogue", "value"),
                ]),
            )
            .await
            .unwrap();

        assert_eq!(merged.get_str("caption"), Some("Sunset at the lake"));
        assert_eq!(merged.get_str("alt"), Some(""));
        assert!(!merged.contains_key("filename"));
        assert!(!merged.contains_key("rogue"));
        assert_eq!(stored(&store, "/pages/blog/photo.jpg.meta.yaml"), merged);
    }

    #[tokio::test]
    async fn missing_media_is_reported_with_its_path() {
        let (manager, _media, store) = setup();

        let err = manager
            .edit_submitted("blog", "missing.png", &posted(&[("alt", "x")]))
            .await
            .unwrap_err();
        match err {
            ApplicationError::MediaFileNotFound(path) => {
                assert_eq!(path, format!("{}/missing.png", PAGE_DIR))
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = manager.media_uploaded("blog", "missing.png").await.unwrap_err();
        assert!(matches!(err, ApplicationError::MediaFileNotFound(_)));
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_without_sidecar_fails() {
        let (manager, media, _store) = setup();
        media.save_media("blog", "photo.jpg", b"jpg").await.unwrap();

        let err = manager
            .edit_submitted("blog", "photo.jpg", &posted(&[("alt", "x")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::SidecarNotFound(_)));
    }

    #[tokio::test]
    async fn unusable_filenames_are_rejected() {
        let (manager, _media, _store) = setup();

        let err = manager.media_uploaded("blog", "../escape.jpg").await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidFilename(_)));
    }

    #[tokio::test]
    async fn sidecars_and_page_files_are_not_media() {
        let (manager, media, store) = setup();
        media
            .save_media("blog", "photo.jpg.meta.yaml", b"alt: x")
            .await
            .unwrap();

        for name in ["photo.jpg.meta.yaml", "media-metadata.yaml", "item.md", ".hidden"] {
            assert!(matches!(
                manager.media_uploaded("blog", name).await,
                Err(ApplicationError::InvalidFilename(_))
            ));
            assert!(matches!(
                manager
                    .edit_submitted("blog", name, &posted(&[("alt", "x")]))
                    .await,
                Err(ApplicationError::InvalidFilename(_))
            ));
        }
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_exposes_editable_fields() {
        let (manager, _media, _store) = setup();

        let listing = manager.media_listing("blog").await.unwrap();
        assert_eq!(
            listing.editable.names().collect::<Vec<_>>(),
            vec!["alt", "caption"]
        );
        assert_eq!(listing.form.fields.len(), 3);
        assert!(listing.media.is_empty());
    }
}
