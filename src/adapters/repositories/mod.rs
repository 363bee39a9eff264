mod fs_media_lookup;
mod yaml_field_config_source;

pub use fs_media_lookup::FsMediaLookup;
pub use yaml_field_config_source::YamlFieldConfigSource;
