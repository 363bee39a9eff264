pub mod field_config_source;
pub mod media_lookup;
