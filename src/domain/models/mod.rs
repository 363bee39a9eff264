pub mod field;
pub mod media;
pub mod metadata;
