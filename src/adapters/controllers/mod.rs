pub mod health_controller;
pub mod media_controller;
pub mod metadata_controller;
