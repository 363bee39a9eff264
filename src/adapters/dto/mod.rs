pub mod bootstrap_dto;
pub mod media_dto;
