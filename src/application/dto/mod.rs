pub mod admin_task_dto;
