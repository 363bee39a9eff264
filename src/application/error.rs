#[derive(Debug)]
pub enum ApplicationError {
    MediaFileNotFound(String),
    SidecarNotFound(String),
    MalformedSidecar(String),
    InvalidFilename(String),
    BadRequest(String),
    UnknownTask(String),
    Unauthorized,
    InvalidConfiguration(String),
    InternalError(String),
}
