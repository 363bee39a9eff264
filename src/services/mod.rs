mod error;
mod html_modal_renderer;
mod yaml_sidecar_store;

pub use error::SidecarError;
pub use html_modal_renderer::HtmlModalRenderer;
pub use yaml_sidecar_store::YamlSidecarStore;
