mod sidecar_manager;
mod sidecar_store;
mod template_renderer;

pub use sidecar_manager::{MediaListing, SidecarManager};
pub use sidecar_store::SidecarStore;
pub use template_renderer::TemplateRenderer;
