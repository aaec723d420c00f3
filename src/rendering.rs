pub mod draw_ops;
mod overlay_renderer;
mod viewer;

pub use overlay_renderer::OverlayRenderer;
pub use viewer::{OverlayViewer, SystemViewer};
