mod render;
mod save_path;

pub use render::{export_context, render_export};
pub use save_path::resolve_save_path;
