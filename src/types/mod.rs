mod config;
mod draft;
mod error;
mod event;
mod template;

pub use config::{Config, GeneralConfig, RefineConfig, TemplateConfig};
pub use draft::{Draft, DraftSummary, GenerationOptions, NewDraft, Revision};
pub use error::{DraftError, DraftResult};
pub use event::DraftEvent;
pub use template::TemplateContext;
