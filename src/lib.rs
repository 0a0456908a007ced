//! Draft revision store and filename template resolver for turning interview
//! transcripts into articles.
//!
//! Drafts live as one JSON document each under `<data_dir>/drafts`. Every
//! refinement appends a full-text [`Revision`](types::Revision); navigating
//! history only moves the draft's current-revision pointer.

pub mod atoms;
pub mod coordinator;
pub mod molecules;
pub mod types;

pub use coordinator::{DraftObserver, DraftSession, DraftStore, NullObserver};
pub use molecules::refine::{ChunkStream, ContentGenerator, RefinementRequest};
pub use molecules::template::{resolve_template, sanitize_title, slugify, validate_template};
pub use types::{
    Config, Draft, DraftError, DraftEvent, DraftResult, NewDraft, Revision, TemplateContext,
};
