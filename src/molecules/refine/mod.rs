mod collect;
mod generator;
mod prompt;
pub mod testing;

pub use collect::{stream_refinement, Collected};
pub use generator::{ChatMessage, ChunkStream, ContentGenerator, RefinementRequest, Role};
pub use prompt::build_refinement_request;
