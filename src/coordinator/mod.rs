mod draft_store;
mod observer;
mod session;

pub use draft_store::DraftStore;
pub use observer::{DraftObserver, NullObserver};
pub use session::DraftSession;
