mod change_handler;

pub use change_handler::{classify_event, FileChangeAction, FileChangeTracker};
