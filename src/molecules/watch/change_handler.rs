use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::atoms::storage::FileEvent;

const SUPPRESSION_WINDOW_MS: u64 = 2000;

#[derive(Debug, PartialEq, Eq)]
pub enum FileChangeAction {
    Changed { id: String },
    Removed { id: String },
    Suppressed,
}

/// Remembers when this process last wrote each draft so the watcher does not
/// report our own saves back to us.
#[derive(Debug, Default)]
pub struct FileChangeTracker {
    save_timestamps: HashMap<String, Instant>,
}

impl FileChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_save(&mut self, draft_id: &str) {
        self.save_timestamps
            .insert(draft_id.to_string(), Instant::now());
    }

    fn should_suppress(&self, draft_id: &str) -> bool {
        if let Some(timestamp) = self.save_timestamps.get(draft_id) {
            timestamp.elapsed() < Duration::from_millis(SUPPRESSION_WINDOW_MS)
        } else {
            false
        }
    }

    pub fn cleanup(&mut self) {
        let cutoff = Duration::from_secs(10);
        self.save_timestamps.retain(|_, ts| ts.elapsed() < cutoff);
    }
}

pub fn classify_event(event: &FileEvent, tracker: &FileChangeTracker) -> FileChangeAction {
    if tracker.should_suppress(event.draft_id()) {
        return FileChangeAction::Suppressed;
    }

    match event {
        FileEvent::Modified(id) => FileChangeAction::Changed { id: id.clone() },
        FileEvent::Removed(id) => FileChangeAction::Removed { id: id.clone() },
    }
}
