use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEvent, Debouncer};
use tracing::{debug, warn};

use super::draft_io::record_id;

/// A draft record that changed on disk, named by draft id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Modified(String),
    Removed(String),
}

impl FileEvent {
    pub fn draft_id(&self) -> &str {
        match self {
            FileEvent::Modified(id) | FileEvent::Removed(id) => id,
        }
    }
}

pub struct FileWatcherHandle {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    pub receiver: mpsc::Receiver<FileEvent>,
}

fn to_file_event(event: &DebouncedEvent) -> Option<FileEvent> {
    let id = record_id(&event.path)?;
    if event.path.exists() {
        Some(FileEvent::Modified(id))
    } else {
        Some(FileEvent::Removed(id))
    }
}

/// Watches `drafts_dir` for draft records created, rewritten or removed.
/// Temp files and anything that is not a record are ignored.
pub fn start_watcher(drafts_dir: &Path, debounce_ms: u64) -> Result<FileWatcherHandle> {
    let (tx, rx) = mpsc::channel();

    let mut debouncer = new_debouncer(
        Duration::from_millis(debounce_ms),
        move |res: DebounceEventResult| match res {
            Ok(events) => {
                for file_event in events.iter().filter_map(to_file_event) {
                    if tx.send(file_event).is_err() {
                        debug!("file watcher receiver dropped");
                        return;
                    }
                }
            }
            Err(e) => warn!(error = %e, "file watcher error"),
        },
    )
    .with_context(|| "Failed to create file watcher")?;

    debouncer
        .watcher()
        .watch(drafts_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch drafts dir: {:?}", drafts_dir))?;

    debug!(dir = ?drafts_dir, debounce_ms, "watching drafts");
    Ok(FileWatcherHandle {
        _debouncer: debouncer,
        receiver: rx,
    })
}
