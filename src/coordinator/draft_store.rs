use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDateTime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::observer::DraftObserver;
use crate::atoms::storage::{
    delete_draft, drafts_dir, ensure_data_dirs, load_all_drafts, load_draft, read_reference,
    resolve_data_dir, save_draft, start_watcher, FileEvent, FileWatcherHandle,
};
use crate::molecules::export::{render_export, resolve_save_path};
use crate::molecules::refine::{build_refinement_request, stream_refinement, ContentGenerator};
use crate::molecules::watch::{classify_event, FileChangeAction, FileChangeTracker};
use crate::types::{
    Config, Draft, DraftError, DraftEvent, DraftResult, DraftSummary, GeneralConfig, NewDraft,
    RefineConfig, Revision, TemplateConfig,
};

/// File-backed drafts: one JSON document per draft under `<data_dir>/drafts`.
///
/// The store holds no notion of an "active" draft; see
/// [`DraftSession`](super::DraftSession) for that.
///
/// Saves overwrite the whole document. Two processes writing the same draft
/// can lose each other's updates.
pub struct DraftStore {
    data_dir: PathBuf,
    refine: RefineConfig,
    in_flight: Mutex<HashSet<String>>,
    tracker: Mutex<FileChangeTracker>,
}

impl DraftStore {
    pub fn open(data_dir: impl Into<PathBuf>, refine: RefineConfig) -> DraftResult<Self> {
        let data_dir = data_dir.into();
        ensure_data_dirs(&data_dir)?;
        debug!(data_dir = ?data_dir, "opened draft store");

        Ok(Self {
            data_dir,
            refine,
            in_flight: Mutex::new(HashSet::new()),
            tracker: Mutex::new(FileChangeTracker::new()),
        })
    }

    pub fn from_config(config: &Config) -> DraftResult<Self> {
        let data_dir = resolve_data_dir(config.general.data_dir.as_deref());
        Self::open(data_dir, config.refine.clone())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn drafts_dir(&self) -> PathBuf {
        drafts_dir(&self.data_dir)
    }

    pub fn create(&self, seed: NewDraft) -> DraftResult<Draft> {
        let draft = Draft::new(seed);
        self.persist(&draft)?;
        info!(draft_id = %draft.id, title = %draft.title, "created draft");
        Ok(draft)
    }

    pub fn load(&self, draft_id: &str) -> DraftResult<Option<Draft>> {
        load_draft(&self.data_dir, draft_id)
    }

    fn require(&self, draft_id: &str) -> DraftResult<Draft> {
        self.load(draft_id)?
            .ok_or_else(|| DraftError::DraftNotFound(draft_id.to_string()))
    }

    /// Every stored draft, most recently updated first.
    pub fn get_all(&self) -> DraftResult<Vec<Draft>> {
        load_all_drafts(&self.data_dir)
    }

    pub fn summaries(&self) -> DraftResult<Vec<DraftSummary>> {
        Ok(self.get_all()?.iter().map(Draft::summary).collect())
    }

    /// Asks `generator` to rewrite the current revision according to
    /// `prompt`, streaming chunks to `observer` as they arrive. On success the
    /// result is appended as a new current revision and the updated draft is
    /// returned.
    ///
    /// Any failure (generator error, empty output, cancellation, timeout)
    /// leaves the stored draft exactly as it was. Only one refinement per
    /// draft may run at a time; a second one gets `RefineInFlight`.
    pub async fn refine(
        &self,
        draft_id: &str,
        prompt: &str,
        generator: &dyn ContentGenerator,
        observer: &dyn DraftObserver,
        cancel: &CancellationToken,
    ) -> DraftResult<Draft> {
        let _guard = InFlightGuard::acquire(&self.in_flight, draft_id)?;

        let draft = self.require(draft_id)?;
        let current = draft
            .current_revision()
            .ok_or_else(|| DraftError::RevisionNotFound {
                draft_id: draft.id.clone(),
                revision_id: draft.current_revision_id.clone(),
            })?;

        let voice_profile = match draft.voice.as_deref() {
            Some(voice) => Some(read_reference(
                &self.reference_path(voice),
                self.refine.voice_max_bytes,
            )?),
            None => None,
        };

        info!(draft_id, base_revision = %current.id, "refining draft");
        let request = build_refinement_request(&current.content, voice_profile, prompt);

        let collected = stream_refinement(
            generator,
            request,
            cancel,
            self.refine.timeout(),
            |chunk| observer.notify(DraftEvent::RefinementChunk(chunk.to_string())),
        )
        .await
        .inspect_err(|e| warn!(draft_id, error = %e, "refinement failed"))?;

        if collected.content.trim().is_empty() && !self.refine.allow_empty_output {
            warn!(draft_id, "generator produced no content");
            return Err(DraftError::EmptyOutput);
        }

        // Re-read so a delete or switch made while generating is not overwritten.
        let mut draft = self.require(draft_id)?;
        let revision = draft
            .append_revision(Revision::new(collected.content, Some(prompt.to_string())))
            .clone();
        self.persist(&draft)?;

        info!(
            draft_id,
            revision_id = %revision.id,
            chunks = collected.chunks,
            bytes = revision.content.len(),
            "refinement complete"
        );
        observer.notify(DraftEvent::RefinementComplete {
            draft: draft.clone(),
            revision,
        });

        Ok(draft)
    }

    /// Points the draft at an existing revision. Switching to the revision
    /// that is already current only bumps `updated_at`.
    pub fn switch_revision(
        &self,
        draft_id: &str,
        revision_id: &str,
        observer: &dyn DraftObserver,
    ) -> DraftResult<Draft> {
        let mut draft = self.require(draft_id)?;
        let revision = draft
            .point_to(revision_id)
            .cloned()
            .ok_or_else(|| DraftError::RevisionNotFound {
                draft_id: draft_id.to_string(),
                revision_id: revision_id.to_string(),
            })?;
        self.persist(&draft)?;

        debug!(draft_id, revision_id, "switched revision");
        observer.notify(DraftEvent::RevisionSwitched {
            draft: draft.clone(),
            revision,
        });

        Ok(draft)
    }

    /// Removes the draft's record. Deleting an unknown id is a no-op.
    pub fn delete(&self, draft_id: &str) -> DraftResult<()> {
        if delete_draft(&self.data_dir, draft_id)? {
            self.record_save(draft_id);
            info!(draft_id, "deleted draft");
        } else {
            debug!(draft_id, "delete of unknown draft ignored");
        }
        Ok(())
    }

    /// Content of the current revision.
    pub fn export(&self, draft_id: &str) -> DraftResult<String> {
        let draft = self.require(draft_id)?;
        draft
            .current_revision()
            .map(|r| r.content.clone())
            .ok_or_else(|| DraftError::RevisionNotFound {
                draft_id: draft.id.clone(),
                revision_id: draft.current_revision_id.clone(),
            })
    }

    /// Renders the draft (frontmatter included) and writes it to the path the
    /// templates resolve to under `base_dir`. Returns that path.
    pub fn export_to(
        &self,
        draft_id: &str,
        templates: &TemplateConfig,
        base_dir: &Path,
        date: NaiveDateTime,
    ) -> DraftResult<PathBuf> {
        let draft = self.require(draft_id)?;
        let rendered = render_export(&draft, date)?;
        let path = resolve_save_path(templates, base_dir, &draft, date);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DraftError::storage(parent, e))?;
        }
        fs::write(&path, rendered).map_err(|e| DraftError::storage(&path, e))?;

        info!(draft_id, path = ?path, "exported draft");
        Ok(path)
    }

    /// Starts watching the drafts directory unless `general.file_watch` is
    /// off. Feed the handle's events to [`DraftStore::forward_file_event`].
    pub fn watch(&self, general: &GeneralConfig) -> anyhow::Result<Option<FileWatcherHandle>> {
        if !general.file_watch {
            debug!("file watching disabled");
            return Ok(None);
        }
        start_watcher(&self.drafts_dir(), general.file_watch_debounce_ms).map(Some)
    }

    /// Reports a change made by someone else to `observer`. Returns whether an
    /// event was emitted; echoes of this store's own writes are dropped.
    pub fn forward_file_event(&self, event: &FileEvent, observer: &dyn DraftObserver) -> bool {
        let action = {
            let mut tracker = self.tracker.lock().unwrap_or_else(PoisonError::into_inner);
            tracker.cleanup();
            classify_event(event, &tracker)
        };

        match action {
            FileChangeAction::Changed { id } => {
                debug!(draft_id = %id, "draft changed on disk");
                observer.notify(DraftEvent::DraftChangedOnDisk { id });
                true
            }
            FileChangeAction::Removed { id } => {
                debug!(draft_id = %id, "draft removed on disk");
                observer.notify(DraftEvent::DraftRemovedOnDisk { id });
                true
            }
            FileChangeAction::Suppressed => false,
        }
    }

    fn persist(&self, draft: &Draft) -> DraftResult<()> {
        self.record_save(&draft.id);
        save_draft(&self.data_dir, draft)
    }

    fn record_save(&self, draft_id: &str) {
        self.tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record_save(draft_id);
    }

    // Relative references are taken relative to the data directory.
    fn reference_path(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<String>>,
    id: String,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(set: &'a Mutex<HashSet<String>>, id: &str) -> DraftResult<Self> {
        let mut ids = set.lock().unwrap_or_else(PoisonError::into_inner);
        if !ids.insert(id.to_string()) {
            return Err(DraftError::RefineInFlight(id.to_string()));
        }
        Ok(Self {
            set,
            id: id.to_string(),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}
