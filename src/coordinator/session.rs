use std::sync::Arc;

use tracing::debug;

use super::draft_store::DraftStore;
use crate::types::{Draft, DraftResult, NewDraft};

/// Tracks which draft a caller is working on.
///
/// Each presenter owns its own session, so two sessions over the same store
/// never disturb each other's active draft.
pub struct DraftSession {
    store: Arc<DraftStore>,
    active: Option<String>,
}

impl DraftSession {
    pub fn new(store: Arc<DraftStore>) -> Self {
        Self {
            store,
            active: None,
        }
    }

    pub fn store(&self) -> &Arc<DraftStore> {
        &self.store
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Re-reads the active draft from disk.
    pub fn active_draft(&self) -> DraftResult<Option<Draft>> {
        match &self.active {
            Some(id) => self.store.load(id),
            None => Ok(None),
        }
    }

    /// Creates a draft and makes it active.
    pub fn create(&mut self, seed: NewDraft) -> DraftResult<Draft> {
        let draft = self.store.create(seed)?;
        self.active = Some(draft.id.clone());
        Ok(draft)
    }

    /// Makes `draft_id` active if it exists. An unknown id leaves the current
    /// selection unchanged and returns `None`.
    pub fn set_active(&mut self, draft_id: &str) -> DraftResult<Option<Draft>> {
        let draft = self.store.load(draft_id)?;
        if draft.is_some() {
            debug!(draft_id, "active draft changed");
            self.active = Some(draft_id.to_string());
        }
        Ok(draft)
    }

    /// Deletes the draft, clearing the selection if it was the active one.
    pub fn delete(&mut self, draft_id: &str) -> DraftResult<()> {
        self.store.delete(draft_id)?;
        if self.active.as_deref() == Some(draft_id) {
            self.active = None;
        }
        Ok(())
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }
}
