use super::{Draft, Revision};

/// Notifications pushed to whoever is presenting drafts.
///
/// Within one operation events arrive in order: every `RefinementChunk`
/// before the matching `RefinementComplete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEvent {
    RefinementChunk(String),
    RefinementComplete { draft: Draft, revision: Revision },
    RevisionSwitched { draft: Draft, revision: Revision },
    DraftChangedOnDisk { id: String },
    DraftRemovedOnDisk { id: String },
}

impl DraftEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftEvent::RefinementChunk(_) => "refinement_chunk",
            DraftEvent::RefinementComplete { .. } => "refinement_complete",
            DraftEvent::RevisionSwitched { .. } => "revision_switched",
            DraftEvent::DraftChangedOnDisk { .. } => "draft_changed_on_disk",
            DraftEvent::DraftRemovedOnDisk { .. } => "draft_removed_on_disk",
        }
    }
}
