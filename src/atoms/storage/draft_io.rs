use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::types::{Draft, DraftError, DraftResult};

const RECORD_EXT: &str = "json";
const TEMP_EXT: &str = "json.tmp";

pub fn drafts_dir(base_dir: &Path) -> PathBuf {
    base_dir.join("drafts")
}

pub fn ensure_data_dirs(base_dir: &Path) -> DraftResult<()> {
    let dir = drafts_dir(base_dir);
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| DraftError::storage(&dir, e))?;
    }
    Ok(())
}

/// Ids become file names, so only a single plain path segment is accepted.
pub fn is_valid_draft_id(id: &str) -> bool {
    let mut components = Path::new(id).components();
    matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !id.contains(['/', '\\'])
}

/// Draft id stored at `path`, if it names a record file.
pub fn record_id(path: &Path) -> Option<String> {
    if !path.extension().is_some_and(|ext| ext == RECORD_EXT) {
        return None;
    }
    let id = path.file_stem()?.to_string_lossy().to_string();
    is_valid_draft_id(&id).then_some(id)
}

fn draft_path(base_dir: &Path, id: &str) -> PathBuf {
    drafts_dir(base_dir).join(format!("{}.{}", id, RECORD_EXT))
}

fn temp_path(base_dir: &Path, id: &str) -> PathBuf {
    drafts_dir(base_dir).join(format!("{}.{}", id, TEMP_EXT))
}

/// Loads one record. A missing file or an id that cannot name a record is
/// `Ok(None)`; anything else that goes wrong is an error, including a record
/// that decodes but breaks the draft invariants.
pub fn load_draft(base_dir: &Path, id: &str) -> DraftResult<Option<Draft>> {
    if !is_valid_draft_id(id) {
        debug!(draft_id = id, "ignoring load of invalid draft id");
        return Ok(None);
    }
    let path = draft_path(base_dir, id);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(DraftError::storage(&path, e)),
    };

    let draft: Draft =
        serde_json::from_str(&content).map_err(|source| DraftError::Decode {
            path: path.clone(),
            source,
        })?;

    if let Some(reason) = draft.violation() {
        return Err(DraftError::Invalid {
            path,
            reason: reason.to_string(),
        });
    }

    if draft.id != id {
        warn!(file_id = id, record_id = %draft.id, "draft record id does not match file name");
    }

    Ok(Some(draft))
}

/// Loads every record in the drafts directory, most recently updated first.
/// One unreadable record fails the whole listing.
pub fn load_all_drafts(base_dir: &Path) -> DraftResult<Vec<Draft>> {
    let dir = drafts_dir(base_dir);

    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut drafts = Vec::new();

    for entry in fs::read_dir(&dir).map_err(|e| DraftError::storage(&dir, e))? {
        let entry = entry.map_err(|e| DraftError::storage(&dir, e))?;
        let path = entry.path();

        if let Some(id) = record_id(&path)
            && let Some(draft) = load_draft(base_dir, &id)?
        {
            drafts.push(draft);
        }
    }

    drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    debug!(count = drafts.len(), "loaded drafts");
    Ok(drafts)
}

/// Writes the full record to a sibling temp file and renames it into place,
/// so readers never observe a half-written document.
pub fn save_draft(base_dir: &Path, draft: &Draft) -> DraftResult<()> {
    if !is_valid_draft_id(&draft.id) {
        return Err(DraftError::InvalidId(draft.id.clone()));
    }
    ensure_data_dirs(base_dir)?;
    let path = draft_path(base_dir, &draft.id);
    let tmp = temp_path(base_dir, &draft.id);

    let json = serde_json::to_string_pretty(draft).map_err(|source| DraftError::Decode {
        path: path.clone(),
        source,
    })?;

    fs::write(&tmp, json).map_err(|e| DraftError::storage(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, &path) {
        let _ = fs::remove_file(&tmp);
        return Err(DraftError::storage(&path, e));
    }

    Ok(())
}

/// Removes a record. Returns whether anything was deleted; an id that cannot
/// name a record deletes nothing.
pub fn delete_draft(base_dir: &Path, id: &str) -> DraftResult<bool> {
    if !is_valid_draft_id(id) {
        debug!(draft_id = id, "ignoring delete of invalid draft id");
        return Ok(false);
    }
    let path = draft_path(base_dir, id);

    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(DraftError::storage(&path, e)),
    }
}
