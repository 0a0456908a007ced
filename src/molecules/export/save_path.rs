use std::path::{Component, Path, PathBuf};

use chrono::NaiveDateTime;

use super::render::export_context;
use crate::molecules::template::{resolve_template, sanitize_title};
use crate::types::{Draft, TemplateConfig};

/// Where an exported draft should be written under `base_dir`.
///
/// `save_dir` may contain `/` separators; each segment is sanitized on its own
/// and parent or root components are dropped so the result stays inside
/// `base_dir`. An empty file name falls back to the draft id.
pub fn resolve_save_path(
    templates: &TemplateConfig,
    base_dir: &Path,
    draft: &Draft,
    date: NaiveDateTime,
) -> PathBuf {
    let ctx = export_context(draft, date);

    let mut path = base_dir.to_path_buf();
    let dir = resolve_template(&templates.save_dir, &ctx);
    for component in Path::new(&dir).components() {
        if let Component::Normal(segment) = component {
            let segment = sanitize_title(&segment.to_string_lossy());
            if !segment.is_empty() {
                path.push(segment);
            }
        }
    }

    let mut file_name = sanitize_title(&resolve_template(&templates.file_name, &ctx));
    if file_name.is_empty() {
        file_name = draft.id.clone();
    }

    let extension = templates.extension.trim_start_matches('.');
    if !extension.is_empty() {
        file_name = format!("{}.{}", file_name, extension);
    }

    path.join(file_name)
}
