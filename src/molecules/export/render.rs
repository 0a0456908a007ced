use chrono::NaiveDateTime;

use crate::molecules::template::resolve_template;
use crate::types::{Draft, DraftError, DraftResult, TemplateContext};

pub fn export_context(draft: &Draft, date: NaiveDateTime) -> TemplateContext {
    TemplateContext::new()
        .title(draft.title.clone())
        .date(date)
        .var("draftId", draft.id.clone())
}

/// The current revision's content, preceded by the draft's frontmatter (if
/// any) with its placeholders resolved.
pub fn render_export(draft: &Draft, date: NaiveDateTime) -> DraftResult<String> {
    let revision = draft
        .current_revision()
        .ok_or_else(|| DraftError::RevisionNotFound {
            draft_id: draft.id.clone(),
            revision_id: draft.current_revision_id.clone(),
        })?;

    let frontmatter = match draft.frontmatter.as_deref().map(str::trim) {
        Some(fm) if !fm.is_empty() => fm,
        _ => return Ok(revision.content.clone()),
    };

    let resolved = resolve_template(frontmatter, &export_context(draft, date));
    let block = if resolved.starts_with("---") {
        resolved
    } else {
        format!("---\n{}\n---", resolved)
    };

    Ok(format!("{}\n\n{}", block, revision.content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewDraft;
    use chrono::NaiveDate;

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_without_frontmatter_is_plain_content() {
        let draft = Draft::new(NewDraft::new("T", "t.md", "Body text"));
        assert_eq!(render_export(&draft, date()).unwrap(), "Body text");
    }

    #[test]
    fn test_frontmatter_is_fenced_and_resolved() {
        let draft = Draft::new(
            NewDraft::new("Field Notes", "t.md", "Body").frontmatter("title: {{title}}\ndate: {{date}}"),
        );
        assert_eq!(
            render_export(&draft, date()).unwrap(),
            "---\ntitle: Field Notes\ndate: 2024-05-01\n---\n\nBody"
        );
    }

    #[test]
    fn test_prefenced_frontmatter_kept() {
        let draft = Draft::new(
            NewDraft::new("X", "t.md", "Body").frontmatter("---\nslug: {{slug}}\n---\n"),
        );
        assert_eq!(
            render_export(&draft, date()).unwrap(),
            "---\nslug: x\n---\n\nBody"
        );
    }

    #[test]
    fn test_dangling_pointer_is_error() {
        let mut draft = Draft::new(NewDraft::new("X", "t.md", "Body"));
        draft.current_revision_id = "gone".into();
        assert!(render_export(&draft, date()).unwrap_err().is_not_found());
    }
}
