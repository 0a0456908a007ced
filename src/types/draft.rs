use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One full-text snapshot in a draft's history. Never patched after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Revision {
    pub fn new(content: String, prompt: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            prompt,
            timestamp: Utc::now(),
        }
    }
}

/// Generation settings recorded with a draft. Stored and returned as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub include_headings: bool,
    #[serde(default)]
    pub include_seo: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// Everything needed to seed a new draft.
#[derive(Debug, Clone, Default)]
pub struct NewDraft {
    pub title: String,
    pub transcript: String,
    pub initial_content: String,
    pub voice: Option<String>,
    pub options: Option<GenerationOptions>,
    pub frontmatter: Option<String>,
    pub writer_agent_path: Option<String>,
}

impl NewDraft {
    pub fn new(
        title: impl Into<String>,
        transcript: impl Into<String>,
        initial_content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            transcript: transcript.into(),
            initial_content: initial_content.into(),
            ..Default::default()
        }
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn frontmatter(mut self, frontmatter: impl Into<String>) -> Self {
        self.frontmatter = Some(frontmatter.into());
        self
    }

    pub fn writer_agent_path(mut self, path: impl Into<String>) -> Self {
        self.writer_agent_path = Some(path.into());
        self
    }
}

/// A piece of writing with an append-only revision history and a pointer to
/// the revision currently in view.
///
/// `revisions` is never empty and `current_revision_id` always names one of
/// its members. Mutation goes through [`Draft::append_revision`] and
/// [`Draft::point_to`], which keep both invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub title: String,
    pub transcript: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    pub current_revision_id: String,
    pub revisions: Vec<Revision>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerationOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writer_agent_path: Option<String>,
}

impl Draft {
    pub fn new(seed: NewDraft) -> Self {
        let revision = Revision::new(seed.initial_content, None);
        let now = revision.timestamp;
        Self {
            id: Uuid::new_v4().to_string(),
            title: seed.title,
            transcript: seed.transcript,
            voice: seed.voice,
            current_revision_id: revision.id.clone(),
            revisions: vec![revision],
            created_at: now,
            updated_at: now,
            options: seed.options,
            frontmatter: seed.frontmatter,
            writer_agent_path: seed.writer_agent_path,
        }
    }

    pub fn revision(&self, revision_id: &str) -> Option<&Revision> {
        self.revisions.iter().find(|r| r.id == revision_id)
    }

    pub fn revision_index(&self, revision_id: &str) -> Option<usize> {
        self.revisions.iter().position(|r| r.id == revision_id)
    }

    pub fn current_revision(&self) -> Option<&Revision> {
        self.revision(&self.current_revision_id)
    }

    pub fn previous_revision_id(&self) -> Option<&str> {
        let idx = self.revision_index(&self.current_revision_id)?;
        idx.checked_sub(1)
            .and_then(|prev| self.revisions.get(prev))
            .map(|r| r.id.as_str())
    }

    pub fn next_revision_id(&self) -> Option<&str> {
        let idx = self.revision_index(&self.current_revision_id)?;
        self.revisions.get(idx + 1).map(|r| r.id.as_str())
    }

    /// Appends `revision` and makes it current. Its timestamp is nudged
    /// forward if it would not sort after the last revision.
    pub fn append_revision(&mut self, mut revision: Revision) -> &Revision {
        if let Some(last) = self.revisions.last() {
            revision.timestamp = advance(last.timestamp, revision.timestamp);
        }
        self.updated_at = advance(self.updated_at, revision.timestamp);
        self.current_revision_id = revision.id.clone();
        self.revisions.push(revision);
        &self.revisions[self.revisions.len() - 1]
    }

    /// Moves the pointer to `revision_id`. Returns `None`, leaving the draft
    /// untouched, if no such revision exists.
    pub fn point_to(&mut self, revision_id: &str) -> Option<&Revision> {
        let idx = self.revision_index(revision_id)?;
        self.current_revision_id = revision_id.to_string();
        self.updated_at = advance(self.updated_at, Utc::now());
        Some(&self.revisions[idx])
    }

    /// Names the first structural rule this record breaks, if any. Records
    /// read from disk are checked before they are handed out.
    pub fn violation(&self) -> Option<&'static str> {
        if self.revisions.is_empty() {
            return Some("revision history is empty");
        }
        if self.current_revision().is_none() {
            return Some("current revision id does not match any revision");
        }
        None
    }

    pub fn summary(&self) -> DraftSummary {
        DraftSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            revision_count: self.revisions.len(),
            updated_at: self.updated_at,
        }
    }
}

// Clock readings can repeat at coarse resolutions; updated_at must still move.
fn advance(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub id: String,
    pub title: String,
    pub revision_count: usize,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Draft {
        Draft::new(NewDraft::new("Title", "interviews/a.md", "Hello"))
    }

    #[test]
    fn test_new_draft_has_single_seed_revision() {
        let draft = seeded();
        assert_eq!(draft.revisions.len(), 1);
        assert_eq!(draft.current_revision_id, draft.revisions[0].id);
        assert_eq!(draft.revisions[0].content, "Hello");
        assert!(draft.revisions[0].prompt.is_none());
        assert_eq!(draft.created_at, draft.updated_at);
    }

    #[test]
    fn test_append_moves_pointer_and_keeps_history() {
        let mut draft = seeded();
        let first = draft.revisions[0].clone();
        let before = draft.updated_at;

        draft.append_revision(Revision::new("Second".into(), Some("rewrite".into())));

        assert_eq!(draft.revisions.len(), 2);
        assert_eq!(draft.revisions[0], first);
        assert_eq!(draft.current_revision_id, draft.revisions[1].id);
        assert!(draft.updated_at > before);
    }

    #[test]
    fn test_append_keeps_revision_timestamps_increasing() {
        let mut draft = seeded();
        let mut stale = Revision::new("Second".into(), Some("p".into()));
        stale.timestamp = draft.revisions[0].timestamp - chrono::Duration::seconds(30);

        draft.append_revision(stale);

        assert!(draft.revisions[1].timestamp > draft.revisions[0].timestamp);
        assert!(draft.updated_at >= draft.revisions[1].timestamp);
    }

    #[test]
    fn test_violation_reports_broken_records() {
        let mut draft = seeded();
        assert_eq!(draft.violation(), None);

        draft.current_revision_id = "nope".into();
        assert!(draft.violation().is_some_and(|v| v.contains("current revision")));

        draft.revisions.clear();
        assert!(draft.violation().is_some_and(|v| v.contains("empty")));
    }

    #[test]
    fn test_point_to_unknown_revision_leaves_draft_untouched() {
        let mut draft = seeded();
        let snapshot = draft.clone();
        assert!(draft.point_to("missing").is_none());
        assert_eq!(draft, snapshot);
    }

    #[test]
    fn test_point_to_current_only_advances_updated_at() {
        let mut draft = seeded();
        let revisions = draft.revisions.clone();
        let before = draft.updated_at;
        let current = draft.current_revision_id.clone();

        draft.point_to(&current);

        assert_eq!(draft.revisions, revisions);
        assert_eq!(draft.current_revision_id, current);
        assert!(draft.updated_at > before);
    }

    #[test]
    fn test_previous_and_next_navigation() {
        let mut draft = seeded();
        let first_id = draft.revisions[0].id.clone();
        draft.append_revision(Revision::new("Second".into(), Some("p".into())));
        let second_id = draft.revisions[1].id.clone();

        assert_eq!(draft.previous_revision_id(), Some(first_id.as_str()));
        assert_eq!(draft.next_revision_id(), None);

        draft.point_to(&first_id);
        assert_eq!(draft.previous_revision_id(), None);
        assert_eq!(draft.next_revision_id(), Some(second_id.as_str()));
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let draft = seeded();
        let json = serde_json::to_string(&draft).unwrap();
        assert!(json.contains("\"currentRevisionId\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("\"voice\""));
    }
}
