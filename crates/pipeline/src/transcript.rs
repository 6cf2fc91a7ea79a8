//! The debate transcript: an ordered, append-only record of who said what.
//!
//! A [`Transcript`] is owned exclusively by one pipeline run. It is seeded
//! with the debate question at construction and grows by exactly one entry
//! per stage execution; no entry is ever edited or removed.

use serde::{Deserialize, Serialize};

use crate::errors::DebateError;
use crate::types::{RunId, Timestamp};

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// The speaker of a transcript entry.
///
/// `Question` is contributed by the caller before any stage runs; the other
/// tags identify which pipeline stage produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    /// The caller's original debate question.
    Question,
    /// The advocate arguing the affirmative side.
    Pro,
    /// The advocate arguing the negative side.
    Con,
    /// The impartial judge weighing both advocates.
    Judge,
    /// The structured position extractor (binary-decision gating).
    Extractor,
}

impl RoleTag {
    /// Returns the upper-case label used when presenting a transcript
    /// (e.g. `"PRO"`, `"JUDGE"`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Question => "QUESTION",
            Self::Pro => "PRO",
            Self::Con => "CON",
            Self::Judge => "JUDGE",
            Self::Extractor => "EXTRACTOR",
        }
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// One role-tagged text block in a transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    role: RoleTag,
    text: String,
}

impl TranscriptEntry {
    /// Creates an entry, rejecting empty or whitespace-only text with
    /// [`DebateError::InvalidEntry`].
    pub fn new(role: RoleTag, text: impl Into<String>) -> Result<Self, DebateError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DebateError::InvalidEntry {
                role,
                reason: "entry text is empty".to_string(),
            });
        }
        Ok(Self { role, text })
    }

    /// The speaker of this entry.
    pub fn role(&self) -> RoleTag {
        self.role
    }

    /// The entry text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// The ordered record of the question and all stage outputs for one run.
///
/// Insertion order is significant: it defines who said what, in what order.
/// The only constructor is [`Transcript::open`], which seeds the question
/// entry, so a transcript's first entry is always [`RoleTag::Question`].
/// There is no deletion or mutation operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    run_id: RunId,
    started_at: Timestamp,
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Opens a transcript for one run, seeded with the debate question.
    ///
    /// Fails with [`DebateError::InvalidEntry`] if the question is empty.
    pub fn open(question: impl Into<String>) -> Result<Self, DebateError> {
        let seed = TranscriptEntry::new(RoleTag::Question, question)?;
        Ok(Self {
            run_id: RunId::new_random(),
            started_at: Timestamp::now(),
            entries: vec![seed],
        })
    }

    /// Appends one stage output to the end of the transcript, returning a
    /// reference to the appended entry.
    ///
    /// Fails with [`DebateError::InvalidEntry`] if `text` is empty; the
    /// transcript is unchanged on failure.
    pub fn append(
        &mut self,
        role: RoleTag,
        text: impl Into<String>,
    ) -> Result<&TranscriptEntry, DebateError> {
        let entry = TranscriptEntry::new(role, text)?;
        self.entries.push(entry);
        let idx = self.entries.len() - 1;
        Ok(&self.entries[idx])
    }

    /// Identifier correlating all activity from this run.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// When this transcript was opened.
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Entries with the given role, in original order.
    pub fn entries_by_role(&self, role: RoleTag) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter().filter(move |e| e.role == role)
    }

    /// The first entry with the given role, if any.
    pub fn first_by_role(&self, role: RoleTag) -> Option<&TranscriptEntry> {
        self.entries_by_role(role).next()
    }

    /// The original debate question text.
    ///
    /// `None` only for a transcript that bypassed [`Transcript::open`]
    /// (e.g. deserialised from an external source with no question entry).
    pub fn question(&self) -> Option<&str> {
        self.first_by_role(RoleTag::Question).map(|e| e.text())
    }

    /// The most recently appended entry, if any.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// Number of entries, including the question.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the transcript has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_seeds_question_entry() {
        let t = Transcript::open("Should schools require uniforms?").unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.entries()[0].role(), RoleTag::Question);
        assert_eq!(t.question(), Some("Should schools require uniforms?"));
    }

    #[test]
    fn open_rejects_blank_question() {
        let err = Transcript::open("   ").unwrap_err();
        assert!(matches!(err, DebateError::InvalidEntry { .. }));
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut t = Transcript::open("q").unwrap();
        t.append(RoleTag::Pro, "pro argument").unwrap();
        t.append(RoleTag::Con, "con argument").unwrap();

        let roles: Vec<_> = t.entries().iter().map(|e| e.role()).collect();
        assert_eq!(roles, vec![RoleTag::Question, RoleTag::Pro, RoleTag::Con]);
        assert_eq!(t.last().unwrap().text(), "con argument");
    }

    #[test]
    fn append_rejects_empty_text_and_leaves_transcript_unchanged() {
        let mut t = Transcript::open("q").unwrap();
        let err = t.append(RoleTag::Pro, "").unwrap_err();
        assert!(matches!(
            err,
            DebateError::InvalidEntry { role: RoleTag::Pro, .. }
        ));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn entries_by_role_is_order_sensitive() {
        let mut t = Transcript::open("q").unwrap();
        t.append(RoleTag::Pro, "first pro").unwrap();
        t.append(RoleTag::Con, "con").unwrap();
        t.append(RoleTag::Pro, "second pro").unwrap();

        let pros: Vec<_> = t.entries_by_role(RoleTag::Pro).map(|e| e.text()).collect();
        assert_eq!(pros, vec!["first pro", "second pro"]);
        assert_eq!(t.first_by_role(RoleTag::Pro).unwrap().text(), "first pro");
        assert!(t.first_by_role(RoleTag::Judge).is_none());
    }

    #[test]
    fn role_tag_serde_is_snake_case() {
        let json = serde_json::to_string(&RoleTag::Judge).unwrap();
        assert_eq!(json, r#""judge""#);
        let parsed: RoleTag = serde_json::from_str(r#""pro""#).unwrap();
        assert_eq!(parsed, RoleTag::Pro);
    }
}
