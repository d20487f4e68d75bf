//! Question module - the top-level post of the forum

use crate::{Answer, AnswerId, Tag};
use std::fmt;

/// Author recorded for questions submitted while nobody is signed in
pub const GUEST_AUTHOR: &str = "Guest";

/// Unique identifier for a question based on UUIDv7
///
/// Ids are opaque. Recency ordering uses [`Question::created_at`], not the
/// id, so the id scheme can change without affecting "newest" views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId(u128);

impl QuestionId {
    /// Generate a new UUIDv7-based QuestionId
    ///
    /// # Examples
    ///
    /// ```
    /// use stackit_domain::QuestionId;
    ///
    /// let id = QuestionId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a QuestionId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a QuestionId from a UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use stackit_domain::QuestionId;
    ///
    /// let id = QuestionId::new();
    /// let parsed = QuestionId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid question id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Input for submitting a question
///
/// Validation happens in the store; this is only the raw form content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewQuestion {
    /// Question title
    pub title: String,

    /// Description markup as produced by a rich-text editor
    pub description: String,

    /// Selected tags
    pub tags: Vec<Tag>,
}

impl NewQuestion {
    /// Create a new question submission
    pub fn new(title: impl Into<String>, description: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags,
        }
    }
}

/// A question and the answers it owns
///
/// Everything except the answer list is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Unique identifier
    pub id: QuestionId,

    /// Question title
    pub title: String,

    /// Description markup, stored verbatim and never interpreted
    pub description: String,

    /// Tag set in catalog order
    pub tags: Vec<Tag>,

    /// Identity of the author
    pub author: String,

    /// Creation time in milliseconds since the Unix epoch
    pub created_at: u64,

    /// Answers in display order
    pub answers: Vec<Answer>,
}

impl Question {
    /// Create a question with no answers
    pub fn new(id: QuestionId, submission: NewQuestion, author: String, created_at: u64) -> Self {
        Self {
            id,
            title: submission.title,
            description: submission.description,
            tags: Tag::normalize_set(&submission.tags),
            author,
            created_at,
            answers: Vec::new(),
        }
    }

    /// Whether the question carries the tag
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Whether the question has no answers yet
    pub fn is_unanswered(&self) -> bool {
        self.answers.is_empty()
    }

    /// Whether the given identity wrote this question
    pub fn is_authored_by(&self, identity: &str) -> bool {
        self.author == identity
    }

    /// Look up an answer by id
    pub fn answer(&self, id: AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == id)
    }

    /// Look up an answer by id for mutation
    pub fn answer_mut(&mut self, id: AnswerId) -> Option<&mut Answer> {
        self.answers.iter_mut().find(|a| a.id == id)
    }

    /// Reorder answers by descending like count
    ///
    /// The sort is stable, so answers with equal likes keep their order.
    pub fn rank_answers(&mut self) {
        self.answers.sort_by(|a, b| b.likes().cmp(&a.likes()));
    }
}
