//! StackIt Storage Layer
//!
//! Implements the QuestionStore trait over an in-memory collection.
//!
//! # Architecture
//!
//! - A single owned `Vec<Question>`; questions own their answers
//! - Mutations take `&mut self` and run to completion
//! - `view` takes `&self` and returns an owned [`Snapshot`]
//! - A revision counter moves on every effective mutation
//!
//! # Examples
//!
//! ```
//! use stackit_domain::traits::QuestionStore;
//! use stackit_domain::{NewQuestion, Tag, ViewQuery};
//! use stackit_store::MemoryStore;
//!
//! let mut store = MemoryStore::new();
//! store
//!     .add_question(NewQuestion::new("Q1", "d", vec![Tag::Array]), "alice")
//!     .unwrap();
//!
//! let snapshot = store.view(&ViewQuery::default());
//! assert_eq!(snapshot.items.len(), 1);
//! ```

#![warn(missing_docs)]

mod clock;
mod seed;
mod validate;

pub use clock::{SystemClock, TickingClock};
pub use seed::{SEED_AUTHOR, SEED_QUESTIONS};
pub use validate::ValidationError;

use stackit_domain::traits::{Clock, QuestionStore};
use stackit_domain::{
    Answer, AnswerId, FilterMode, NewQuestion, Question, QuestionId, Snapshot, ViewQuery, VoteKind,
    VoteOutcome,
};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Submission failed validation; nothing was changed
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Question not found
    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    /// Answer not found
    #[error("Answer not found: {0}")]
    AnswerNotFound(AnswerId),
}

/// In-memory implementation of QuestionStore
///
/// Questions are kept in collection order: new submissions are prepended,
/// seeded questions are appended in catalog order.
pub struct MemoryStore {
    questions: Vec<Question>,
    clock: Box<dyn Clock>,
    revision: u64,
}

impl MemoryStore {
    /// Create an empty store using the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty store with a custom clock
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            questions: Vec::new(),
            clock: Box::new(clock),
            revision: 0,
        }
    }

    /// Append the built-in question catalog
    ///
    /// # Examples
    ///
    /// ```
    /// use stackit_store::{MemoryStore, SEED_QUESTIONS};
    ///
    /// let store = MemoryStore::new().with_seed_catalog();
    /// assert_eq!(store.len(), SEED_QUESTIONS.len());
    /// ```
    pub fn with_seed_catalog(mut self) -> Self {
        for (title, description, tags) in SEED_QUESTIONS {
            let submission = NewQuestion::new(*title, *description, tags.to_vec());
            let created_at = self.clock.now_millis();
            self.questions.push(Question::new(
                QuestionId::new(),
                submission,
                SEED_AUTHOR.to_string(),
                created_at,
            ));
        }
        self.revision += 1;
        debug!(count = SEED_QUESTIONS.len(), "seeded question catalog");
        self
    }

    /// Number of questions held
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the store holds no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Revision counter, bumped on every effective mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All questions in collection order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn question_mut(&mut self, id: QuestionId) -> Result<&mut Question, StoreError> {
        self.questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(StoreError::QuestionNotFound(id))
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionStore for MemoryStore {
    type Error = StoreError;

    fn add_question(&mut self, submission: NewQuestion, author: &str) -> Result<QuestionId, Self::Error> {
        validate::validate_question(&submission)?;

        let id = QuestionId::new();
        let created_at = self.clock.now_millis();
        let submission = NewQuestion {
            title: submission.title.trim().to_string(),
            ..submission
        };
        self.questions
            .insert(0, Question::new(id, submission, author.to_string(), created_at));
        self.touch();

        debug!(%id, author, "question added");
        Ok(id)
    }

    fn delete_question(&mut self, id: QuestionId, requester: &str) -> Result<bool, Self::Error> {
        let Some(index) = self.questions.iter().position(|q| q.id == id) else {
            return Ok(false);
        };
        if !self.questions[index].is_authored_by(requester) {
            debug!(%id, requester, "ignoring question delete from non-author");
            return Ok(false);
        }

        let removed = self.questions.remove(index);
        self.touch();

        debug!(%id, answers = removed.answers.len(), "question deleted");
        Ok(true)
    }

    fn add_answer(&mut self, question: QuestionId, text: &str, author: &str) -> Result<AnswerId, Self::Error> {
        let text = validate::validate_answer(text)?;

        let id = AnswerId::new();
        self.question_mut(question)?
            .answers
            .push(Answer::new(id, text.to_string(), author.to_string()));
        self.touch();

        debug!(%question, answer = %id, author, "answer added");
        Ok(id)
    }

    fn delete_answer(&mut self, question: QuestionId, answer: AnswerId, requester: &str) -> Result<bool, Self::Error> {
        let Some(q) = self.questions.iter_mut().find(|q| q.id == question) else {
            return Ok(false);
        };
        let Some(index) = q.answers.iter().position(|a| a.id == answer) else {
            return Ok(false);
        };
        if !q.answers[index].is_authored_by(requester) {
            debug!(%question, %answer, requester, "ignoring answer delete from non-author");
            return Ok(false);
        }

        q.answers.remove(index);
        self.touch();

        debug!(%question, %answer, "answer deleted");
        Ok(true)
    }

    fn vote(
        &mut self,
        question: QuestionId,
        answer: AnswerId,
        voter: &str,
        kind: VoteKind,
    ) -> Result<VoteOutcome, Self::Error> {
        let q = self.question_mut(question)?;
        let outcome = q
            .answer_mut(answer)
            .ok_or(StoreError::AnswerNotFound(answer))?
            .toggle_vote(voter, kind);
        q.rank_answers();
        self.touch();

        debug!(%question, %answer, voter, kind = kind.as_str(), ?outcome, "vote applied");
        Ok(outcome)
    }

    fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    fn view(&self, query: &ViewQuery) -> Snapshot {
        let mut filtered: Vec<&Question> = self.questions.iter().filter(|q| query.matches(q)).collect();

        if query.mode == FilterMode::Newest {
            filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        let total_items = filtered.len();
        let items = filtered[query.page_range(total_items)]
            .iter()
            .map(|q| (*q).clone())
            .collect();

        Snapshot {
            items,
            total_pages: query.total_pages(total_items),
            total_items,
            page: query.effective_page(),
            revision: self.revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackit_domain::Tag;

    fn store() -> MemoryStore {
        MemoryStore::with_clock(TickingClock::starting_at(1_000))
    }

    fn submission(title: &str) -> NewQuestion {
        NewQuestion::new(title, "<p>details</p>", vec![Tag::Array])
    }

    #[test]
    fn test_add_question_prepends() {
        let mut store = store();
        let first = store.add_question(submission("first"), "alice").unwrap();
        let second = store.add_question(submission("second"), "bob").unwrap();

        let ids: Vec<QuestionId> = store.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_rejected_submission_changes_nothing() {
        let mut store = store();
        let before = store.revision();

        let err = store
            .add_question(NewQuestion::new("  ", "d", vec![Tag::Dp]), "alice")
            .unwrap_err();

        assert_eq!(err, StoreError::Validation(ValidationError::EmptyTitle));
        assert!(store.is_empty());
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_title_is_trimmed_description_kept_verbatim() {
        let mut store = store();
        let id = store
            .add_question(NewQuestion::new("  Q1 ", " <b>d</b> ", vec![Tag::Heap]), "alice")
            .unwrap();

        let q = store.question(id).unwrap();
        assert_eq!(q.title, "Q1");
        assert_eq!(q.description, " <b>d</b> ");
    }

    #[test]
    fn test_answer_to_missing_question() {
        let mut store = store();
        let missing = QuestionId::new();
        let err = store.add_answer(missing, "text", "alice").unwrap_err();
        assert_eq!(err, StoreError::QuestionNotFound(missing));
    }

    #[test]
    fn test_vote_on_missing_answer() {
        let mut store = store();
        let q = store.add_question(submission("Q"), "alice").unwrap();
        let missing = AnswerId::new();

        let err = store.vote(q, missing, "alice", VoteKind::Like).unwrap_err();
        assert_eq!(err, StoreError::AnswerNotFound(missing));
    }

    #[test]
    fn test_vote_reranks_answers() {
        let mut store = store();
        let q = store.add_question(submission("Q"), "alice").unwrap();
        let a1 = store.add_answer(q, "A1", "bob").unwrap();
        let a2 = store.add_answer(q, "A2", "carol").unwrap();

        store.vote(q, a2, "alice", VoteKind::Like).unwrap();

        let order: Vec<AnswerId> = store.question(q).unwrap().answers.iter().map(|a| a.id).collect();
        assert_eq!(order, vec![a2, a1]);
    }

    #[test]
    fn test_delete_missing_question_is_noop() {
        let mut store = store();
        assert!(!store.delete_question(QuestionId::new(), "alice").unwrap());
    }

    #[test]
    fn test_newest_orders_by_creation_time() {
        let mut store = store().with_seed_catalog();
        let added = store.add_question(submission("fresh"), "alice").unwrap();

        let snapshot = store.view(&ViewQuery {
            mode: FilterMode::Newest,
            ..Default::default()
        });

        assert_eq!(snapshot.items[0].id, added);
        let times: Vec<u64> = snapshot.items.iter().map(|q| q.created_at).collect();
        assert!(times.windows(2).all(|w| w[0] >= w[1]));
    }
}
