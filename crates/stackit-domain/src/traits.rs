//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and the layers
//! around it. Implementations live in other crates.

use crate::{AnswerId, NewQuestion, Question, QuestionId, Snapshot, ViewQuery, VoteKind, VoteOutcome};

/// Trait for storing and mutating questions and their answers
///
/// Implemented by the storage layer (stackit-store). Author checks on
/// deletes are silent: a non-author request removes nothing and returns
/// `Ok(false)`.
pub trait QuestionStore {
    /// Error type for store operations
    type Error;

    /// Validate and prepend a new question
    fn add_question(&mut self, submission: NewQuestion, author: &str) -> Result<QuestionId, Self::Error>;

    /// Remove a question and all of its answers if `requester` wrote it
    fn delete_question(&mut self, id: QuestionId, requester: &str) -> Result<bool, Self::Error>;

    /// Append an answer to a question
    fn add_answer(&mut self, question: QuestionId, text: &str, author: &str) -> Result<AnswerId, Self::Error>;

    /// Remove an answer if `requester` wrote it
    fn delete_answer(&mut self, question: QuestionId, answer: AnswerId, requester: &str) -> Result<bool, Self::Error>;

    /// Toggle a vote and re-rank the question's answers
    fn vote(
        &mut self,
        question: QuestionId,
        answer: AnswerId,
        voter: &str,
        kind: VoteKind,
    ) -> Result<VoteOutcome, Self::Error>;

    /// Get a question by id
    fn question(&self, id: QuestionId) -> Option<&Question>;

    /// Filter, sort and paginate without mutating anything
    fn view(&self, query: &ViewQuery) -> Snapshot;
}

/// Trait for the signed-in user's identity
///
/// Implemented by the presentation layer (stackit-cli). The identity is an
/// opaque string compared by equality against authors.
pub trait IdentityProvider {
    /// Identity of the signed-in user, if any
    fn current_user(&self) -> Option<String>;

    /// Whether someone is signed in
    fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Source of creation timestamps
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}
