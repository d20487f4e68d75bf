//! StackIt Domain Layer
//!
//! This crate contains the core domain model for StackIt, a small Q&A forum.
//! Its only external dependency is `uuid` for identifiers. It defines the
//! entities, the vote state machine, the view types and the trait seams that
//! the store and the presentation shell depend upon.
//!
//! ## Key Concepts
//!
//! - **Tag**: a topic label from a fixed catalog
//! - **Question**: a titled post with a markup description, owning its answers
//! - **Answer**: a reply carrying like/dislike counters and a voter map
//! - **Vote**: at most one entry per identity in an answer's voter map
//! - **Snapshot**: the filtered, sorted, paginated subset of questions for one view
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Storage lives in `stackit-store`
//! - Identity and rendering live in `stackit-cli`
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod answer;
pub mod question;
pub mod tag;
pub mod traits;
pub mod view;

// Re-exports for convenience
pub use answer::{Answer, AnswerId, VoteKind, VoteOutcome};
pub use question::{NewQuestion, Question, QuestionId, GUEST_AUTHOR};
pub use tag::Tag;
pub use view::{FilterMode, Snapshot, ViewQuery, DEFAULT_PAGE_SIZE};
