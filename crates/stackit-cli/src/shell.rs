//! Presentation shell state.
//!
//! The shell owns the injected store and identity adapter together with the
//! transient UI state of a session: the filter/page selection, which
//! questions are expanded, which have an open answer input, and the
//! "Ask a Question" dialog. Every user action goes through a method here;
//! rendering reads a fresh [`Snapshot`] afterwards.

use crate::error::{CliError, Result};
use crate::markup;
use stackit_domain::traits::{IdentityProvider, QuestionStore};
use stackit_domain::{
    AnswerId, FilterMode, NewQuestion, Question, QuestionId, Snapshot, Tag, ViewQuery, VoteKind, VoteOutcome,
    GUEST_AUTHOR,
};
use stackit_store::StoreError;
use std::collections::HashSet;
use tracing::debug;

/// Current filter and page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Active tag filter
    pub tag: Option<Tag>,
    /// Listing mode
    pub mode: FilterMode,
    /// 1-based page
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            tag: None,
            mode: FilterMode::All,
            page: 1,
        }
    }
}

/// Content of the "Ask a Question" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    /// Title input
    pub title: String,
    /// Description markup
    pub description: String,
    tags: Vec<Tag>,
}

impl QuestionDraft {
    /// Checked tags in catalog order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether a tag checkbox is checked.
    pub fn is_checked(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Flip a tag checkbox; returns whether it is now checked.
    pub fn toggle_tag(&mut self, tag: Tag) -> bool {
        if self.is_checked(tag) {
            self.tags.retain(|t| *t != tag);
            false
        } else {
            self.tags.push(tag);
            self.tags = Tag::normalize_set(&self.tags);
            true
        }
    }

    /// Replace the checked tags.
    pub fn set_tags(&mut self, tags: &[Tag]) {
        self.tags = Tag::normalize_set(tags);
    }

    fn to_submission(&self) -> NewQuestion {
        // An emptied rich-text editor still leaves markup behind.
        let description = if markup::is_blank(&self.description) {
            String::new()
        } else {
            self.description.clone()
        };
        NewQuestion::new(self.title.clone(), description, self.tags.clone())
    }
}

/// Session state driving a question store.
pub struct Shell<S, I> {
    store: S,
    identity: I,
    view: ViewState,
    page_size: usize,
    expanded: HashSet<QuestionId>,
    answer_inputs: HashSet<QuestionId>,
    ask_open: bool,
    draft: QuestionDraft,
}

impl<S, I> Shell<S, I>
where
    S: QuestionStore<Error = StoreError>,
    I: IdentityProvider,
{
    /// Create a shell over a store and an identity adapter.
    pub fn new(store: S, identity: I, page_size: usize) -> Self {
        Self {
            store,
            identity,
            view: ViewState::default(),
            page_size: page_size.max(1),
            expanded: HashSet::new(),
            answer_inputs: HashSet::new(),
            ask_open: false,
            draft: QuestionDraft::default(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The identity adapter.
    pub fn identity(&self) -> &I {
        &self.identity
    }

    /// The identity adapter, for login and logout.
    pub fn identity_mut(&mut self) -> &mut I {
        &mut self.identity
    }

    /// Current filter and page selection.
    pub fn view_state(&self) -> ViewState {
        self.view
    }

    /// Questions per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// View query for the current selection.
    pub fn query(&self) -> ViewQuery {
        ViewQuery {
            tag: self.view.tag,
            mode: self.view.mode,
            page: self.view.page,
            page_size: self.page_size,
        }
    }

    /// Current page of questions.
    pub fn snapshot(&self) -> Snapshot {
        self.store.view(&self.query())
    }

    // ----- filters and pagination -----

    /// Switch listing mode and go back to the first page.
    pub fn set_mode(&mut self, mode: FilterMode) {
        self.view.mode = mode;
        self.view.page = 1;
    }

    /// Filter by a tag and go back to the first page.
    pub fn filter_by_tag(&mut self, tag: Tag) {
        self.view.tag = Some(tag);
        self.view.page = 1;
    }

    /// Drop tag and mode filters and go back to the first page.
    pub fn clear_filters(&mut self) {
        self.view = ViewState::default();
    }

    /// Jump to a page.
    pub fn goto_page(&mut self, page: usize) -> Result<usize> {
        let total = self.snapshot().total_pages;
        if page == 0 || page > total.max(1) {
            return Err(CliError::InvalidInput(format!(
                "Page {} is out of range (1-{})",
                page,
                total.max(1)
            )));
        }
        self.view.page = page;
        Ok(page)
    }

    /// Move to the next page.
    pub fn next_page(&mut self) -> Result<usize> {
        let total = self.snapshot().total_pages;
        if self.view.page >= total {
            return Err(CliError::InvalidInput("Already on the last page".to_string()));
        }
        self.view.page += 1;
        Ok(self.view.page)
    }

    /// Move to the previous page.
    pub fn prev_page(&mut self) -> Result<usize> {
        if self.view.page <= 1 {
            return Err(CliError::InvalidInput("Already on the first page".to_string()));
        }
        self.view.page -= 1;
        Ok(self.view.page)
    }

    // ----- question list -----

    /// Question at a 1-based position on the current page.
    pub fn question_at(&self, position: usize) -> Result<Question> {
        self.snapshot()
            .at(position)
            .cloned()
            .ok_or_else(|| CliError::InvalidInput(format!("No question #{} on this page", position)))
    }

    /// Expand or collapse a question's answers; returns whether it is now expanded.
    pub fn toggle_answers(&mut self, position: usize) -> Result<bool> {
        let id = self.question_at(position)?.id;
        if self.expanded.remove(&id) {
            Ok(false)
        } else {
            self.expanded.insert(id);
            Ok(true)
        }
    }

    /// Whether a question's answers are shown.
    pub fn is_expanded(&self, id: QuestionId) -> bool {
        self.expanded.contains(&id)
    }

    /// Whether answers may be shown to the current viewer.
    pub fn answers_visible(&self) -> bool {
        self.identity.is_signed_in()
    }

    /// Open the answer input of a question.
    pub fn open_answer_input(&mut self, position: usize) -> Result<QuestionId> {
        self.require_user()?;
        let id = self.question_at(position)?.id;
        self.expanded.insert(id);
        self.answer_inputs.insert(id);
        Ok(id)
    }

    /// Whether a question has an open answer input.
    pub fn is_answer_input_open(&self, id: QuestionId) -> bool {
        self.answer_inputs.contains(&id)
    }

    /// Post an answer as the current user and close the input.
    pub fn submit_answer(&mut self, position: usize, text: &str) -> Result<AnswerId> {
        let user = self.require_user()?;
        let question = self.question_at(position)?.id;

        let answer = self.store.add_answer(question, text, &user)?;
        self.answer_inputs.remove(&question);
        self.expanded.insert(question);

        debug!(%question, %answer, "answer submitted");
        Ok(answer)
    }

    /// Vote on an answer as the current user.
    pub fn vote(&mut self, position: usize, answer_position: usize, kind: VoteKind) -> Result<VoteOutcome> {
        let user = self.require_user()?;
        let question = self.question_at(position)?;
        let answer = answer_at(&question, answer_position)?;

        Ok(self.store.vote(question.id, answer, &user, kind)?)
    }

    // ----- deletes -----

    /// Whether the current user may delete the question.
    pub fn can_delete_question(&self, position: usize) -> bool {
        match (self.identity.current_user(), self.question_at(position)) {
            (Some(user), Ok(question)) => question.is_authored_by(&user),
            _ => false,
        }
    }

    /// Delete a question written by the current user.
    pub fn delete_question(&mut self, position: usize) -> Result<()> {
        if !self.can_delete_question(position) {
            return Err(CliError::NotPermitted(
                "only the author can delete this question".to_string(),
            ));
        }
        let user = self.require_user()?;
        let id = self.question_at(position)?.id;

        self.store.delete_question(id, &user)?;
        self.expanded.remove(&id);
        self.answer_inputs.remove(&id);
        self.clamp_page();
        Ok(())
    }

    /// Whether the current user may delete the answer.
    pub fn can_delete_answer(&self, position: usize, answer_position: usize) -> bool {
        let Some(user) = self.identity.current_user() else {
            return false;
        };
        self.question_at(position)
            .ok()
            .and_then(|q| answer_position.checked_sub(1).and_then(|i| q.answers.get(i).cloned()))
            .is_some_and(|a| a.is_authored_by(&user))
    }

    /// Delete an answer written by the current user.
    pub fn delete_answer(&mut self, position: usize, answer_position: usize) -> Result<()> {
        if !self.can_delete_answer(position, answer_position) {
            return Err(CliError::NotPermitted(
                "only the author can delete this answer".to_string(),
            ));
        }
        let user = self.require_user()?;
        let question = self.question_at(position)?;
        let answer = answer_at(&question, answer_position)?;

        self.store.delete_answer(question.id, answer, &user)?;
        self.clamp_page();
        Ok(())
    }

    // ----- ask dialog -----

    /// Open the ask dialog, resuming any earlier draft.
    pub fn open_ask(&mut self) -> &mut QuestionDraft {
        self.ask_open = true;
        &mut self.draft
    }

    /// Whether the ask dialog is open.
    pub fn is_ask_open(&self) -> bool {
        self.ask_open
    }

    /// Current draft.
    pub fn draft(&self) -> &QuestionDraft {
        &self.draft
    }

    /// Current draft, while the dialog is open.
    pub fn draft_mut(&mut self) -> Option<&mut QuestionDraft> {
        self.ask_open.then_some(&mut self.draft)
    }

    /// Close the dialog; the draft is kept for the next time it opens.
    pub fn cancel_ask(&mut self) {
        self.ask_open = false;
    }

    /// Submit the draft.
    ///
    /// A rejected draft keeps the dialog open. On success the dialog closes,
    /// the draft is cleared and the list goes back to page 1.
    pub fn submit_ask(&mut self) -> Result<QuestionId> {
        if !self.ask_open {
            return Err(CliError::InvalidInput("The ask dialog is not open".to_string()));
        }
        let author = self
            .identity
            .current_user()
            .unwrap_or_else(|| GUEST_AUTHOR.to_string());

        let id = self.store.add_question(self.draft.to_submission(), &author)?;
        self.draft = QuestionDraft::default();
        self.ask_open = false;
        self.view.page = 1;

        debug!(%id, author = %author, "question submitted");
        Ok(id)
    }

    // ----- helpers -----

    fn require_user(&self) -> Result<String> {
        self.identity.current_user().ok_or(CliError::NotSignedIn)
    }

    // After a delete the current page may no longer exist.
    fn clamp_page(&mut self) {
        let total = self.snapshot().total_pages;
        if self.view.page > total {
            self.view.page = total.max(1);
        }
    }
}

fn answer_at(question: &Question, position: usize) -> Result<AnswerId> {
    position
        .checked_sub(1)
        .and_then(|i| question.answers.get(i))
        .map(|a| a.id)
        .ok_or_else(|| CliError::InvalidInput(format!("No answer #{} on this question", position)))
}
