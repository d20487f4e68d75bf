//! View module - filter, sort and pagination parameters and their result

use crate::{Question, Tag};
use std::ops::Range;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Listing mode for the question list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Collection order
    #[default]
    All,

    /// Most recently created first
    Newest,

    /// Only questions with no answers
    Unanswered,
}

impl FilterMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Newest => "newest",
            FilterMode::Unanswered => "unanswered",
        }
    }

    /// Parse a mode from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(FilterMode::All),
            "newest" | "new" => Some(FilterMode::Newest),
            "unanswered" => Some(FilterMode::Unanswered),
            _ => None,
        }
    }
}

impl std::str::FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid filter mode: {}", s))
    }
}

/// Parameters of a view request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewQuery {
    /// Only include questions carrying this tag
    pub tag: Option<Tag>,

    /// Listing mode
    pub mode: FilterMode,

    /// 1-based page number
    pub page: usize,

    /// Questions per page
    pub page_size: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            tag: None,
            mode: FilterMode::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewQuery {
    /// Whether a question passes the tag and mode filters
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(tag) = self.tag {
            if !question.has_tag(tag) {
                return false;
            }
        }
        self.mode != FilterMode::Unanswered || question.is_unanswered()
    }

    /// Page size, never zero
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Page number, never zero
    pub fn effective_page(&self) -> usize {
        self.page.max(1)
    }

    /// Number of pages needed for `count` filtered questions
    ///
    /// # Examples
    ///
    /// ```
    /// use stackit_domain::ViewQuery;
    ///
    /// let query = ViewQuery { page_size: 4, ..Default::default() };
    /// assert_eq!(query.total_pages(0), 0);
    /// assert_eq!(query.total_pages(8), 2);
    /// assert_eq!(query.total_pages(9), 3);
    /// ```
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.effective_page_size())
    }

    /// Index range of the requested page within `count` filtered questions
    ///
    /// Pages past the end yield an empty range.
    pub fn page_range(&self, count: usize) -> Range<usize> {
        let size = self.effective_page_size();
        let start = (self.effective_page() - 1).saturating_mul(size).min(count);
        let end = start.saturating_add(size).min(count);
        start..end
    }
}

/// Read-only result of a view request
///
/// Snapshots are owned copies. Mutating the store afterwards never changes
/// a snapshot already handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Questions on the requested page
    pub items: Vec<Question>,

    /// Total number of pages for the filter
    pub total_pages: usize,

    /// Total number of questions passing the filter
    pub total_items: usize,

    /// Page the items belong to
    pub page: usize,

    /// Store revision the snapshot was taken at
    pub revision: u64,
}

impl Snapshot {
    /// Whether the page has no questions
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Question at a 1-based position on the page
    pub fn at(&self, position: usize) -> Option<&Question> {
        position.checked_sub(1).and_then(|i| self.items.get(i))
    }
}
