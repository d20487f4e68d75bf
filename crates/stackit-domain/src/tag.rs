//! Tag module - the fixed catalog of topic labels

use std::fmt;

/// Topic label attached to a question for categorization and filtering
///
/// The catalog is closed: questions can only carry these tags, and the
/// declaration order is the order used for display and for storing a
/// question's tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    /// Recursion and backtracking
    Recursion,

    /// Arrays, two pointers, sliding windows
    Array,

    /// Singly and doubly linked lists
    LinkedList,

    /// Dynamic programming
    Dp,

    /// Graph traversal and algorithms
    Graph,

    /// Hash tables and hash functions
    Hashing,

    /// Sorting algorithms
    Sorting,

    /// Heaps and priority queues
    Heap,

    /// Prefix trees
    Trie,
}

impl Tag {
    /// Every tag in catalog order
    pub const ALL: [Tag; 9] = [
        Tag::Recursion,
        Tag::Array,
        Tag::LinkedList,
        Tag::Dp,
        Tag::Graph,
        Tag::Hashing,
        Tag::Sorting,
        Tag::Heap,
        Tag::Trie,
    ];

    /// Get the display name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Recursion => "Recursion",
            Tag::Array => "Array",
            Tag::LinkedList => "Linked List",
            Tag::Dp => "DP",
            Tag::Graph => "Graph",
            Tag::Hashing => "Hashing",
            Tag::Sorting => "Sorting",
            Tag::Heap => "Heap",
            Tag::Trie => "Trie",
        }
    }

    /// Parse a tag from user input
    ///
    /// Matching ignores case, spaces, `-` and `_`, so `Linked List`,
    /// `linked-list` and `linkedlist` all name the same tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackit_domain::Tag;
    ///
    /// assert_eq!(Tag::parse("linked-list"), Some(Tag::LinkedList));
    /// assert_eq!(Tag::parse("dp"), Some(Tag::Dp));
    /// assert_eq!(Tag::parse("Tree"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "recursion" => Some(Tag::Recursion),
            "array" => Some(Tag::Array),
            "linkedlist" => Some(Tag::LinkedList),
            "dp" => Some(Tag::Dp),
            "graph" => Some(Tag::Graph),
            "hashing" => Some(Tag::Hashing),
            "sorting" => Some(Tag::Sorting),
            "heap" => Some(Tag::Heap),
            "trie" => Some(Tag::Trie),
            _ => None,
        }
    }

    /// Normalize a list of tags into a set in catalog order
    pub fn normalize_set(tags: &[Tag]) -> Vec<Tag> {
        Tag::ALL.iter().copied().filter(|t| tags.contains(t)).collect()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tag: {}", s))
    }
}
