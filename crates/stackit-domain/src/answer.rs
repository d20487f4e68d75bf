//! Answer module - replies to a question and the vote state machine

use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for an answer based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnswerId(u128);

impl AnswerId {
    /// Generate a new UUIDv7-based AnswerId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an AnswerId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an AnswerId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid answer id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for AnswerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Kind of vote a user can cast on an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteKind {
    /// Thumbs up
    Like,

    /// Thumbs down
    Dislike,
}

impl VoteKind {
    /// Get the vote kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteKind::Like => "like",
            VoteKind::Dislike => "dislike",
        }
    }

    /// Parse a vote kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "like" | "up" | "+" => Some(VoteKind::Like),
            "dislike" | "down" | "-" => Some(VoteKind::Dislike),
            _ => None,
        }
    }
}

impl std::str::FromStr for VoteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid vote kind: {}", s))
    }
}

/// Transition caused by a single vote on a (answer, voter) pair
///
/// `None` stands for the no-vote state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    /// Vote held before the toggle
    pub previous: Option<VoteKind>,

    /// Vote held after the toggle
    pub current: Option<VoteKind>,
}

impl VoteOutcome {
    /// Whether the vote cancelled a previous identical vote
    pub fn is_retraction(&self) -> bool {
        self.previous.is_some() && self.current.is_none()
    }
}

/// An answer to a question
///
/// The like and dislike counters are private and only move through
/// [`Answer::toggle_vote`], so they always equal the number of voters
/// holding each kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Unique identifier
    pub id: AnswerId,

    /// Answer body
    pub text: String,

    /// Identity of the author
    pub author: String,

    likes: u32,
    dislikes: u32,
    voters: BTreeMap<String, VoteKind>,
}

impl Answer {
    /// Create a new answer with no votes
    pub fn new(id: AnswerId, text: String, author: String) -> Self {
        Self {
            id,
            text,
            author,
            likes: 0,
            dislikes: 0,
            voters: BTreeMap::new(),
        }
    }

    /// Number of likes
    pub fn likes(&self) -> u32 {
        self.likes
    }

    /// Number of dislikes
    pub fn dislikes(&self) -> u32 {
        self.dislikes
    }

    /// Current vote of an identity, if any
    pub fn vote_of(&self, voter: &str) -> Option<VoteKind> {
        self.voters.get(voter).copied()
    }

    /// All voters and their current votes
    pub fn voters(&self) -> &BTreeMap<String, VoteKind> {
        &self.voters
    }

    /// Whether the given identity wrote this answer
    pub fn is_authored_by(&self, identity: &str) -> bool {
        self.author == identity
    }

    /// Apply a vote with toggle semantics
    ///
    /// Voting the kind already held retracts it. Voting the other kind moves
    /// the vote across. A first vote simply counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackit_domain::{Answer, AnswerId, VoteKind};
    ///
    /// let mut answer = Answer::new(AnswerId::new(), "Use a heap".into(), "bob".into());
    /// answer.toggle_vote("alice", VoteKind::Like);
    /// assert_eq!(answer.likes(), 1);
    ///
    /// answer.toggle_vote("alice", VoteKind::Dislike);
    /// assert_eq!((answer.likes(), answer.dislikes()), (0, 1));
    ///
    /// answer.toggle_vote("alice", VoteKind::Dislike);
    /// assert_eq!((answer.likes(), answer.dislikes()), (0, 0));
    /// ```
    pub fn toggle_vote(&mut self, voter: &str, kind: VoteKind) -> VoteOutcome {
        let previous = self.vote_of(voter);

        let current = if previous == Some(kind) {
            self.decrement(kind);
            self.voters.remove(voter);
            None
        } else {
            if let Some(prev) = previous {
                self.decrement(prev);
            }
            self.increment(kind);
            self.voters.insert(voter.to_string(), kind);
            Some(kind)
        };

        VoteOutcome { previous, current }
    }

    fn increment(&mut self, kind: VoteKind) {
        match kind {
            VoteKind::Like => self.likes += 1,
            VoteKind::Dislike => self.dislikes += 1,
        }
    }

    // Counters never drop below the voter tally, so saturating is exact here.
    fn decrement(&mut self, kind: VoteKind) {
        match kind {
            VoteKind::Like => self.likes = self.likes.saturating_sub(1),
            VoteKind::Dislike => self.dislikes = self.dislikes.saturating_sub(1),
        }
    }
}
