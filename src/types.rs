use serde::{Deserialize, Serialize};

/// Name aliases for readability; names are the identity of their entities
pub type SessionId = String;
pub type ParticipantName = String;
pub type CategoryName = String;

/// Label shown in place of a winner when a category received no votes
pub const NO_VOTES_LABEL: &str = "No votes";

/// Minimum roster size before voting can start
pub const MIN_PARTICIPANTS: usize = 2;
/// Minimum number of categories before voting can start
pub const MIN_CATEGORIES: usize = 1;

/// Categories offered to the host as one-click additions
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "Best Christmas Sweater",
    "Most Festive Spirit",
    "Best Gift Giver",
    "Holiday Cheer Champion",
    "Best Holiday Cook",
];

/// Session phase. `Voting` carries the voter whose turn it is and the
/// category they are looking at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Setup,
    VoterSelect,
    Voting {
        voter: ParticipantName,
        category_index: usize,
    },
    Results,
}

impl Phase {
    /// Coarse stage shown to observers (setup, voting or results)
    pub fn stage(&self) -> Stage {
        match self {
            Phase::Setup => Stage::Setup,
            Phase::VoterSelect | Phase::Voting { .. } => Stage::Voting,
            Phase::Results => Stage::Results,
        }
    }

    pub fn is_setup(&self) -> bool {
        matches!(self, Phase::Setup)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Setup,
    Voting,
    Results,
}

/// Direction for walking through categories while voting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// Outcome of counting one category's ballots. `winner == None` means the
/// category received no votes at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TallyResult {
    pub winner: Option<ParticipantName>,
    pub winner_count: u32,
    pub runner_up: Option<ParticipantName>,
    pub runner_up_count: u32,
}

impl TallyResult {
    pub fn no_votes() -> Self {
        Self {
            winner: None,
            winner_count: 0,
            runner_up: None,
            runner_up_count: 0,
        }
    }

    /// Winner's name, or the "No votes" label
    pub fn winner_label(&self) -> &str {
        self.winner.as_deref().unwrap_or(NO_VOTES_LABEL)
    }
}

/// One candidate's vote count within a category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Standing {
    pub candidate: ParticipantName,
    pub votes: u32,
}

/// A voter's choice so far for one category (None = not answered yet)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryProgress {
    pub category: CategoryName,
    pub choice: Option<ParticipantName>,
}

/// Read-only view of the whole session for observers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub round_no: u32,
    pub version: u64,
    pub phase: Phase,
    pub participants: Vec<ParticipantName>,
    pub categories: Vec<CategoryName>,
    pub voted: Vec<ParticipantName>,
}
