use crate::photo::PhotoRef;
use crate::reveal::RevealStage;
use crate::session::Action;
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    // Setup
    AddParticipant {
        name: String,
    },
    RemoveParticipant {
        name: String,
    },
    AddCategory {
        name: String,
    },
    RemoveCategory {
        name: String,
    },
    /// Ask for the list of ready-made category names
    SuggestedCategories,
    StartVoting,

    // Voting
    SelectVoter {
        name: String,
    },
    CastVote {
        voter: ParticipantName,
        category: CategoryName,
        candidate: ParticipantName,
    },
    AdvanceCategory {
        direction: Direction,
    },
    FinishVoting,
    ShowResults,

    // Results
    Tally {
        category: CategoryName,
    },
    RevealNext,
    RevealPrev,
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        session: SessionSnapshot,
        actions: Vec<Action>,
        server_now: String,
    },
    Roster {
        participants: Vec<ParticipantName>,
    },
    Categories {
        categories: Vec<CategoryName>,
    },
    SuggestedCategories {
        categories: Vec<String>,
    },
    Phase {
        phase: Phase,
        stage: Stage,
        round_no: u32,
        version: u64,
        voted: Vec<ParticipantName>,
        total: usize,
        actions: Vec<Action>,
        server_now: String,
    },
    /// Broadcast after each accepted vote
    VoteAck {
        voter: ParticipantName,
        category: CategoryName,
        candidate: ParticipantName,
    },
    /// The current voter's choices so far (sent to the voting screen)
    VotingProgress {
        voter: ParticipantName,
        progress: Vec<CategoryProgress>,
        complete: bool,
    },
    Tally {
        category: CategoryName,
        result: TallyResult,
        standings: Vec<Standing>,
    },
    Results {
        cards: Vec<ResultCard>,
    },
    RevealUpdate {
        index: usize,
        total: usize,
        category: CategoryName,
        stage: RevealStage,
        /// Present once the category's winner is revealed
        #[serde(skip_serializing_if = "Option::is_none")]
        card: Option<ResultCard>,
        finished: bool,
    },
    Error {
        code: String,
        msg: String,
    },
}

/// One category's outcome as shown on the results screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultCard {
    /// 1-based position in the category list
    pub number: usize,
    pub category: CategoryName,
    pub winner_label: String,
    pub result: TallyResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_photo: Option<PhotoRef>,
}

impl ServerMessage {
    pub fn error(code: &str, msg: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.to_string(),
            msg: msg.into(),
        }
    }
}

impl From<crate::error::SessionError> for ServerMessage {
    fn from(err: crate::error::SessionError) -> Self {
        ServerMessage::error(err.code(), err.to_string())
    }
}
