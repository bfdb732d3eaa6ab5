//! The award night session: roster, categories, ballots and the phase
//! machine that sequences them. Everything here is synchronous; callers
//! serialize access (see `crate::state::AppState`).

mod ballot;
mod phase;
mod roster;
pub mod tally;

pub use ballot::BallotBox;
pub use phase::Action;
pub use roster::NameList;

use crate::types::*;

/// One game of awards, from setup to results
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    round_no: u32,
    version: u64,
    phase: Phase,
    participants: NameList,
    categories: NameList,
    ballots: BallotBox,
    voted: Vec<ParticipantName>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            round_no: 1,
            version: 1,
            phase: Phase::Setup,
            participants: NameList::new("participant name"),
            categories: NameList::new("category name"),
            ballots: BallotBox::new(),
            voted: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn round_no(&self) -> u32 {
        self.round_no
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn participants(&self) -> &[ParticipantName] {
        self.participants.as_slice()
    }

    pub fn categories(&self) -> &[CategoryName] {
        self.categories.as_slice()
    }

    /// Participants who finished voting, in the order they finished
    pub fn voted(&self) -> &[ParticipantName] {
        &self.voted
    }

    pub fn has_voted(&self, name: &str) -> bool {
        self.voted.iter().any(|v| v == name)
    }

    /// (voted, total) for the "N of M have voted" counter
    pub fn voting_status(&self) -> (usize, usize) {
        (self.voted.len(), self.participants.len())
    }

    pub fn all_have_voted(&self) -> bool {
        !self.participants.is_empty() && self.voted.len() == self.participants.len()
    }

    pub fn ballots(&self) -> &BallotBox {
        &self.ballots
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            round_no: self.round_no,
            version: self.version,
            phase: self.phase.clone(),
            participants: self.participants.to_vec(),
            categories: self.categories.to_vec(),
            voted: self.voted.clone(),
        }
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;

    fn ready_session() -> Session {
        let mut session = Session::new();
        session.add_participant("Ana").unwrap();
        session.add_participant("Leo").unwrap();
        session.add_category("Best Sweater").unwrap();
        session
    }

    #[test]
    fn test_new_session() {
        let session = Session::new();

        assert_eq!(session.phase(), &Phase::Setup);
        assert_eq!(session.round_no(), 1);
        assert!(session.participants().is_empty());
        assert!(session.categories().is_empty());
        assert!(session.voted().is_empty());
        assert!(session.ballots().is_empty());
        assert!(!session.all_have_voted());
    }

    #[test]
    fn test_full_round() {
        let mut session = ready_session();

        assert_eq!(session.start_voting().unwrap(), Phase::VoterSelect);

        session.select_voter("Ana").unwrap();
        session.cast_vote("Ana", "Best Sweater", "Leo").unwrap();
        assert_eq!(session.finish_voting().unwrap(), Phase::VoterSelect);
        assert_eq!(session.voted(), ["Ana"]);
        assert_eq!(session.voting_status(), (1, 2));

        session.select_voter("Leo").unwrap();
        session.cast_vote("Leo", "Best Sweater", "Leo").unwrap();
        session.finish_voting().unwrap();

        assert!(session.all_have_voted());
        assert_eq!(session.show_results().unwrap(), Phase::Results);

        let result = session.tally("Best Sweater");
        assert_eq!(
            result,
            TallyResult {
                winner: Some("Leo".to_string()),
                winner_count: 2,
                runner_up: None,
                runner_up_count: 0,
            }
        );
    }

    #[test]
    fn test_rejected_intent_leaves_state_unchanged() {
        let mut session = Session::new();
        session.add_participant("Ana").unwrap();
        session.add_category("Best Sweater").unwrap();
        let before = session.snapshot();

        let err = session.start_voting().unwrap_err();
        assert!(matches!(err, SessionError::Precondition(_)));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_snapshot_reflects_stores() {
        let mut session = ready_session();
        session.start_voting().unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.id, session.id());
        assert_eq!(snapshot.phase, Phase::VoterSelect);
        assert_eq!(snapshot.participants, vec!["Ana", "Leo"]);
        assert_eq!(snapshot.categories, vec!["Best Sweater"]);
        assert!(snapshot.voted.is_empty());
    }

    #[test]
    fn test_version_increases_on_mutation() {
        let mut session = Session::new();
        let v0 = session.version();
        session.add_participant("Ana").unwrap();
        assert!(session.version() > v0);

        let v1 = session.version();
        let _ = session.add_participant("Ana");
        assert_eq!(session.version(), v1);
    }
}
