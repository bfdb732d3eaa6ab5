use super::Session;
use crate::error::{SessionError, SessionResult};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Intents the current phase will accept (used to enable buttons)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    EditRoster,
    StartVoting,
    SelectVoter,
    CastVote,
    NextCategory,
    PrevCategory,
    FinishVoting,
    ShowResults,
    Reset,
}

impl Session {
    /// Actions whose guards currently pass. Reset is always available.
    pub fn available_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        match &self.phase {
            Phase::Setup => {
                actions.push(Action::EditRoster);
                if self.check_can_start().is_ok() {
                    actions.push(Action::StartVoting);
                }
            }
            Phase::VoterSelect => {
                if self.all_have_voted() {
                    actions.push(Action::ShowResults);
                } else {
                    actions.push(Action::SelectVoter);
                }
            }
            Phase::Voting {
                voter,
                category_index,
            } => {
                actions.push(Action::CastVote);
                if *category_index > 0 {
                    actions.push(Action::PrevCategory);
                }
                if category_index + 1 < self.categories.len() {
                    actions.push(Action::NextCategory);
                }
                if category_index + 1 == self.categories.len() && self.is_complete(voter) {
                    actions.push(Action::FinishVoting);
                }
            }
            Phase::Results => {}
        }
        actions.push(Action::Reset);
        actions
    }

    fn check_can_start(&self) -> SessionResult<()> {
        if self.participants.len() < MIN_PARTICIPANTS {
            return Err(SessionError::precondition(format!(
                "Add at least {} participants",
                MIN_PARTICIPANTS
            )));
        }
        if self.categories.len() < MIN_CATEGORIES {
            return Err(SessionError::precondition(format!(
                "Add at least {} category",
                MIN_CATEGORIES
            )));
        }
        Ok(())
    }

    /// Setup -> VoterSelect. Locks the roster and category list.
    pub fn start_voting(&mut self) -> SessionResult<Phase> {
        if !self.phase.is_setup() {
            return Err(SessionError::precondition("Voting has already started"));
        }
        self.check_can_start()?;

        self.enter(Phase::VoterSelect);
        Ok(self.phase.clone())
    }

    /// VoterSelect -> Voting(name, 0)
    pub fn select_voter(&mut self, name: &str) -> SessionResult<Phase> {
        if self.phase != Phase::VoterSelect {
            return Err(SessionError::precondition(match &self.phase {
                Phase::Voting { voter, .. } => format!("{} is still voting", voter),
                _ => "Voters can only be selected during voting".to_string(),
            }));
        }
        if !self.participants.contains(name) {
            return Err(SessionError::unknown("participant", name));
        }
        if self.has_voted(name) {
            return Err(SessionError::AlreadyVoted(name.to_string()));
        }

        self.enter(Phase::Voting {
            voter: name.to_string(),
            category_index: 0,
        });
        Ok(self.phase.clone())
    }

    /// Move to the next or previous category. Clamped at both ends.
    pub fn advance_category(&mut self, direction: Direction) -> SessionResult<Phase> {
        let Phase::Voting { category_index, .. } = &mut self.phase else {
            return Err(SessionError::precondition(
                "No voter is currently voting",
            ));
        };

        let last = self.categories.len().saturating_sub(1);
        let target = match direction {
            Direction::Next => (*category_index + 1).min(last),
            Direction::Prev => category_index.saturating_sub(1),
        };
        if target != *category_index {
            *category_index = target;
            self.bump();
        }
        Ok(self.phase.clone())
    }

    /// Voting(voter, last) -> VoterSelect once every category has a ballot
    pub fn finish_voting(&mut self) -> SessionResult<Phase> {
        let Phase::Voting {
            voter,
            category_index,
        } = &self.phase
        else {
            return Err(SessionError::precondition(
                "No voter is currently voting",
            ));
        };
        if category_index + 1 != self.categories.len() {
            return Err(SessionError::precondition("Finish from the last category"));
        }

        let missing = self.ballots.missing(voter, self.categories.as_slice());
        if missing > 0 {
            return Err(SessionError::Incomplete {
                voter: voter.clone(),
                missing,
            });
        }

        let voter = voter.clone();
        if !self.has_voted(&voter) {
            self.voted.push(voter);
        }
        self.enter(Phase::VoterSelect);
        Ok(self.phase.clone())
    }

    /// VoterSelect -> Results once everyone has voted
    pub fn show_results(&mut self) -> SessionResult<Phase> {
        if self.phase != Phase::VoterSelect {
            return Err(SessionError::precondition(match self.phase.stage() {
                Stage::Results => "Results are already shown",
                _ => "Results can only be shown after voting",
            }));
        }
        if !self.all_have_voted() {
            let (voted, total) = self.voting_status();
            return Err(SessionError::precondition(format!(
                "Everyone must vote before showing results ({} of {} have voted)",
                voted, total
            )));
        }

        self.enter(Phase::Results);
        Ok(self.phase.clone())
    }

    /// Back to Setup from any phase, clearing every store
    pub fn reset(&mut self) -> Phase {
        self.participants.clear();
        self.categories.clear();
        self.ballots.clear();
        self.voted.clear();
        self.id = ulid::Ulid::new().to_string();
        self.round_no += 1;
        self.enter(Phase::Setup);
        self.phase.clone()
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!("Session phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.bump();
    }
}
