use super::roster::NameList;
use super::Session;
use crate::error::{SessionError, SessionResult};
use crate::types::{CategoryProgress, Phase};
use std::collections::HashMap;

/// Ballots keyed by voter, then category. One candidate per
/// (voter, category); a later vote overwrites an earlier one.
#[derive(Debug, Clone, Default)]
pub struct BallotBox {
    ballots: HashMap<String, HashMap<String, String>>,
}

impl BallotBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote after checking every name against the current stores.
    /// Returns whether the stored choice changed.
    pub fn cast(
        &mut self,
        participants: &NameList,
        categories: &NameList,
        voter: &str,
        category: &str,
        candidate: &str,
    ) -> SessionResult<bool> {
        if !participants.contains(voter) {
            return Err(SessionError::unknown("voter", voter));
        }
        if !categories.contains(category) {
            return Err(SessionError::unknown("category", category));
        }
        if !participants.contains(candidate) {
            return Err(SessionError::unknown("candidate", candidate));
        }

        let previous = self
            .ballots
            .entry(voter.to_string())
            .or_default()
            .insert(category.to_string(), candidate.to_string());

        Ok(previous.as_deref() != Some(candidate))
    }

    /// Candidate chosen by `voter` in `category`, if any
    pub fn choice(&self, voter: &str, category: &str) -> Option<&str> {
        self.ballots
            .get(voter)
            .and_then(|votes| votes.get(category))
            .map(String::as_str)
    }

    /// Number of `categories` the voter has not answered yet
    pub fn missing(&self, voter: &str, categories: &[String]) -> usize {
        categories
            .iter()
            .filter(|category| self.choice(voter, category).is_none())
            .count()
    }

    /// True iff every category in the given list has a ballot from `voter`.
    /// Always evaluated against the list passed in, never a remembered one.
    pub fn is_complete(&self, voter: &str, categories: &[String]) -> bool {
        self.missing(voter, categories) == 0
    }

    /// All candidate names chosen for `category`, one per voter who voted there
    pub fn choices_for<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.ballots
            .values()
            .filter_map(move |votes| votes.get(category))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.values().all(HashMap::is_empty)
    }

    pub fn clear(&mut self) {
        self.ballots.clear();
    }
}

impl Session {
    /// Cast (or change) a vote for the voter whose turn it is
    pub fn cast_vote(&mut self, voter: &str, category: &str, candidate: &str) -> SessionResult<()> {
        // Reference checks first so unknown names report as such in any phase
        for (kind, name, list) in [
            ("voter", voter, &self.participants),
            ("category", category, &self.categories),
            ("candidate", candidate, &self.participants),
        ] {
            if !list.contains(name) {
                return Err(SessionError::unknown(kind, name));
            }
        }

        match &self.phase {
            Phase::Voting { voter: current, .. } if current == voter => {}
            Phase::Voting { voter: current, .. } => {
                return Err(SessionError::precondition(format!(
                    "It is {}'s turn to vote, not {}'s",
                    current, voter
                )));
            }
            _ => {
                return Err(SessionError::precondition(format!(
                    "{} must be selected as the current voter first",
                    voter
                )));
            }
        }

        if self
            .ballots
            .cast(&self.participants, &self.categories, voter, category, candidate)?
        {
            self.bump();
        }
        Ok(())
    }

    /// Whether `voter` has a ballot in every current category
    pub fn is_complete(&self, voter: &str) -> bool {
        self.ballots.is_complete(voter, self.categories.as_slice())
    }

    /// Per-category choices of `voter`, in category display order
    pub fn progress(&self, voter: &str) -> Vec<CategoryProgress> {
        self.categories
            .as_slice()
            .iter()
            .map(|category| CategoryProgress {
                category: category.clone(),
                choice: self.ballots.choice(voter, category).map(str::to_string),
            })
            .collect()
    }
}
