//! Vote counting for a single category.
//!
//! Candidates are ranked by vote count, highest first. Equal counts are
//! ordered by candidate name (ascending, byte-wise) so the same ballots
//! always produce the same winner.

use super::ballot::BallotBox;
use super::Session;
use crate::types::{Standing, TallyResult};
use std::collections::HashMap;

/// Full ranking for `category`. Candidates without votes are not listed.
pub fn standings(ballots: &BallotBox, category: &str) -> Vec<Standing> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for candidate in ballots.choices_for(category) {
        *counts.entry(candidate).or_insert(0) += 1;
    }

    let mut sorted: Vec<Standing> = counts
        .into_iter()
        .map(|(candidate, votes)| Standing {
            candidate: candidate.to_string(),
            votes,
        })
        .collect();
    sorted.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.candidate.cmp(&b.candidate)));
    sorted
}

/// Winner and runner-up for `category`
pub fn tally(ballots: &BallotBox, category: &str) -> TallyResult {
    let mut ranked = standings(ballots, category).into_iter();

    let Some(first) = ranked.next() else {
        return TallyResult::no_votes();
    };
    let second = ranked.next();

    TallyResult {
        winner: Some(first.candidate),
        winner_count: first.votes,
        runner_up_count: second.as_ref().map(|s| s.votes).unwrap_or(0),
        runner_up: second.map(|s| s.candidate),
    }
}

impl Session {
    /// Tally one category. Unknown categories simply have no votes.
    pub fn tally(&self, category: &str) -> TallyResult {
        tally(&self.ballots, category)
    }

    /// Ranking behind [`Session::tally`]
    pub fn standings(&self, category: &str) -> Vec<Standing> {
        standings(&self.ballots, category)
    }

    /// Tally every category in display order
    pub fn tally_all(&self) -> Vec<(String, TallyResult)> {
        self.categories
            .as_slice()
            .iter()
            .map(|category| (category.clone(), self.tally(category)))
            .collect()
    }
}
