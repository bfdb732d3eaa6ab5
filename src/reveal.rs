//! Category-by-category reveal for the results screen.
//!
//! The sequencer only tracks which category is on screen and whether its
//! winner is still behind the drumroll. It never touches ballots; the
//! results are read from the session when a category is revealed.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RevealStage {
    /// Nothing shown yet
    Waiting,
    /// Category name shown, winner hidden
    Drumroll,
    /// Winner shown
    Revealed,
}

#[derive(Debug, Clone)]
pub struct RevealSequencer {
    total: usize,
    index: usize,
    stage: RevealStage,
    drumroll: Duration,
    drumroll_started: Option<Instant>,
}

impl RevealSequencer {
    pub fn new(total: usize, drumroll: Duration) -> Self {
        Self {
            total,
            index: 0,
            stage: RevealStage::Waiting,
            drumroll,
            drumroll_started: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn stage(&self) -> RevealStage {
        self.stage
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.total == 0 || (self.index + 1 == self.total && self.stage == RevealStage::Revealed)
    }

    /// Step forward: Waiting -> Drumroll -> Revealed -> next category's
    /// Drumroll. Returns whether anything changed.
    pub fn next(&mut self, now: Instant) -> bool {
        if self.total == 0 {
            return false;
        }
        match self.stage {
            RevealStage::Waiting => self.start_drumroll(now),
            RevealStage::Drumroll => self.reveal(),
            RevealStage::Revealed if self.index + 1 < self.total => {
                self.index += 1;
                self.start_drumroll(now);
            }
            RevealStage::Revealed => return false,
        }
        true
    }

    /// Step back to the previous category, already revealed
    pub fn prev(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.reveal();
        true
    }

    /// Finish a drumroll whose time is up. Returns whether it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        match (self.stage, self.drumroll_started) {
            (RevealStage::Drumroll, Some(started)) if now.duration_since(started) >= self.drumroll => {
                self.reveal();
                true
            }
            _ => false,
        }
    }

    fn start_drumroll(&mut self, now: Instant) {
        self.stage = RevealStage::Drumroll;
        self.drumroll_started = Some(now);
    }

    fn reveal(&mut self) {
        self.stage = RevealStage::Revealed;
        self.drumroll_started = None;
    }
}
