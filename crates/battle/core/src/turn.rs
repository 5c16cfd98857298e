//! Turn order state machine.
//!
//! ```text
//! Waiting ──start──▶ Turn(first) ◀──switch──▶ Turn(other)
//!    │                    │                        │
//!    └──────finish────────┴─────────finish─────────┴──▶ Finished
//! ```
//!
//! The first mover is decided once, before the first turn. A *cycle* is one
//! action from each side and completes when control returns to the first
//! mover; the turn counter counts cycles, starting at 1.

use strum::Display;
use tracing::debug;

use crate::error::BattleError;
use crate::rng::BattleRng;

/// One of the two battle participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

/// Battle lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleState {
    #[default]
    Waiting,
    Turn(Side),
    Finished,
}

impl BattleState {
    pub const fn is_finished(self) -> bool {
        matches!(self, BattleState::Finished)
    }

    /// Side whose turn it is, if any.
    pub const fn active_side(self) -> Option<Side> {
        match self {
            BattleState::Turn(side) => Some(side),
            BattleState::Waiting | BattleState::Finished => None,
        }
    }
}

/// Result of a successful turn switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnSwitch {
    pub next: Side,
    /// Control returned to the first mover; both sides have acted once.
    pub cycle_completed: bool,
}

/// Tracks whose turn it is and how many cycles have elapsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnManager {
    state: BattleState,
    turn_count: u32,
    first_mover: Option<Side>,
}

impl TurnManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strictly faster side moves first; an exact tie is settled by a coin
    /// flip (heads: side one).
    pub fn determine_first_mover(speed_one: u32, speed_two: u32, rng: &mut impl BattleRng) -> Side {
        match speed_one.cmp(&speed_two) {
            std::cmp::Ordering::Greater => Side::One,
            std::cmp::Ordering::Less => Side::Two,
            std::cmp::Ordering::Equal => {
                if rng.coin_flip() {
                    Side::One
                } else {
                    Side::Two
                }
            }
        }
    }

    /// `Waiting → Turn(first)`; the turn counter becomes 1.
    pub fn start(&mut self, first: Side) -> Result<(), BattleError> {
        match self.state {
            BattleState::Waiting => {
                self.state = BattleState::Turn(first);
                self.turn_count = 1;
                self.first_mover = Some(first);
                debug!(first = %first, "turn order decided");
                Ok(())
            }
            BattleState::Turn(_) => Err(BattleError::AlreadyStarted),
            BattleState::Finished => Err(BattleError::Finished),
        }
    }

    /// Hands control to the other side.
    pub fn switch_turn(&mut self) -> Result<TurnSwitch, BattleError> {
        let current = match self.state {
            BattleState::Turn(side) => side,
            BattleState::Waiting => return Err(BattleError::NotStarted),
            BattleState::Finished => return Err(BattleError::Finished),
        };

        let next = current.opponent();
        let cycle_completed = Some(next) == self.first_mover;
        if cycle_completed {
            self.turn_count += 1;
        }
        self.state = BattleState::Turn(next);
        debug!(next = %next, turn = self.turn_count, cycle_completed, "turn switched");

        Ok(TurnSwitch {
            next,
            cycle_completed,
        })
    }

    /// Any state → `Finished`. Terminal.
    pub fn finish(&mut self) {
        self.state = BattleState::Finished;
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn first_mover(&self) -> Option<Side> {
        self.first_mover
    }

    pub fn current(&self) -> Option<Side> {
        self.state.active_side()
    }
}
