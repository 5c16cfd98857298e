//! Randomness oracle for dodge rolls, critical rolls and turn-order coin flips.
//!
//! The resolver never reaches for a global generator: every battle owns one
//! [`BattleRng`] and draws from it sequentially. Draw order matters (the dodge
//! roll precedes the crit roll), so the same source and the same choices
//! always replay the same battle.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of random draws for a single battle.
pub trait BattleRng {
    /// Uniform value in `[0, 100)`.
    fn roll_percent(&mut self) -> f64;

    /// Unbiased coin flip.
    fn coin_flip(&mut self) -> bool;
}

/// Adapter exposing any `rand` generator as a [`BattleRng`].
#[derive(Clone, Debug)]
pub struct RngRolls<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RngRolls<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngRolls<StdRng> {
    /// Deterministic source for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: RngCore> BattleRng for RngRolls<R> {
    fn roll_percent(&mut self) -> f64 {
        self.rng.gen_range(0.0..100.0)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

impl<T: BattleRng + ?Sized> BattleRng for &mut T {
    fn roll_percent(&mut self) -> f64 {
        (**self).roll_percent()
    }

    fn coin_flip(&mut self) -> bool {
        (**self).coin_flip()
    }
}

/// Predetermined rolls, consumed in order.
///
/// Once a queue runs dry the fallback is returned. The default fallback roll
/// of `99.99` never dodges and never crits under any valid balance.
#[derive(Clone, Debug)]
pub struct ScriptedRolls {
    rolls: VecDeque<f64>,
    flips: VecDeque<bool>,
    fallback_roll: f64,
    fallback_flip: bool,
}

impl ScriptedRolls {
    pub const NEVER_TRIGGERS: f64 = 99.99;

    pub fn new() -> Self {
        Self {
            rolls: VecDeque::new(),
            flips: VecDeque::new(),
            fallback_roll: Self::NEVER_TRIGGERS,
            fallback_flip: true,
        }
    }

    /// Queues percentage rolls.
    #[must_use]
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Queues coin flips.
    #[must_use]
    pub fn with_flips(mut self, flips: impl IntoIterator<Item = bool>) -> Self {
        self.flips.extend(flips);
        self
    }

    /// Sets the roll returned once the queue is empty.
    #[must_use]
    pub fn with_fallback_roll(mut self, roll: f64) -> Self {
        self.fallback_roll = roll;
        self
    }

    /// Number of queued rolls not yet consumed.
    pub fn remaining_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl Default for ScriptedRolls {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleRng for ScriptedRolls {
    fn roll_percent(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback_roll)
    }

    fn coin_flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or(self.fallback_flip)
    }
}
