//! Battle facade.
//!
//! [`Battle`] owns both characters, the turn state machine, the victory
//! checker, the log and the random source. A front end drives it like this:
//!
//! ```text
//! start()
//! loop {
//!     execute_action(index)   // repeat while Rejected
//!     end_turn()              // Finished after a knockout
//! }
//! ```

use tracing::{debug, info};

use crate::character::Character;
use crate::config::BattleConfig;
use crate::error::{BattleError, ConfigError};
use crate::log::{BattleAction, BattleLog};
use crate::resolver::{ActionOutcome, CombatResolver};
use crate::rng::BattleRng;
use crate::skill::Skill;
use crate::turn::{BattleState, Side, TurnManager};
use crate::victory::VictoryConditionChecker;

/// A skill slot as seen by whoever chooses the next action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillChoice {
    pub index: usize,
    pub skill: Skill,
    pub cost: u32,
    pub affordable: bool,
}

/// A two-combatant battle.
pub struct Battle<R: BattleRng> {
    characters: [Character; 2],
    config: BattleConfig,
    rng: R,
    turns: TurnManager,
    victory: VictoryConditionChecker,
    log: BattleLog,
    /// Start-of-turn ticks still owed for the current turn.
    ticks_pending: bool,
    /// The current turn produced an executed or skipped action.
    turn_consumed: bool,
}

impl<R: BattleRng> Battle<R> {
    /// Battle under the default balance.
    pub fn new(one: Character, two: Character, rng: R) -> Self {
        let config = BattleConfig::default();
        let log = BattleLog::with_capacity(config.log_capacity);
        Self {
            characters: [one, two],
            config,
            rng,
            turns: TurnManager::new(),
            victory: VictoryConditionChecker::new(),
            log,
            ticks_pending: false,
            turn_consumed: false,
        }
    }

    /// Battle under a custom balance, validated first.
    pub fn with_config(
        one: Character,
        two: Character,
        config: BattleConfig,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut battle = Self::new(one, two, rng);
        battle.log = BattleLog::with_capacity(config.log_capacity);
        battle.config = config;
        Ok(battle)
    }

    /// Decides turn order and enters the first turn. Call once.
    pub fn start(&mut self) -> Result<Side, BattleError> {
        match self.turns.state() {
            BattleState::Waiting => {}
            BattleState::Turn(_) => return Err(BattleError::AlreadyStarted),
            BattleState::Finished => return Err(BattleError::Finished),
        }

        let [one, two] = &self.characters;
        let first = TurnManager::determine_first_mover(one.speed(), two.speed(), &mut self.rng);
        self.turns.start(first)?;
        self.ticks_pending = true;
        self.turn_consumed = false;

        info!(
            one = one.name(),
            two = two.name(),
            first = self.characters[first.index()].name(),
            "battle started"
        );
        Ok(first)
    }

    /// Attempts the current actor's skill in slot `skill_index`.
    ///
    /// A rejection leaves the turn open; choose again.
    pub fn execute_action(&mut self, skill_index: usize) -> Result<ActionOutcome, BattleError> {
        let side = self.active_side()?;
        if self.is_finished() {
            return Err(BattleError::Finished);
        }
        if self.turn_consumed {
            return Err(BattleError::TurnConsumed);
        }

        let turn = self.turns.turn_count();
        let [one, two] = &mut self.characters;
        let (actor, target) = match side {
            Side::One => (one, two),
            Side::Two => (two, one),
        };
        let mut resolver = CombatResolver::new(&self.config, &mut self.rng);
        if std::mem::take(&mut self.ticks_pending) {
            resolver.tick_start_of_turn(actor);
        }
        let outcome = resolver.resolve(actor, target, skill_index, turn, &mut self.log);

        self.turn_consumed = outcome.is_consumed();
        Ok(outcome)
    }

    /// The current actor gives up. Returns the winning side.
    pub fn surrender(&mut self) -> Result<Side, BattleError> {
        let loser = self.active_side()?;
        if self.is_finished() {
            return Err(BattleError::Finished);
        }
        let winner = self.victory.handle_surrender(loser);

        let action = BattleAction::surrender(
            self.turns.turn_count(),
            self.characters[loser.index()].name(),
            self.characters[winner.index()].name(),
        );
        self.log.append(action);
        self.turns.finish();

        info!(
            loser = self.characters[loser.index()].name(),
            winner = self.characters[winner.index()].name(),
            "battle finished by surrender"
        );
        Ok(winner)
    }

    /// Closes the current turn.
    ///
    /// After a knockout the battle finishes; otherwise control passes to the
    /// other side, and both characters regenerate when a cycle completes.
    pub fn end_turn(&mut self) -> Result<BattleState, BattleError> {
        self.active_side()?;
        if !self.turn_consumed {
            return Err(BattleError::TurnNotConsumed);
        }
        self.turn_consumed = false;

        if self.is_finished() {
            self.turns.finish();
            info!(
                winner = self.winner().map(|side| self.characters[side.index()].name()),
                turns = self.turns.turn_count(),
                "battle finished"
            );
            return Ok(self.turns.state());
        }

        let switch = self.turns.switch_turn()?;
        if switch.cycle_completed {
            let amount = self.config.regen_per_cycle;
            for character in &mut self.characters {
                let restored = character.regen_resource(amount);
                debug!(owner = character.name(), restored, resource = character.resource(), "regenerated");
            }
        }
        self.ticks_pending = true;

        Ok(self.turns.state())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_finished(&self) -> bool {
        self.victory.is_finished(self.turns.state(), &self.characters)
    }

    pub fn winner(&self) -> Option<Side> {
        self.victory.winner(&self.characters)
    }

    pub fn turn_count(&self) -> u32 {
        self.turns.turn_count()
    }

    pub fn battle_log(&self) -> &BattleLog {
        &self.log
    }

    pub fn state(&self) -> BattleState {
        self.turns.state()
    }

    pub fn first_mover(&self) -> Option<Side> {
        self.turns.first_mover()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn character(&self, side: Side) -> &Character {
        &self.characters[side.index()]
    }

    /// Character whose turn it is.
    pub fn current_actor(&self) -> Option<&Character> {
        self.turns.current().map(|side| self.character(side))
    }

    /// The current actor's opponent.
    pub fn opponent(&self) -> Option<&Character> {
        self.turns.current().map(|side| self.character(side.opponent()))
    }

    /// Skill slots of the current actor with their costs.
    pub fn available_skills(&self) -> Vec<SkillChoice> {
        let Some(actor) = self.current_actor() else {
            return Vec::new();
        };
        actor
            .skills()
            .iter()
            .enumerate()
            .map(|(index, &skill)| {
                let cost = skill.cost(&self.config);
                SkillChoice {
                    index,
                    skill,
                    cost,
                    affordable: actor.resource() >= cost,
                }
            })
            .collect()
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Side in control between `start` and `Finished`.
    fn active_side(&self) -> Result<Side, BattleError> {
        match self.turns.state() {
            BattleState::Waiting => Err(BattleError::NotStarted),
            BattleState::Finished => Err(BattleError::Finished),
            BattleState::Turn(side) => Ok(side),
        }
    }
}
