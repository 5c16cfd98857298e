//! Turn execution protocol.
//!
//! For the acting character, in order:
//!
//! 1. Start-of-turn ticks for the actor's own effects
//! 2. Knocked out by those ticks → `Defeated` entry, turn consumed
//! 3. Frozen → `Frozen` entry, end-of-turn decrement, turn consumed
//! 4. Skill index validation → rejection, nothing mutated
//! 5. Resource check → rejection, nothing mutated
//! 6. HP snapshots, skill execution, HP deltas
//! 7. Log entry, then end-of-turn decrement
//!
//! A rejection leaves both characters untouched; the caller re-prompts and
//! calls [`CombatResolver::resolve`] again without re-running the ticks.

use std::fmt;

use tracing::debug;

use crate::character::Character;
use crate::config::BattleConfig;
use crate::log::{BattleAction, BattleLog, HpDeltas};
use crate::rng::BattleRng;
use crate::skill::Skill;

/// Why a selected action was not executed.
///
/// A normal negative result, not an error: the turn is not consumed and the
/// caller must choose again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    InvalidSkillIndex { index: usize, available: usize },
    InsufficientResource {
        skill: Skill,
        required: u32,
        available: u32,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InvalidSkillIndex { index, available } => {
                write!(f, "no skill in slot {index} (valid slots: 0..{available})")
            }
            Rejection::InsufficientResource {
                skill,
                required,
                available,
            } => write!(f, "{skill} needs {required} resource, only {available} left"),
        }
    }
}

/// Result of one action attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    /// A skill ran; the entry is also in the battle log.
    Executed(BattleAction),
    /// The actor could not act (frozen or knocked out); the turn is consumed.
    Skipped(BattleAction),
    /// Nothing happened; choose again.
    Rejected(Rejection),
}

impl ActionOutcome {
    /// True when the turn is over and `end_turn` may be called.
    pub fn is_consumed(&self) -> bool {
        !matches!(self, ActionOutcome::Rejected(_))
    }

    /// The log entry produced, if the turn was consumed.
    pub fn action(&self) -> Option<&BattleAction> {
        match self {
            ActionOutcome::Executed(action) | ActionOutcome::Skipped(action) => Some(action),
            ActionOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            ActionOutcome::Rejected(rejection) => Some(*rejection),
            ActionOutcome::Executed(_) | ActionOutcome::Skipped(_) => None,
        }
    }
}

/// Executes actions for one battle against a balance and a random source.
pub struct CombatResolver<'a, R: BattleRng> {
    config: &'a BattleConfig,
    rng: &'a mut R,
}

impl<'a, R: BattleRng> CombatResolver<'a, R> {
    pub fn new(config: &'a BattleConfig, rng: &'a mut R) -> Self {
        Self { config, rng }
    }

    /// Start-of-turn hooks for the actor's effects only. Returns true damage
    /// taken.
    pub fn tick_start_of_turn(&self, actor: &mut Character) -> u32 {
        actor.tick_effects()
    }

    /// Ticks, then resolves. Use when the selection is known up front.
    pub fn execute_turn(
        &mut self,
        actor: &mut Character,
        target: &mut Character,
        skill_index: usize,
        turn: u32,
        log: &mut BattleLog,
    ) -> ActionOutcome {
        self.tick_start_of_turn(actor);
        self.resolve(actor, target, skill_index, turn, log)
    }

    /// Everything after the start-of-turn ticks.
    pub fn resolve(
        &mut self,
        actor: &mut Character,
        target: &mut Character,
        skill_index: usize,
        turn: u32,
        log: &mut BattleLog,
    ) -> ActionOutcome {
        if !actor.is_alive() {
            let action = log.append(BattleAction::defeated(turn, actor.name())).clone();
            debug!(actor = actor.name(), turn, "actor collapsed before acting");
            return ActionOutcome::Skipped(action);
        }

        if !actor.can_act() {
            let action = log.append(BattleAction::frozen(turn, actor.name())).clone();
            debug!(actor = actor.name(), turn, "actor is frozen, turn skipped");
            actor.decrement_effects();
            return ActionOutcome::Skipped(action);
        }

        let Some(skill) = actor.skill(skill_index) else {
            let rejection = Rejection::InvalidSkillIndex {
                index: skill_index,
                available: actor.skills().len(),
            };
            debug!(actor = actor.name(), %rejection, "action rejected");
            return ActionOutcome::Rejected(rejection);
        };

        let cost = skill.cost(self.config);
        if actor.resource() < cost {
            return self.reject_unaffordable(actor, skill, cost);
        }

        let actor_hp = actor.hp();
        let target_hp = target.hp();

        let Some(outcome) = skill.execute(actor, target, &mut *self.rng, self.config) else {
            return self.reject_unaffordable(actor, skill, cost);
        };

        let deltas = HpDeltas {
            damage: target_hp.saturating_sub(target.hp()),
            healing: actor.hp().saturating_sub(actor_hp),
        };

        let action =
            BattleAction::skill_use(turn, actor.name(), target.name(), skill, &outcome, deltas);
        let action = log.append(action).clone();
        debug!(
            actor = actor.name(),
            target = target.name(),
            skill = %skill,
            damage = deltas.damage,
            healing = deltas.healing,
            critical = action.critical,
            dodged = action.dodged,
            effectiveness = action.effectiveness,
            "action executed"
        );

        actor.decrement_effects();
        ActionOutcome::Executed(action)
    }

    fn reject_unaffordable(&self, actor: &Character, skill: Skill, cost: u32) -> ActionOutcome {
        let rejection = Rejection::InsufficientResource {
            skill,
            required: cost,
            available: actor.resource(),
        };
        debug!(actor = actor.name(), %rejection, "action rejected");
        ActionOutcome::Rejected(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Archetype;
    use crate::effect::{StatusEffect, StatusEffectTag};
    use crate::log::ActionKind;
    use crate::rng::ScriptedRolls;

    struct Fixture {
        config: BattleConfig,
        rng: ScriptedRolls,
        log: BattleLog,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: BattleConfig::default(),
                rng: ScriptedRolls::new(),
                log: BattleLog::with_capacity(16),
            }
        }

        fn run(&mut self, actor: &mut Character, target: &mut Character, index: usize) -> ActionOutcome {
            CombatResolver::new(&self.config, &mut self.rng)
                .execute_turn(actor, target, index, 1, &mut self.log)
        }
    }

    #[test]
    fn invalid_index_is_rejected_without_mutation() {
        let mut fx = Fixture::new();
        let mut fire = Archetype::Fire.build_default().unwrap();
        let mut water = Archetype::Water.build_default().unwrap();
        let (fire_before, water_before) = (fire.clone(), water.clone());

        let outcome = fx.run(&mut fire, &mut water, 4);
        assert_eq!(
            outcome,
            ActionOutcome::Rejected(Rejection::InvalidSkillIndex {
                index: 4,
                available: 4
            })
        );
        assert!(!outcome.is_consumed());
        assert_eq!(fire, fire_before);
        assert_eq!(water, water_before);
        assert!(fx.log.is_empty());
    }

    #[test]
    fn unaffordable_skill_is_rejected() {
        let mut fx = Fixture::new();
        let mut fire = Archetype::Fire.build_default().unwrap();
        let mut water = Archetype::Water.build_default().unwrap();
        assert!(fire.use_resource(50));

        let outcome = fx.run(&mut fire, &mut water, 3);
        assert_eq!(
            outcome.rejection(),
            Some(Rejection::InsufficientResource {
                skill: Skill::Fireball,
                required: 20,
                available: 10
            })
        );
        assert_eq!(water.hp(), water.max_hp());
    }

    #[test]
    fn frozen_actor_skips_and_thaws() {
        let mut fx = Fixture::new();
        let mut fire = Archetype::Fire.build_default().unwrap();
        let mut water = Archetype::Water.build_default().unwrap();
        fire.add_effect(StatusEffect::freeze(1));

        let outcome = fx.run(&mut fire, &mut water, 0);
        assert!(outcome.is_consumed());
        assert!(matches!(outcome, ActionOutcome::Skipped(ref a) if a.kind == ActionKind::Frozen));
        assert_eq!(water.hp(), water.max_hp());
        assert!(!fire.has_effect(StatusEffectTag::Freeze));
    }

    #[test]
    fn burn_knockout_consumes_the_turn() {
        let mut fx = Fixture::new();
        let mut fire = Archetype::Fire.build_default().unwrap();
        let mut wind = Archetype::Wind.build_default().unwrap();
        wind.take_true_damage(wind.max_hp() - 3);
        wind.add_effect(StatusEffect::burn(5, 3));

        let outcome = fx.run(&mut wind, &mut fire, 0);
        assert_eq!(outcome.action().map(|a| a.kind), Some(ActionKind::Defeated));
        assert_eq!(fire.hp(), fire.max_hp());
        assert!(!wind.is_alive());
    }

    #[test]
    fn heal_reports_healing_and_no_combat_flags() {
        let mut fx = Fixture::new();
        let mut earth = Archetype::Earth.build_default().unwrap();
        let mut fire = Archetype::Fire.build_default().unwrap();
        earth.take_true_damage(40);

        let ActionOutcome::Executed(action) = fx.run(&mut earth, &mut fire, 2) else {
            panic!("heal should execute");
        };
        assert_eq!(action.healing, 30);
        assert_eq!(action.damage, 0);
        assert!(!action.critical);
        assert_eq!(action.effectiveness, 1.0);
        assert_eq!(fx.log.last(), Some(&action));
    }

    #[test]
    fn guard_decrements_at_end_of_own_turn() {
        let mut fx = Fixture::new();
        let mut earth = Archetype::Earth.build_default().unwrap();
        let mut fire = Archetype::Fire.build_default().unwrap();

        fx.run(&mut earth, &mut fire, 1);
        let guard = earth.effects().get(StatusEffectTag::Guard).unwrap();
        assert_eq!(guard.remaining(), fx.config.effects.guard_duration - 1);
    }
}
