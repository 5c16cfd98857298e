//! Deterministic two-combatant battle rules.
//!
//! `battle-core` defines characters, elemental damage, skills, status effects,
//! turn order and victory, and exposes them through [`Battle`]. All randomness
//! comes from an injected [`BattleRng`], so a battle replays exactly given the
//! same source and the same choices. Front ends (console, GUI, automated
//! agents) only read state and call the operations on [`Battle`].
pub mod battle;
pub mod character;
pub mod combat;
pub mod config;
pub mod effect;
pub mod element;
pub mod error;
pub mod log;
pub mod resolver;
pub mod rng;
pub mod skill;
pub mod turn;
pub mod victory;

pub use battle::{Battle, SkillChoice};
pub use character::{
    Archetype, Character, CharacterSpec, CombatStats, SkillSet, StatBounds, StatKind, Vitals,
};
pub use combat::{Combatant, HitReport, crit_chance, dodge_chance, mitigate, resolve_hit};
pub use config::{BattleConfig, EffectTable, ElementTable, MechanicsTable, SkillProfile, SkillTable};
pub use effect::{Attach, EffectTarget, StatusEffect, StatusEffectKind, StatusEffectTag, StatusEffects};
pub use element::{Effectiveness, Element};
pub use error::{BattleError, CharacterError, ConfigError, EngineError, ErrorSeverity};
pub use log::{ActionKind, BattleAction, BattleLog, HpDeltas};
pub use resolver::{ActionOutcome, CombatResolver, Rejection};
pub use rng::{BattleRng, RngRolls, ScriptedRolls};
pub use skill::{Skill, SkillOutcome};
pub use turn::{BattleState, Side, TurnManager, TurnSwitch};
pub use victory::VictoryConditionChecker;
