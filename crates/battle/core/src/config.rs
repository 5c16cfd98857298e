//! Battle configuration constants and tunable balance tables.
//!
//! Every number the resolver uses lives here so a front end can load a
//! different balance without touching the engine. [`BattleConfig::default`]
//! is the reference balance.

use crate::error::ConfigError;
use crate::skill::Skill;

/// Balance parameters for a battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Elemental advantage/disadvantage multipliers.
    pub elements: ElementTable,

    /// Dodge and critical hit parameters.
    pub mechanics: MechanicsTable,

    /// Per-skill cost and power.
    pub skills: SkillTable,

    /// Status effect magnitudes and durations.
    pub effects: EffectTable,

    /// Resource points restored to both characters once per full turn cycle.
    pub regen_per_cycle: u32,

    /// Maximum number of entries retained by the battle log.
    pub log_capacity: usize,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Fixed number of skill slots per character.
    pub const SKILL_SLOTS: usize = 4;
    /// Maximum number of simultaneously active status effects per character.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REGEN_PER_CYCLE: u32 = 10;
    pub const DEFAULT_LOG_CAPACITY: usize = 200;

    pub fn new() -> Self {
        Self {
            elements: ElementTable::default(),
            mechanics: MechanicsTable::default(),
            skills: SkillTable::default(),
            effects: EffectTable::default(),
            regen_per_cycle: Self::DEFAULT_REGEN_PER_CYCLE,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
        }
    }

    /// Looks up the profile of a skill.
    pub fn skill_profile(&self, skill: Skill) -> SkillProfile {
        self.skills.profile(skill)
    }

    /// Checks the balance tables for values the resolver cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let elements = &self.elements;
        if !(elements.advantage > 1.0) {
            return Err(ConfigError::AdvantageNotAboveOne(elements.advantage));
        }
        if !(elements.disadvantage > 0.0 && elements.disadvantage < 1.0) {
            return Err(ConfigError::DisadvantageOutOfRange(elements.disadvantage));
        }

        let mechanics = &self.mechanics;
        if mechanics.speed_divisor == 0 {
            return Err(ConfigError::ZeroDivisor("speed_divisor"));
        }
        if mechanics.crit_speed_divisor == 0 {
            return Err(ConfigError::ZeroDivisor("crit_speed_divisor"));
        }
        if !(mechanics.crit_multiplier >= 1.0) {
            return Err(ConfigError::CritMultiplierBelowOne(mechanics.crit_multiplier));
        }
        for (name, value) in [
            ("max_dodge_chance", mechanics.max_dodge_chance),
            ("base_crit_chance", mechanics.base_crit_chance),
            ("max_crit_chance", mechanics.max_crit_chance),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ChanceOutOfRange { name, value });
            }
        }

        let effects = &self.effects;
        for (name, value) in [
            ("burn_duration", effects.burn_duration),
            ("freeze_duration", effects.freeze_duration),
            ("guard_duration", effects.guard_duration),
            ("attack_buff_duration", effects.attack_buff_duration),
        ] {
            if value < 1 {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }

        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }

        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Elemental damage multipliers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementTable {
    /// Multiplier when the attacker is strong against the defender.
    pub advantage: f64,
    /// Multiplier when the defender is strong against the attacker.
    pub disadvantage: f64,
}

impl Default for ElementTable {
    fn default() -> Self {
        Self {
            advantage: 1.5,
            disadvantage: 0.75,
        }
    }
}

/// Dodge and critical hit parameters.
///
/// ```text
/// dodge% = clamp((def_speed - atk_speed) / speed_divisor * 100, 0, max_dodge_chance)
/// crit%  = clamp(base_crit_chance + atk_speed / crit_speed_divisor, 0, max_crit_chance)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MechanicsTable {
    pub speed_divisor: u32,
    pub max_dodge_chance: f64,
    pub base_crit_chance: f64,
    pub crit_speed_divisor: u32,
    pub max_crit_chance: f64,
    pub crit_multiplier: f64,
}

impl Default for MechanicsTable {
    fn default() -> Self {
        Self {
            speed_divisor: 100,
            max_dodge_chance: 20.0,
            base_crit_chance: 5.0,
            crit_speed_divisor: 10,
            max_crit_chance: 20.0,
            crit_multiplier: 1.5,
        }
    }
}

/// Cost and power of a single skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillProfile {
    /// Resource points consumed on use.
    pub cost: u32,
    /// Raw damage as a percentage of the actor's attack (0 for non-damaging skills).
    pub power_percent: u32,
    /// HP restored to the actor.
    pub heal: u32,
}

impl SkillProfile {
    pub const fn new(cost: u32, power_percent: u32, heal: u32) -> Self {
        Self {
            cost,
            power_percent,
            heal,
        }
    }

    /// Raw damage for an actor with the given attack.
    pub fn raw_damage(&self, attack: u32) -> u32 {
        attack.saturating_mul(self.power_percent) / 100
    }
}

impl Default for SkillProfile {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Skill profiles, one per skill.
///
/// When deserialized, each present table is merged field by field over that
/// skill's reference profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "SkillTablePatch"))]
pub struct SkillTable {
    pub attack: SkillProfile,
    pub guard: SkillProfile,
    pub heal: SkillProfile,
    pub fireball: SkillProfile,
    pub ice_blast: SkillProfile,
    pub rock_throw: SkillProfile,
    pub air_slash: SkillProfile,
}

impl SkillTable {
    pub fn profile(&self, skill: Skill) -> SkillProfile {
        match skill {
            Skill::Attack => self.attack,
            Skill::Guard => self.guard,
            Skill::Heal => self.heal,
            Skill::Fireball => self.fireball,
            Skill::IceBlast => self.ice_blast,
            Skill::RockThrow => self.rock_throw,
            Skill::AirSlash => self.air_slash,
        }
    }
}

impl Default for SkillTable {
    fn default() -> Self {
        Self {
            attack: SkillProfile::new(0, 100, 0),
            guard: SkillProfile::new(5, 0, 0),
            heal: SkillProfile::new(15, 0, 30),
            fireball: SkillProfile::new(20, 150, 0),
            ice_blast: SkillProfile::new(20, 130, 0),
            rock_throw: SkillProfile::new(15, 140, 0),
            air_slash: SkillProfile::new(15, 135, 0),
        }
    }
}

/// Partial skill profile as written in a balance file.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SkillProfilePatch {
    cost: Option<u32>,
    power_percent: Option<u32>,
    heal: Option<u32>,
}

#[cfg(feature = "serde")]
impl SkillProfilePatch {
    fn over(self, base: SkillProfile) -> SkillProfile {
        SkillProfile {
            cost: self.cost.unwrap_or(base.cost),
            power_percent: self.power_percent.unwrap_or(base.power_percent),
            heal: self.heal.unwrap_or(base.heal),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SkillTablePatch {
    attack: SkillProfilePatch,
    guard: SkillProfilePatch,
    heal: SkillProfilePatch,
    fireball: SkillProfilePatch,
    ice_blast: SkillProfilePatch,
    rock_throw: SkillProfilePatch,
    air_slash: SkillProfilePatch,
}

#[cfg(feature = "serde")]
impl From<SkillTablePatch> for SkillTable {
    fn from(patch: SkillTablePatch) -> Self {
        let base = SkillTable::default();
        Self {
            attack: patch.attack.over(base.attack),
            guard: patch.guard.over(base.guard),
            heal: patch.heal.over(base.heal),
            fireball: patch.fireball.over(base.fireball),
            ice_blast: patch.ice_blast.over(base.ice_blast),
            rock_throw: patch.rock_throw.over(base.rock_throw),
            air_slash: patch.air_slash.over(base.air_slash),
        }
    }
}

/// Status effect magnitudes and durations (in the owner's turns).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectTable {
    pub burn_damage: u32,
    pub burn_duration: i32,
    pub freeze_duration: i32,
    /// Defense bonus as a percentage of the owner's defense when Guard is applied.
    pub guard_percent: u32,
    pub guard_duration: i32,
    pub attack_buff_bonus: u32,
    pub attack_buff_duration: i32,
}

impl Default for EffectTable {
    fn default() -> Self {
        Self {
            burn_damage: 5,
            burn_duration: 3,
            freeze_duration: 1,
            guard_percent: 50,
            guard_duration: 2,
            attack_buff_bonus: 10,
            attack_buff_duration: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_balance_is_valid() {
        assert_eq!(BattleConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_advantage_not_above_one() {
        let mut config = BattleConfig::default();
        config.elements.advantage = 1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::AdvantageNotAboveOne(1.0))
        );
    }

    #[test]
    fn rejects_disadvantage_outside_unit_interval() {
        let mut config = BattleConfig::default();
        config.elements.disadvantage = 1.2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DisadvantageOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_zero_divisors_and_capacity() {
        let mut config = BattleConfig::default();
        config.mechanics.speed_divisor = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDivisor("speed_divisor"))
        );

        let mut config = BattleConfig::default();
        config.log_capacity = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroLogCapacity));
    }

    #[test]
    fn rejects_durations_below_one_turn() {
        let mut config = BattleConfig::default();
        config.effects.freeze_duration = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDuration {
                name: "freeze_duration",
                value: 0
            })
        );

        let mut config = BattleConfig::default();
        config.effects.burn_duration = i32::MIN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveDuration {
                name: "burn_duration",
                ..
            })
        ));
    }

    #[test]
    fn raw_damage_scales_attack_by_power() {
        let profile = SkillProfile::new(20, 150, 0);
        assert_eq!(profile.raw_damage(32), 48);
        assert_eq!(SkillProfile::new(0, 100, 0).raw_damage(32), 32);
    }
}
