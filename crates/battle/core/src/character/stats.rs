//! Character stats, resource pools and construction bounds.
//!
//! Stats are split in two so status effects can borrow them independently of
//! the effect list that owns them:
//! - [`CombatStats`]: attack/defense/speed, modified in place by buffs.
//! - [`Vitals`]: current and maximum HP and resource points.

use strum::Display;

use crate::element::Element;
use crate::error::CharacterError;

/// Inclusive bounds for a construction parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: u32,
    pub max: u32,
}

impl StatBounds {
    pub const STAT: StatBounds = StatBounds { min: 0, max: 999 };
    pub const MAX_HP: StatBounds = StatBounds { min: 1, max: 999 };
    pub const MAX_NAME_LEN: usize = 50;

    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Identifies a stat in validation errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    MaxHp,
    Attack,
    Defense,
    Speed,
    MaxResource,
}

impl StatKind {
    pub const fn bounds(self) -> StatBounds {
        match self {
            StatKind::MaxHp => StatBounds::MAX_HP,
            _ => StatBounds::STAT,
        }
    }
}

/// Construction parameters for a character.
///
/// Passed to [`crate::Character::new`], which validates every field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSpec {
    pub name: String,
    pub element: Element,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub max_resource: u32,
}

impl CharacterSpec {
    pub fn validate(&self) -> Result<(), CharacterError> {
        let name_len = self.name.chars().count();
        if self.name.trim().is_empty() {
            return Err(CharacterError::EmptyName);
        }
        if name_len > StatBounds::MAX_NAME_LEN {
            return Err(CharacterError::NameTooLong {
                len: name_len,
                max: StatBounds::MAX_NAME_LEN,
            });
        }

        for (stat, value) in [
            (StatKind::MaxHp, self.max_hp),
            (StatKind::Attack, self.attack),
            (StatKind::Defense, self.defense),
            (StatKind::Speed, self.speed),
            (StatKind::MaxResource, self.max_resource),
        ] {
            let bounds = stat.bounds();
            if !bounds.contains(value) {
                return Err(CharacterError::StatOutOfRange {
                    stat,
                    value,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }

        Ok(())
    }
}

/// Offensive and defensive stats, mutable by status effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

/// HP and resource pools.
///
/// Invariants: `hp <= max_hp` and `resource <= max_resource` after every
/// operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    hp: u32,
    max_hp: u32,
    resource: u32,
    max_resource: u32,
}

impl Vitals {
    /// Pools start full.
    pub const fn full(max_hp: u32, max_resource: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            resource: max_resource,
            max_resource,
        }
    }

    pub const fn hp(&self) -> u32 {
        self.hp
    }

    pub const fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub const fn resource(&self) -> u32 {
        self.resource
    }

    pub const fn max_resource(&self) -> u32 {
        self.max_resource
    }

    /// Removes HP, clamped at 0. Returns the HP actually lost.
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores HP, clamped at max. Returns the HP actually restored.
    pub fn restore_hp(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }

    /// Spends resource points if enough are available.
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.resource < amount {
            return false;
        }
        self.resource -= amount;
        true
    }

    /// Restores resource points, clamped at max. Returns the amount restored.
    pub fn regenerate(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_resource - self.resource);
        self.resource += restored;
        restored
    }
}
