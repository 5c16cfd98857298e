//! Status effect system for characters.
//!
//! Status effects are timed conditions attached to a character (the owner).
//!
//! # Lifecycle
//!
//! ```text
//! attach ──► apply (once) ──► tick (each owner turn start)
//!                                   │
//!                      decrement (each owner turn end)
//!                                   │
//!                        remaining <= 0 ──► remove (once) ──► evicted
//! ```
//!
//! Durations count the owner's own turns only. An effect whose `apply`
//! changed a stat records the exact delta so `remove` can undo it even if the
//! stat moved in between.

mod set;

pub use set::{Attach, StatusEffects};

use strum::Display;

use crate::character::{CombatStats, Vitals};
use crate::config::EffectTable;

/// Mutable view of the owner handed to effect hooks.
///
/// Borrowing stats and vitals separately keeps the owner's effect list
/// free for iteration while hooks run.
pub struct EffectTarget<'a> {
    pub stats: &'a mut CombatStats,
    pub vitals: &'a mut Vitals,
}

impl<'a> EffectTarget<'a> {
    pub fn new(stats: &'a mut CombatStats, vitals: &'a mut Vitals) -> Self {
        Self { stats, vitals }
    }
}

/// Discriminant of a status effect, used for lookups and refresh matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectTag {
    Burn,
    Freeze,
    Guard,
    #[strum(serialize = "Attack Up")]
    AttackBuff,
}

/// Concrete status effects and their owner-specific magnitudes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// True damage at the start of each owner turn.
    Burn { damage: u32 },

    /// Owner cannot act.
    Freeze,

    /// Defense raised by `percent` of the defense at application time.
    /// `applied` is the absolute delta granted, fixed by `apply`.
    Guard { percent: u32, applied: u32 },

    /// Attack raised by a flat bonus.
    AttackBuff { bonus: u32 },
}

impl StatusEffectKind {
    pub const fn tag(&self) -> StatusEffectTag {
        match self {
            StatusEffectKind::Burn { .. } => StatusEffectTag::Burn,
            StatusEffectKind::Freeze => StatusEffectTag::Freeze,
            StatusEffectKind::Guard { .. } => StatusEffectTag::Guard,
            StatusEffectKind::AttackBuff { .. } => StatusEffectTag::AttackBuff,
        }
    }
}

/// A single status effect with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    kind: StatusEffectKind,
    remaining: i32,
}

impl StatusEffect {
    pub const fn new(kind: StatusEffectKind, duration: i32) -> Self {
        Self {
            kind,
            remaining: duration,
        }
    }

    pub const fn burn(damage: u32, duration: i32) -> Self {
        Self::new(StatusEffectKind::Burn { damage }, duration)
    }

    pub const fn freeze(duration: i32) -> Self {
        Self::new(StatusEffectKind::Freeze, duration)
    }

    pub const fn guard(percent: u32, duration: i32) -> Self {
        Self::new(StatusEffectKind::Guard { percent, applied: 0 }, duration)
    }

    pub const fn attack_buff(bonus: u32, duration: i32) -> Self {
        Self::new(StatusEffectKind::AttackBuff { bonus }, duration)
    }

    /// Builds an effect of the given kind from the balance table.
    pub const fn from_table(tag: StatusEffectTag, table: &EffectTable) -> Self {
        match tag {
            StatusEffectTag::Burn => Self::burn(table.burn_damage, table.burn_duration),
            StatusEffectTag::Freeze => Self::freeze(table.freeze_duration),
            StatusEffectTag::Guard => Self::guard(table.guard_percent, table.guard_duration),
            StatusEffectTag::AttackBuff => {
                Self::attack_buff(table.attack_buff_bonus, table.attack_buff_duration)
            }
        }
    }

    pub const fn kind(&self) -> StatusEffectKind {
        self.kind
    }

    pub const fn tag(&self) -> StatusEffectTag {
        self.kind.tag()
    }

    pub fn name(&self) -> String {
        self.tag().to_string()
    }

    /// Turns left before the effect expires.
    pub const fn remaining(&self) -> i32 {
        self.remaining
    }

    pub const fn is_expired(&self) -> bool {
        self.remaining <= 0
    }

    pub const fn is_debuff(&self) -> bool {
        matches!(
            self.kind,
            StatusEffectKind::Burn { .. } | StatusEffectKind::Freeze
        )
    }

    /// Returns true if the owner cannot act while this effect is active.
    pub const fn locks_movement(&self) -> bool {
        matches!(self.kind, StatusEffectKind::Freeze) && !self.is_expired()
    }

    /// One-time side effect when attached to the owner.
    pub fn apply(&mut self, target: &mut EffectTarget<'_>) {
        match &mut self.kind {
            StatusEffectKind::Guard { percent, applied } => {
                let delta = target.stats.defense.saturating_mul(*percent) / 100;
                target.stats.defense = target.stats.defense.saturating_add(delta);
                *applied = delta;
            }
            StatusEffectKind::AttackBuff { bonus } => {
                target.stats.attack = target.stats.attack.saturating_add(*bonus);
            }
            StatusEffectKind::Burn { .. } | StatusEffectKind::Freeze => {}
        }
    }

    /// Start-of-turn hook. Returns the true damage dealt to the owner.
    pub fn tick(&self, target: &mut EffectTarget<'_>) -> u32 {
        match self.kind {
            StatusEffectKind::Burn { damage } => target.vitals.lose_hp(damage),
            StatusEffectKind::Freeze
            | StatusEffectKind::Guard { .. }
            | StatusEffectKind::AttackBuff { .. } => 0,
        }
    }

    /// End-of-turn hook. Returns true once the effect has expired.
    pub fn decrement(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.is_expired()
    }

    /// Inverse of [`StatusEffect::apply`], invoked once on expiry.
    pub fn remove(&self, target: &mut EffectTarget<'_>) {
        match self.kind {
            StatusEffectKind::Guard { applied, .. } => {
                target.stats.defense = target.stats.defense.saturating_sub(applied);
            }
            StatusEffectKind::AttackBuff { bonus } => {
                target.stats.attack = target.stats.attack.saturating_sub(bonus);
            }
            StatusEffectKind::Burn { .. } | StatusEffectKind::Freeze => {}
        }
    }

    /// Merges a re-application of the same kind into this effect.
    ///
    /// Duration and burn damage take the larger value. Stat deltas are left
    /// untouched so `remove` undoes exactly what `apply` granted.
    pub(crate) fn refresh(&mut self, incoming: &StatusEffect) {
        debug_assert_eq!(self.tag(), incoming.tag());
        self.remaining = self.remaining.max(incoming.remaining);
        if let (
            StatusEffectKind::Burn { damage },
            StatusEffectKind::Burn {
                damage: incoming_damage,
            },
        ) = (&mut self.kind, incoming.kind)
        {
            *damage = (*damage).max(incoming_damage);
        }
    }
}
