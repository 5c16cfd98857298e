//! Bounded list of a character's active status effects.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

use super::{EffectTarget, StatusEffect, StatusEffectTag};

/// Active status effects on a character, in attachment order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

/// Result of attaching an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attach {
    /// New effect; its `apply` hook has run.
    Applied,
    /// An effect of the same kind was already active and was refreshed.
    Refreshed,
    /// No room left; the effect was dropped.
    Dropped,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if an effect of the given kind is active.
    pub fn has(&self, tag: StatusEffectTag) -> bool {
        self.effects.iter().any(|e| e.tag() == tag)
    }

    pub fn get(&self, tag: StatusEffectTag) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.tag() == tag)
    }

    /// Attaches an effect, running `apply` for new ones.
    ///
    /// Re-attaching an active kind refreshes it instead of stacking.
    pub fn attach(&mut self, mut effect: StatusEffect, target: &mut EffectTarget<'_>) -> Attach {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.tag() == effect.tag()) {
            existing.refresh(&effect);
            return Attach::Refreshed;
        }

        if self.effects.is_full() {
            return Attach::Dropped;
        }

        effect.apply(target);
        self.effects.push(effect);
        Attach::Applied
    }

    /// Runs every `tick` hook. Returns total true damage dealt to the owner.
    pub fn tick_all(&self, target: &mut EffectTarget<'_>) -> u32 {
        self.effects
            .iter()
            .map(|effect| effect.tick(target))
            .fold(0u32, u32::saturating_add)
    }

    /// Decrements every duration; expired effects run `remove` and are evicted.
    ///
    /// Returns the evicted effects in attachment order.
    pub fn decrement_all(&mut self, target: &mut EffectTarget<'_>) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        self.effects.retain(|effect| {
            if effect.decrement() {
                effect.remove(target);
                expired.push(*effect);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Returns true if any active effect prevents the owner from acting.
    pub fn locks_movement(&self) -> bool {
        self.effects.iter().any(StatusEffect::locks_movement)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{CombatStats, Vitals};

    #[test]
    fn refresh_does_not_reapply_guard() {
        let mut stats = CombatStats {
            attack: 10,
            defense: 20,
            speed: 10,
        };
        let mut vitals = Vitals::full(50, 10);
        let mut set = StatusEffects::empty();

        let mut target = EffectTarget::new(&mut stats, &mut vitals);
        assert_eq!(set.attach(StatusEffect::guard(50, 2), &mut target), Attach::Applied);
        assert_eq!(set.attach(StatusEffect::guard(50, 2), &mut target), Attach::Refreshed);
        assert_eq!(set.len(), 1);
        assert_eq!(stats.defense, 30);
    }

    #[test]
    fn decrement_removes_each_expired_effect_once() {
        let mut stats = CombatStats {
            attack: 10,
            defense: 20,
            speed: 10,
        };
        let mut vitals = Vitals::full(50, 10);
        let mut set = StatusEffects::empty();
        let mut target = EffectTarget::new(&mut stats, &mut vitals);

        set.attach(StatusEffect::guard(50, 1), &mut target);
        set.attach(StatusEffect::burn(5, 2), &mut target);

        let expired = set.decrement_all(&mut target);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].tag(), StatusEffectTag::Guard);
        assert!(!set.has(StatusEffectTag::Guard));
        assert!(set.has(StatusEffectTag::Burn));

        let expired = set.decrement_all(&mut target);
        assert_eq!(expired[0].tag(), StatusEffectTag::Burn);
        assert!(set.is_empty());
        assert_eq!(stats.defense, 20);
    }

    #[test]
    fn freeze_locks_movement_until_evicted() {
        let mut stats = CombatStats::default();
        let mut vitals = Vitals::full(50, 10);
        let mut set = StatusEffects::empty();
        let mut target = EffectTarget::new(&mut stats, &mut vitals);

        set.attach(StatusEffect::freeze(1), &mut target);
        assert!(set.locks_movement());
        set.decrement_all(&mut target);
        assert!(!set.locks_movement());
    }
}
