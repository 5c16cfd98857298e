//! Battle participants.
//!
//! A [`Character`] owns its stats, resource pools, active status effects and
//! a fixed four-slot skill list. Every HP and resource change goes through the
//! operations here so the clamping invariants hold everywhere.

mod archetype;
mod stats;

pub use archetype::Archetype;
pub use stats::{CharacterSpec, CombatStats, StatBounds, StatKind, Vitals};

use tracing::debug;

use crate::combat::{Combatant, HitReport, mitigate, resolve_hit};
use crate::config::BattleConfig;
use crate::effect::{Attach, EffectTarget, StatusEffect, StatusEffectTag, StatusEffects};
use crate::element::Element;
use crate::error::CharacterError;
use crate::rng::BattleRng;
use crate::skill::Skill;

/// Fixed skill list, one per slot: attack, guard, heal, special.
pub type SkillSet = [Skill; BattleConfig::SKILL_SLOTS];

/// A battle participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Character {
    name: String,
    element: Element,
    stats: CombatStats,
    vitals: Vitals,
    effects: StatusEffects,
    skills: SkillSet,
}

impl Character {
    /// Validates the spec and builds a character with full HP and resource.
    ///
    /// Out-of-range parameters are rejected, never clamped.
    pub fn new(spec: CharacterSpec, skills: SkillSet) -> Result<Self, CharacterError> {
        spec.validate()?;

        Ok(Self {
            name: spec.name,
            element: spec.element,
            stats: CombatStats {
                attack: spec.attack,
                defense: spec.defense,
                speed: spec.speed,
            },
            vitals: Vitals::full(spec.max_hp, spec.max_resource),
            effects: StatusEffects::empty(),
            skills,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    pub fn attack(&self) -> u32 {
        self.stats.attack
    }

    pub fn defense(&self) -> u32 {
        self.stats.defense
    }

    pub fn speed(&self) -> u32 {
        self.stats.speed
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn hp(&self) -> u32 {
        self.vitals.hp()
    }

    pub fn max_hp(&self) -> u32 {
        self.vitals.max_hp()
    }

    pub fn resource(&self) -> u32 {
        self.vitals.resource()
    }

    pub fn max_resource(&self) -> u32 {
        self.vitals.max_resource()
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.hp() > 0
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    /// Skill in the given zero-based slot.
    pub fn skill(&self, index: usize) -> Option<Skill> {
        self.skills.get(index).copied()
    }

    pub fn effects(&self) -> &StatusEffects {
        &self.effects
    }

    pub fn has_effect(&self, tag: StatusEffectTag) -> bool {
        self.effects.has(tag)
    }

    /// False iff a movement-locking effect (Freeze) is active.
    pub fn can_act(&self) -> bool {
        !self.effects.locks_movement()
    }

    fn as_combatant(&self) -> Combatant {
        Combatant {
            element: self.element,
            speed: self.stats.speed,
            defense: self.stats.defense,
        }
    }

    // ========================================================================
    // HP operations
    // ========================================================================

    /// Defense-mitigated damage with no randomness. Returns HP lost.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        let damage = mitigate(raw as f64, self.stats.defense);
        self.vitals.lose_hp(damage)
    }

    /// Damage that bypasses defense entirely. Returns HP lost.
    pub fn take_true_damage(&mut self, amount: u32) -> u32 {
        self.vitals.lose_hp(amount)
    }

    /// Full combat formula: dodge → crit → element → defense → HP.
    ///
    /// The returned report describes this hit only.
    pub fn take_damage_with_mechanics(
        &mut self,
        raw: u32,
        attacker: &Character,
        rng: &mut impl BattleRng,
        config: &BattleConfig,
    ) -> HitReport {
        let report = resolve_hit(
            raw,
            &attacker.as_combatant(),
            &self.as_combatant(),
            rng,
            config,
        );
        self.vitals.lose_hp(report.damage);
        report
    }

    /// Restores HP up to max. Returns HP restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.vitals.restore_hp(amount)
    }

    // ========================================================================
    // Resource operations
    // ========================================================================

    /// The single resource gate: spends `amount` if available.
    ///
    /// Returns false without mutating anything otherwise.
    pub fn use_resource(&mut self, amount: u32) -> bool {
        self.vitals.spend(amount)
    }

    /// Restores resource up to max. Returns the amount restored.
    pub fn regen_resource(&mut self, amount: u32) -> u32 {
        self.vitals.regenerate(amount)
    }

    // ========================================================================
    // Status effect lifecycle
    // ========================================================================

    /// Attaches an effect, running its `apply` hook if it is new.
    pub fn add_effect(&mut self, effect: StatusEffect) -> Attach {
        let mut target = EffectTarget::new(&mut self.stats, &mut self.vitals);
        let outcome = self.effects.attach(effect, &mut target);
        debug!(
            owner = %self.name,
            effect = %effect.tag(),
            duration = effect.remaining(),
            ?outcome,
            "status effect attached"
        );
        outcome
    }

    /// Start-of-turn hooks for this character's effects. Returns true damage taken.
    pub fn tick_effects(&mut self) -> u32 {
        let mut target = EffectTarget::new(&mut self.stats, &mut self.vitals);
        let damage = self.effects.tick_all(&mut target);
        if damage > 0 {
            debug!(owner = %self.name, damage, hp = self.vitals.hp(), "status effects ticked");
        }
        damage
    }

    /// End-of-turn decrement; expired effects are removed and returned.
    pub fn decrement_effects(&mut self) -> Vec<StatusEffect> {
        let mut target = EffectTarget::new(&mut self.stats, &mut self.vitals);
        let expired = self.effects.decrement_all(&mut target);
        for effect in &expired {
            debug!(owner = %self.name, effect = %effect.tag(), "status effect expired");
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRolls;

    fn fighter(name: &str, element: Element) -> Character {
        Character::new(
            CharacterSpec {
                name: name.to_string(),
                element,
                max_hp: 100,
                attack: 30,
                defense: 10,
                speed: 20,
                max_resource: 40,
            },
            Skill::loadout(Skill::RockThrow),
        )
        .unwrap()
    }

    #[test]
    fn construction_rejects_invalid_spec() {
        let result = Character::new(
            CharacterSpec {
                name: String::new(),
                element: Element::Fire,
                max_hp: 10,
                attack: 1,
                defense: 1,
                speed: 1,
                max_resource: 1,
            },
            Skill::loadout(Skill::Fireball),
        );
        assert_eq!(result, Err(CharacterError::EmptyName));
    }

    #[test]
    fn take_damage_subtracts_defense_and_clamps() {
        let mut target = fighter("Target", Element::Neutral);
        assert_eq!(target.take_damage(25), 15);
        assert_eq!(target.hp(), 85);
        assert_eq!(target.take_damage(5), 0);
        assert_eq!(target.take_damage(500), 85);
        assert_eq!(target.hp(), 0);
        assert!(!target.is_alive());
    }

    #[test]
    fn true_damage_ignores_defense() {
        let mut target = fighter("Target", Element::Neutral);
        assert_eq!(target.take_true_damage(5), 5);
        assert_eq!(target.hp(), 95);
    }

    #[test]
    fn mechanics_never_drop_hp_below_zero() {
        let attacker = fighter("Attacker", Element::Water);
        let mut target = fighter("Target", Element::Fire);
        target.take_true_damage(99);
        let mut rng = ScriptedRolls::new().with_rolls([99.0, 0.0]);
        let report =
            target.take_damage_with_mechanics(200, &attacker, &mut rng, &BattleConfig::default());
        assert!(report.critical);
        assert!(report.damage > 1);
        assert_eq!(target.hp(), 0);
    }

    #[test]
    fn heal_never_exceeds_max() {
        let mut target = fighter("Target", Element::Neutral);
        target.take_true_damage(10);
        assert_eq!(target.heal(30), 10);
        assert_eq!(target.hp(), target.max_hp());
    }

    #[test]
    fn resource_gate_does_not_mutate_on_failure() {
        let mut character = fighter("Caster", Element::Neutral);
        assert!(!character.use_resource(41));
        assert_eq!(character.resource(), 40);
        assert!(character.use_resource(0));
        assert!(character.use_resource(40));
        assert_eq!(character.resource(), 0);
        assert_eq!(character.regen_resource(50), 40);
    }

    #[test]
    fn freeze_blocks_action_until_expired() {
        let mut character = fighter("Frozen", Element::Neutral);
        character.add_effect(StatusEffect::freeze(1));
        assert!(!character.can_act());
        let expired = character.decrement_effects();
        assert_eq!(expired.len(), 1);
        assert!(character.can_act());
    }

    #[test]
    fn guard_restores_defense_after_expiry() {
        let mut character = fighter("Guard", Element::Neutral);
        character.add_effect(StatusEffect::guard(50, 2));
        assert_eq!(character.defense(), 15);
        character.decrement_effects();
        assert_eq!(character.defense(), 15);
        character.decrement_effects();
        assert_eq!(character.defense(), 10);
        assert!(!character.has_effect(StatusEffectTag::Guard));
    }
}
