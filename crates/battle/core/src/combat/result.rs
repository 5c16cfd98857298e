//! Hit resolution and its report.

use tracing::trace;

use crate::config::BattleConfig;
use crate::element::{Effectiveness, Element};
use crate::rng::BattleRng;

use super::damage::mitigate;
use super::hit::{crit_chance, dodge_chance};

/// The stats of one side that matter for a single hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub element: Element,
    pub speed: u32,
    pub defense: u32,
}

/// Outcome of one damaging hit.
///
/// Returned by value from every hit; never stored on a character, so an
/// unrelated later action can never observe it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitReport {
    /// The defender evaded; nothing else was rolled or applied.
    pub dodged: bool,
    pub critical: bool,
    /// Elemental multiplier applied (1.0 when dodged).
    pub effectiveness: f64,
    /// Damage after defense, before clamping to the defender's HP.
    pub damage: u32,
}

impl HitReport {
    /// Report for actions that did not hit anything.
    pub const NONE: HitReport = HitReport {
        dodged: false,
        critical: false,
        effectiveness: 1.0,
        damage: 0,
    };

    pub const DODGED: HitReport = HitReport {
        dodged: true,
        ..HitReport::NONE
    };
}

impl Default for HitReport {
    fn default() -> Self {
        Self::NONE
    }
}

/// Resolves a damaging hit without applying it.
///
/// Steps, each able to short-circuit the rest:
///
/// 1. Dodge roll (first draw)
/// 2. Crit roll (second draw), damage × crit multiplier
/// 3. Elemental multiplier
/// 4. Defense subtraction, floored at 0
pub fn resolve_hit(
    raw_damage: u32,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut impl BattleRng,
    config: &BattleConfig,
) -> HitReport {
    let mechanics = &config.mechanics;

    // 1. Dodge
    let dodge = dodge_chance(defender.speed, attacker.speed, mechanics);
    let dodge_roll = rng.roll_percent();
    trace!(dodge, dodge_roll, "dodge check");
    if dodge_roll < dodge {
        return HitReport::DODGED;
    }

    // 2. Critical
    let crit = crit_chance(attacker.speed, mechanics);
    let crit_roll = rng.roll_percent();
    let critical = crit_roll < crit;
    trace!(crit, crit_roll, critical, "crit check");

    let mut damage = raw_damage as f64;
    if critical {
        damage *= mechanics.crit_multiplier;
    }

    // 3. Elemental multiplier
    let effectiveness =
        Effectiveness::classify(attacker.element, defender.element).multiplier(&config.elements);
    damage *= effectiveness;

    // 4. Defense
    let damage_after_defense = mitigate(damage, defender.defense);
    trace!(
        raw_damage,
        scaled = damage,
        defense = defender.defense,
        final_damage = damage_after_defense,
        "damage formula"
    );

    HitReport {
        dodged: false,
        critical,
        effectiveness,
        damage: damage_after_defense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRolls;

    fn fire() -> Combatant {
        Combatant {
            element: Element::Fire,
            speed: 25,
            defense: 15,
        }
    }

    fn water() -> Combatant {
        Combatant {
            element: Element::Water,
            speed: 20,
            defense: 22,
        }
    }

    #[test]
    fn disadvantaged_hit_without_crit() {
        let mut rng = ScriptedRolls::new();
        let report = resolve_hit(32, &fire(), &water(), &mut rng, &BattleConfig::default());
        assert!(!report.dodged);
        assert!(!report.critical);
        assert_eq!(report.effectiveness, 0.75);
        assert_eq!(report.damage, 2);
    }

    #[test]
    fn critical_advantaged_hit() {
        // Water hits Fire: no dodge (Fire is faster, but 99 >= 5), crit roll 0.
        let mut rng = ScriptedRolls::new().with_rolls([99.0, 0.0]);
        let report = resolve_hit(30, &water(), &fire(), &mut rng, &BattleConfig::default());
        assert!(report.critical);
        assert_eq!(report.effectiveness, 1.5);
        // 30 × 1.5 × 1.5 = 67.5 → 67 - 15 = 52
        assert_eq!(report.damage, 52);
    }

    #[test]
    fn dodge_short_circuits_crit_roll() {
        // Fire (speed 25) attacked by Water (speed 20): 5% dodge.
        let mut rng = ScriptedRolls::new().with_rolls([1.0, 0.0]);
        let report = resolve_hit(30, &water(), &fire(), &mut rng, &BattleConfig::default());
        assert_eq!(report, HitReport::DODGED);
        assert_eq!(rng.remaining_rolls(), 1);
    }

    #[test]
    fn slower_defender_cannot_dodge() {
        let mut rng = ScriptedRolls::new().with_rolls([0.0, 99.0]);
        let report = resolve_hit(32, &fire(), &water(), &mut rng, &BattleConfig::default());
        assert!(!report.dodged);
    }
}
