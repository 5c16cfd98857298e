//! Dodge and critical hit chance calculations.

use crate::config::MechanicsTable;

/// Chance (percent) that the defender dodges.
///
/// # Formula
///
/// ```text
/// dodge = (defender_speed - attacker_speed) / speed_divisor * 100
/// clamped to [0, max_dodge_chance]
/// ```
///
/// A slower defender never dodges.
pub fn dodge_chance(defender_speed: u32, attacker_speed: u32, table: &MechanicsTable) -> f64 {
    let diff = defender_speed as f64 - attacker_speed as f64;
    let chance = diff * 100.0 / table.speed_divisor as f64;
    chance.clamp(0.0, table.max_dodge_chance)
}

/// Chance (percent) that the attacker lands a critical hit.
///
/// # Formula
///
/// ```text
/// crit = base_crit_chance + attacker_speed / crit_speed_divisor
/// clamped to [0, max_crit_chance]
/// ```
pub fn crit_chance(attacker_speed: u32, table: &MechanicsTable) -> f64 {
    let chance = table.base_crit_chance + attacker_speed as f64 / table.crit_speed_divisor as f64;
    chance.clamp(0.0, table.max_crit_chance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dodge_scales_with_speed_gap() {
        let table = MechanicsTable::default();
        assert_eq!(dodge_chance(35, 25, &table), 10.0);
        assert_eq!(dodge_chance(20, 25, &table), 0.0);
        assert_eq!(dodge_chance(999, 0, &table), table.max_dodge_chance);
    }

    #[test]
    fn crit_has_base_and_cap() {
        let table = MechanicsTable::default();
        assert_eq!(crit_chance(0, &table), 5.0);
        assert_eq!(crit_chance(25, &table), 7.5);
        assert_eq!(crit_chance(999, &table), table.max_crit_chance);
    }
}
