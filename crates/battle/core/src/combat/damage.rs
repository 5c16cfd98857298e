//! Damage mitigation.

/// Subtracts defense from (possibly fractional) damage.
///
/// # Formula
///
/// ```text
/// final = max(0, trunc(damage) - defense)
/// ```
///
/// Multipliers are applied before truncation, so `32 × 0.75 = 24.0` against
/// defense 22 yields 2.
pub fn mitigate(damage: f64, defense: u32) -> u32 {
    let truncated = if damage.is_finite() && damage > 0.0 {
        damage.trunc() as u32
    } else {
        0
    };
    truncated.saturating_sub(defense)
}
