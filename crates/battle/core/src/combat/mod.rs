//! Combat resolution system.
//!
//! Pure functions for resolving a single damaging hit. Nothing here mutates a
//! character; [`crate::Character::take_damage_with_mechanics`] applies the
//! resulting [`HitReport`].
//!
//! # Core Functions
//!
//! - `resolve_hit`: dodge check → crit check → elemental multiplier → defense
//! - `dodge_chance` / `crit_chance`: percentage formulas
//! - `mitigate`: defense subtraction with integer truncation

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::mitigate;
pub use hit::{crit_chance, dodge_chance};
pub use result::{Combatant, HitReport, resolve_hit};
