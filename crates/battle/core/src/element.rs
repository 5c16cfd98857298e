//! Elements and the elemental advantage cycle.
//!
//! ```text
//! Fire -> Wind -> Earth -> Water -> Fire
//! ```
//!
//! Each element is strong against the next one in the cycle. Neutral has no
//! relation to anything.

use strum::{Display, EnumIter};

use crate::config::ElementTable;

/// Elemental affinity of a character (and of the damage it deals).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Fire,
    Water,
    Earth,
    Wind,
    Neutral,
}

impl Element {
    /// The element this one is strong against, if any.
    pub const fn strong_against(self) -> Option<Element> {
        match self {
            Element::Fire => Some(Element::Wind),
            Element::Wind => Some(Element::Earth),
            Element::Earth => Some(Element::Water),
            Element::Water => Some(Element::Fire),
            Element::Neutral => None,
        }
    }

    /// Returns true if `self` is strong against `other`.
    pub fn beats(self, other: Element) -> bool {
        self.strong_against() == Some(other)
    }
}

/// Relation between an attacking and a defending element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effectiveness {
    Neutral,
    Advantage,
    Disadvantage,
}

impl Effectiveness {
    /// Classifies an (attacker, defender) pair.
    pub fn classify(attacker: Element, defender: Element) -> Self {
        if attacker == defender {
            Effectiveness::Neutral
        } else if attacker.beats(defender) {
            Effectiveness::Advantage
        } else if defender.beats(attacker) {
            Effectiveness::Disadvantage
        } else {
            Effectiveness::Neutral
        }
    }

    /// Damage multiplier for this relation.
    pub fn multiplier(self, table: &ElementTable) -> f64 {
        match self {
            Effectiveness::Neutral => 1.0,
            Effectiveness::Advantage => table.advantage,
            Effectiveness::Disadvantage => table.disadvantage,
        }
    }
}

/// Damage multiplier for `attacker` hitting `defender`.
///
/// Neutral (either side) and same-element pairs are always 1.0.
pub fn multiplier(attacker: Element, defender: Element, table: &ElementTable) -> f64 {
    Effectiveness::classify(attacker, defender).multiplier(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn table() -> ElementTable {
        ElementTable::default()
    }

    #[test]
    fn equal_elements_are_neutral() {
        for element in Element::iter() {
            assert_eq!(multiplier(element, element, &table()), 1.0);
        }
    }

    #[test]
    fn neutral_never_modifies_damage() {
        for element in Element::iter() {
            assert_eq!(multiplier(Element::Neutral, element, &table()), 1.0);
            assert_eq!(multiplier(element, Element::Neutral, &table()), 1.0);
        }
    }

    #[test]
    fn cycle_is_asymmetric() {
        use Element::*;
        for (strong, weak) in [(Fire, Wind), (Wind, Earth), (Earth, Water), (Water, Fire)] {
            assert!(multiplier(strong, weak, &table()) > 1.0);
            assert!(multiplier(weak, strong, &table()) < 1.0);
        }
    }

    #[test]
    fn opposite_elements_are_neutral() {
        use Element::*;
        assert_eq!(multiplier(Fire, Earth, &table()), 1.0);
        assert_eq!(multiplier(Earth, Fire, &table()), 1.0);
        assert_eq!(multiplier(Water, Wind, &table()), 1.0);
        assert_eq!(multiplier(Wind, Water, &table()), 1.0);
    }

    #[test]
    fn advantage_holds_only_along_cycle() {
        for attacker in Element::iter() {
            for defender in Element::iter() {
                let strong = attacker.beats(defender);
                assert_eq!(multiplier(attacker, defender, &table()) > 1.0, strong);
            }
        }
    }

    #[test]
    fn uses_configured_constants() {
        let table = ElementTable {
            advantage: 2.0,
            disadvantage: 0.9,
        };
        assert_eq!(multiplier(Element::Water, Element::Fire, &table), 2.0);
        assert_eq!(multiplier(Element::Fire, Element::Water, &table), 0.9);
    }
}
