//! Preset elemental archetypes.

use strum::{Display, EnumIter, EnumString};

use crate::element::Element;
use crate::error::CharacterError;
use crate::skill::Skill;

use super::{Character, CharacterSpec};

/// The four playable archetypes, each with a fixed stat line and special.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    Fire,
    Water,
    Earth,
    Wind,
}

impl Archetype {
    pub const fn element(self) -> Element {
        match self {
            Archetype::Fire => Element::Fire,
            Archetype::Water => Element::Water,
            Archetype::Earth => Element::Earth,
            Archetype::Wind => Element::Wind,
        }
    }

    /// Slot 4 skill.
    pub const fn special(self) -> Skill {
        match self {
            Archetype::Fire => Skill::Fireball,
            Archetype::Water => Skill::IceBlast,
            Archetype::Earth => Skill::RockThrow,
            Archetype::Wind => Skill::AirSlash,
        }
    }

    pub const fn default_name(self) -> &'static str {
        match self {
            Archetype::Fire => "Pyra",
            Archetype::Water => "Marin",
            Archetype::Earth => "Terran",
            Archetype::Wind => "Zephyr",
        }
    }

    /// Stat line: (max HP, attack, defense, speed, max resource).
    pub const fn stat_line(self) -> (u32, u32, u32, u32, u32) {
        match self {
            Archetype::Fire => (100, 32, 15, 25, 60),
            Archetype::Water => (110, 30, 22, 20, 60),
            Archetype::Earth => (130, 28, 28, 12, 50),
            Archetype::Wind => (90, 29, 14, 35, 60),
        }
    }

    /// Construction parameters for a character of this archetype.
    pub fn spec(self, name: impl Into<String>) -> CharacterSpec {
        let (max_hp, attack, defense, speed, max_resource) = self.stat_line();
        CharacterSpec {
            name: name.into(),
            element: self.element(),
            max_hp,
            attack,
            defense,
            speed,
            max_resource,
        }
    }

    /// Builds a validated character of this archetype.
    pub fn build(self, name: impl Into<String>) -> Result<Character, CharacterError> {
        Character::new(self.spec(name), Skill::loadout(self.special()))
    }

    /// Builds the archetype under its default name.
    pub fn build_default(self) -> Result<Character, CharacterError> {
        self.build(self.default_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_archetype_builds_with_fixed_loadout() {
        for archetype in Archetype::iter() {
            let character = archetype.build_default().unwrap();
            assert_eq!(character.element(), archetype.element());
            assert_eq!(
                character.skills(),
                &[Skill::Attack, Skill::Guard, Skill::Heal, archetype.special()]
            );
            assert_eq!(character.hp(), character.max_hp());
            assert_eq!(character.resource(), character.max_resource());
        }
    }

    #[test]
    fn custom_name_is_validated() {
        assert_eq!(
            Archetype::Fire.build(""),
            Err(CharacterError::EmptyName)
        );
        assert_eq!(Archetype::Water.build("Tide").unwrap().name(), "Tide");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("earth".parse::<Archetype>(), Ok(Archetype::Earth));
        assert!("lightning".parse::<Archetype>().is_err());
    }
}
