//! Character roster loader.
//!
//! A roster is a RON list of named characters, each built from an archetype
//! with optional stat overrides:
//!
//! ```ron
//! [
//!     (id: "ember", name: Some("Ember"), archetype: Fire),
//!     (id: "bulwark", archetype: Earth, overrides: (defense: Some(35))),
//! ]
//! ```

use std::path::Path;

use battle_core::{Archetype, Character, CharacterError, CharacterSpec, Skill};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Per-stat replacements for an archetype's stat line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatOverrides {
    pub max_hp: Option<u32>,
    pub attack: Option<u32>,
    pub defense: Option<u32>,
    pub speed: Option<u32>,
    pub max_resource: Option<u32>,
}

/// One roster slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    /// Display name; the archetype's default name when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub archetype: Archetype,
    #[serde(default)]
    pub overrides: StatOverrides,
}

impl RosterEntry {
    /// Archetype stat line with overrides applied. Not validated.
    pub fn spec(&self) -> CharacterSpec {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| self.archetype.default_name().to_string());
        let mut spec = self.archetype.spec(name);
        let overrides = &self.overrides;
        spec.max_hp = overrides.max_hp.unwrap_or(spec.max_hp);
        spec.attack = overrides.attack.unwrap_or(spec.attack);
        spec.defense = overrides.defense.unwrap_or(spec.defense);
        spec.speed = overrides.speed.unwrap_or(spec.speed);
        spec.max_resource = overrides.max_resource.unwrap_or(spec.max_resource);
        spec
    }

    /// Builds a fresh character with the archetype's loadout.
    pub fn build(&self) -> Result<Character, CharacterError> {
        Character::new(self.spec(), Skill::loadout(self.archetype.special()))
    }
}

/// Validated set of roster entries, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Validates every entry and rejects duplicate ids.
    pub fn new(entries: Vec<RosterEntry>) -> LoadResult<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|other| other.id == entry.id) {
                anyhow::bail!("Duplicate roster id '{}'", entry.id);
            }
            entry
                .build()
                .map_err(|e| anyhow::anyhow!("Invalid roster entry '{}': {}", entry.id, e))?;
        }

        Ok(Self { entries })
    }

    pub fn get(&self, id: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Fresh character for `id`.
    pub fn build(&self, id: &str) -> LoadResult<Character> {
        let entry = self
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown roster id '{}'", id))?;
        Ok(entry.build()?)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loader for character rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load and validate a roster file.
    ///
    /// RON format: `Vec<RosterEntry>`
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid roster file {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let entries: Vec<RosterEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        Roster::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::Element;

    #[test]
    fn defaults_follow_archetype() {
        let roster = RosterLoader::parse(r#"[(id: "wind", archetype: Wind)]"#).unwrap();
        let zephyr = roster.build("wind").unwrap();
        assert_eq!(zephyr.name(), "Zephyr");
        assert_eq!(zephyr.element(), Element::Wind);
        assert_eq!(zephyr.speed(), 35);
        assert_eq!(zephyr.skills()[3], Skill::AirSlash);
    }

    #[test]
    fn overrides_replace_single_stats() {
        let roster = RosterLoader::parse(
            r#"[(id: "wall", name: Some("Wall"), archetype: Earth, overrides: (defense: Some(40)))]"#,
        )
        .unwrap();
        let wall = roster.build("wall").unwrap();
        assert_eq!(wall.name(), "Wall");
        assert_eq!(wall.defense(), 40);
        assert_eq!(wall.attack(), 28);
    }

    #[test]
    fn rejects_out_of_range_override() {
        let err = RosterLoader::parse(
            r#"[(id: "broken", archetype: Fire, overrides: (attack: Some(1000)))]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = RosterLoader::parse(
            r#"[(id: "a", archetype: Fire), (id: "a", archetype: Water)]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let roster = Roster::default();
        assert!(roster.build("nobody").is_err());
        assert!(roster.is_empty());
    }
}
