//! Balance configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance tables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a balance file.
    ///
    /// Missing tables and fields fall back to the reference balance.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid balance file {}: {}", path.display(), e))
    }

    /// Parse and validate balance TOML.
    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::SkillProfile;

    #[test]
    fn empty_document_is_reference_balance() {
        assert_eq!(ConfigLoader::parse("").unwrap(), BattleConfig::default());
    }

    #[test]
    fn overrides_single_fields() {
        let config = ConfigLoader::parse(
            r#"
            regen_per_cycle = 15

            [skills.fireball]
            cost = 25
            power_percent = 160
            "#,
        )
        .unwrap();
        assert_eq!(config.regen_per_cycle, 15);
        assert_eq!(config.skills.fireball.cost, 25);
        assert_eq!(config.skills.fireball.power_percent, 160);
        assert_eq!(config.skills.ice_blast, BattleConfig::default().skills.ice_blast);
    }

    #[test]
    fn partial_skill_table_keeps_reference_fields() {
        let config = ConfigLoader::parse("[skills.heal]\ncost = 10\n").unwrap();
        assert_eq!(config.skills.heal, SkillProfile::new(10, 0, 30));
        assert_eq!(config.skills.attack, SkillProfile::new(0, 100, 0));
    }

    #[test]
    fn rejects_non_positive_durations() {
        let err = ConfigLoader::parse("[effects]\nfreeze_duration = 0\n").unwrap_err();
        assert!(err.to_string().contains("freeze_duration"));
    }

    #[test]
    fn rejects_invalid_balance() {
        let err = ConfigLoader::parse("[elements]\ndisadvantage = 1.2\n").unwrap_err();
        assert!(err.to_string().contains("disadvantage"));
    }
}
