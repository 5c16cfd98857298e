//! Skills and their execution rules.
//!
//! Skills are stateless values; cost and power come from the
//! [`SkillTable`](crate::config::SkillTable) of the active config. Adding a
//! skill means adding a variant here and a profile there; the exhaustive
//! matches below point at every place that needs a decision.

use strum::{Display, EnumIter};
use tracing::debug;

use crate::character::{Character, SkillSet};
use crate::combat::HitReport;
use crate::config::BattleConfig;
use crate::effect::{Attach, StatusEffect, StatusEffectTag};
use crate::rng::BattleRng;

/// Every skill a character can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Skill {
    Attack,
    Guard,
    Heal,
    Fireball,
    #[strum(serialize = "Ice Blast")]
    IceBlast,
    #[strum(serialize = "Rock Throw")]
    RockThrow,
    #[strum(serialize = "Air Slash")]
    AirSlash,
}

/// What a successful skill use did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillOutcome {
    /// Report of the damaging hit, if the skill dealt damage.
    pub hit: Option<HitReport>,
    /// HP restored to the actor.
    pub healed: u32,
    /// Effect the skill attached and whether it was new or a refresh.
    pub attached: Option<(StatusEffectTag, Attach)>,
}

impl SkillOutcome {
    const EMPTY: SkillOutcome = SkillOutcome {
        hit: None,
        healed: 0,
        attached: None,
    };
}

impl Skill {
    /// Standard four-slot list: attack, guard, heal, then the special.
    pub const fn loadout(special: Skill) -> SkillSet {
        [Skill::Attack, Skill::Guard, Skill::Heal, special]
    }

    pub fn name(self) -> String {
        self.to_string()
    }

    /// Resource cost under the given balance.
    pub fn cost(self, config: &BattleConfig) -> u32 {
        config.skill_profile(self).cost
    }

    /// Self-targeting skills affect the actor, never the opponent.
    pub const fn is_self_targeting(self) -> bool {
        matches!(self, Skill::Guard | Skill::Heal)
    }

    /// Status effect this skill attaches, if any.
    pub const fn effect(self) -> Option<StatusEffectTag> {
        match self {
            Skill::Guard => Some(StatusEffectTag::Guard),
            Skill::Fireball => Some(StatusEffectTag::Burn),
            Skill::IceBlast => Some(StatusEffectTag::Freeze),
            Skill::Attack | Skill::Heal | Skill::RockThrow | Skill::AirSlash => None,
        }
    }

    /// Uses the skill.
    ///
    /// The cost is spent first through [`Character::use_resource`], even when
    /// it is zero. If the actor cannot pay, nothing is applied and `None` is
    /// returned.
    pub fn execute(
        self,
        actor: &mut Character,
        target: &mut Character,
        rng: &mut impl BattleRng,
        config: &BattleConfig,
    ) -> Option<SkillOutcome> {
        let profile = config.skill_profile(self);
        if !actor.use_resource(profile.cost) {
            debug!(actor = actor.name(), skill = %self, cost = profile.cost, "not enough resource");
            return None;
        }

        let outcome = match self {
            Skill::Guard => {
                let effect = StatusEffect::from_table(StatusEffectTag::Guard, &config.effects);
                let attach = actor.add_effect(effect);
                SkillOutcome {
                    attached: Some((StatusEffectTag::Guard, attach)),
                    ..SkillOutcome::EMPTY
                }
            }
            Skill::Heal => SkillOutcome {
                healed: actor.heal(profile.heal),
                ..SkillOutcome::EMPTY
            },
            Skill::Attack
            | Skill::Fireball
            | Skill::IceBlast
            | Skill::RockThrow
            | Skill::AirSlash => {
                let raw = profile.raw_damage(actor.attack());
                let hit = target.take_damage_with_mechanics(raw, actor, rng, config);
                // A dodged attack carries no rider effect.
                let attached = self.effect().filter(|_| !hit.dodged).map(|tag| {
                    let effect = StatusEffect::from_table(tag, &config.effects);
                    (tag, target.add_effect(effect))
                });
                SkillOutcome {
                    hit: Some(hit),
                    attached,
                    ..SkillOutcome::EMPTY
                }
            }
        };

        Some(outcome)
    }
}
