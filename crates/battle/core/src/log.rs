//! Battle log: the append-only record of executed turns.
//!
//! Each consumed turn produces one [`BattleAction`]. Entries are immutable
//! once appended; the log keeps the most recent `capacity` entries while the
//! sequence numbers keep counting, so a replay can tell that older entries
//! were evicted.

use std::collections::VecDeque;

use strum::{Display, IntoStaticStr};

use crate::combat::HitReport;
use crate::effect::{Attach, StatusEffectTag};
use crate::skill::{Skill, SkillOutcome};

/// Category of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// A skill was executed.
    Skill,
    /// The actor was frozen and lost the turn.
    Frozen,
    /// The actor was knocked out by its own start-of-turn effects.
    Defeated,
    /// The actor gave up; the opponent wins.
    Surrender,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// One executed turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleAction {
    /// Creation order, assigned by the log.
    pub sequence: u64,
    /// Turn counter at the time of the action.
    pub turn: u32,
    pub kind: ActionKind,
    pub actor: String,
    pub target: String,
    pub skill: Option<Skill>,
    /// Damage dealt to the target (its HP delta).
    pub damage: u32,
    /// Healing done to the actor (its HP delta).
    pub healing: u32,
    pub critical: bool,
    pub dodged: bool,
    pub effectiveness: f64,
    pub description: String,
}

/// HP changes observed around one skill use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HpDeltas {
    /// HP the target lost.
    pub damage: u32,
    /// HP the actor gained.
    pub healing: u32,
}

impl BattleAction {
    /// Entry for an executed skill.
    ///
    /// Combat flags come from `outcome.hit`, the report of *this* action's
    /// hit; actions that did not attack record neutral flags.
    pub fn skill_use(
        turn: u32,
        actor: &str,
        target: &str,
        skill: Skill,
        outcome: &SkillOutcome,
        deltas: HpDeltas,
    ) -> Self {
        let HpDeltas { damage, healing } = deltas;
        let report = outcome.hit.unwrap_or(HitReport::NONE);

        let mut description = if skill.is_self_targeting() {
            format!("{actor} used {skill}")
        } else {
            format!("{actor} used {skill} on {target}")
        };
        if report.dodged {
            description.push_str(&format!(", but {target} dodged"));
        } else if outcome.hit.is_some() {
            description.push_str(&format!(" for {damage} damage"));
            if report.critical {
                description.push_str(" (critical hit)");
            }
            if report.effectiveness > 1.0 {
                description.push_str(" (super effective)");
            } else if report.effectiveness < 1.0 {
                description.push_str(" (not very effective)");
            }
        }
        if healing > 0 {
            description.push_str(&format!(", restoring {healing} HP"));
        }
        match outcome.attached {
            Some((tag, Attach::Applied)) => description.push_str(&format!(", applying {tag}")),
            Some((tag, Attach::Refreshed)) => description.push_str(&format!(", refreshing {tag}")),
            Some((_, Attach::Dropped)) | None => {}
        }

        Self {
            sequence: 0,
            turn,
            kind: ActionKind::Skill,
            actor: actor.to_string(),
            target: target.to_string(),
            skill: Some(skill),
            damage,
            healing,
            critical: report.critical,
            dodged: report.dodged,
            effectiveness: report.effectiveness,
            description,
        }
    }

    /// Entry for a turn lost to a movement-locking effect.
    pub fn frozen(turn: u32, actor: &str) -> Self {
        Self::passive(
            turn,
            ActionKind::Frozen,
            actor,
            actor,
            format!("{actor} is frozen and cannot act"),
        )
    }

    /// Entry for an actor knocked out by its own start-of-turn effects.
    pub fn defeated(turn: u32, actor: &str) -> Self {
        Self::passive(
            turn,
            ActionKind::Defeated,
            actor,
            actor,
            format!("{actor} collapsed from status effects"),
        )
    }

    /// Entry for a surrender.
    pub fn surrender(turn: u32, actor: &str, winner: &str) -> Self {
        Self::passive(
            turn,
            ActionKind::Surrender,
            actor,
            winner,
            format!("{actor} surrendered; {winner} wins"),
        )
    }

    fn passive(turn: u32, kind: ActionKind, actor: &str, target: &str, description: String) -> Self {
        Self {
            sequence: 0,
            turn,
            kind,
            actor: actor.to_string(),
            target: target.to_string(),
            skill: None,
            damage: 0,
            healing: 0,
            critical: false,
            dodged: false,
            effectiveness: 1.0,
            description,
        }
    }
}

/// Bounded, append-only record of battle actions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    entries: VecDeque<BattleAction>,
    capacity: usize,
    next_sequence: u64,
}

impl BattleLog {
    /// Creates an empty log retaining at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(256)),
            capacity,
            next_sequence: 1,
        }
    }

    /// Appends an entry, stamping its sequence number.
    ///
    /// Evicts the oldest entry when full.
    pub fn append(&mut self, mut action: BattleAction) -> &BattleAction {
        action.sequence = self.next_sequence;
        self.next_sequence += 1;

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(action);
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total entries ever appended, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.next_sequence - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleAction> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&BattleAction> {
        self.entries.back()
    }

    /// Retained entries where `actor` acted.
    pub fn entries_for<'a>(&'a self, actor: &'a str) -> impl Iterator<Item = &'a BattleAction> {
        self.entries.iter().filter(move |entry| entry.actor == actor)
    }

    /// Damage dealt by `actor` across retained entries.
    pub fn total_damage_by(&self, actor: &str) -> u32 {
        self.entries_for(actor)
            .map(|entry| entry.damage)
            .fold(0, u32::saturating_add)
    }
}
