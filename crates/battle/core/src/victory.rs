//! Victory conditions.

use crate::character::Character;
use crate::turn::{BattleState, Side};

/// Decides whether a battle is over and who won.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VictoryConditionChecker {
    surrender_winner: Option<Side>,
}

impl VictoryConditionChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished iff the state machine says so or either side is at 0 HP.
    pub fn is_finished(&self, state: BattleState, characters: &[Character; 2]) -> bool {
        state.is_finished() || characters.iter().any(|c| !c.is_alive())
    }

    /// Surrender winner first, then the side whose opponent is down.
    pub fn winner(&self, characters: &[Character; 2]) -> Option<Side> {
        if let Some(side) = self.surrender_winner {
            return Some(side);
        }
        [Side::One, Side::Two]
            .into_iter()
            .find(|side| !characters[side.opponent().index()].is_alive())
    }

    /// Records the loser's opponent as winner. Returns the winner.
    pub fn handle_surrender(&mut self, loser: Side) -> Side {
        let winner = loser.opponent();
        self.surrender_winner = Some(winner);
        winner
    }

    pub fn surrender_winner(&self) -> Option<Side> {
        self.surrender_winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Archetype;

    fn pair() -> [Character; 2] {
        [
            Archetype::Fire.build_default().unwrap(),
            Archetype::Earth.build_default().unwrap(),
        ]
    }

    #[test]
    fn ongoing_battle_has_no_winner() {
        let checker = VictoryConditionChecker::new();
        let characters = pair();
        assert!(!checker.is_finished(BattleState::Turn(Side::One), &characters));
        assert_eq!(checker.winner(&characters), None);
    }

    #[test]
    fn knocked_out_side_loses() {
        let checker = VictoryConditionChecker::new();
        let mut characters = pair();
        characters[0].take_true_damage(999);
        assert!(checker.is_finished(BattleState::Turn(Side::Two), &characters));
        assert_eq!(checker.winner(&characters), Some(Side::Two));
    }

    #[test]
    fn surrender_takes_precedence() {
        let mut checker = VictoryConditionChecker::new();
        let mut characters = pair();
        characters[1].take_true_damage(999);
        assert_eq!(checker.winner(&characters), Some(Side::One));
        assert_eq!(checker.handle_surrender(Side::One), Side::Two);
        assert_eq!(checker.winner(&characters), Some(Side::Two));
    }
}
