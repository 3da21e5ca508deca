//! Initial deal: hands, overseer and battlefield order.
//!
//! Dealing is normally done outside the engine; [`Setup`] is the shape the
//! engine accepts, checked by [`Setup::validate`]. [`Setup::random`] is a
//! convenience dealer for tests and local play.

use crate::cards::{Battlefield, Creature, PLAYER_COUNT};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Creatures dealt to each player
pub const HAND_SIZE: usize = 5;

/// Number of battles in a game
pub const TURN_COUNT: usize = 4;

/// Reasons a setup is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SetupError {
    #[error("Player {player} was dealt {count} creatures, expected 5")]
    WrongHandSize { player: usize, count: usize },

    #[error("{0} was dealt more than once")]
    DuplicateCreature(Creature),

    #[error("The overseer {0} is also in a player's hand")]
    OverseerInHand(Creature),

    #[error("Expected 4 battlefields, got {0}")]
    WrongBattlefieldCount(usize),
}

/// A dealt but not yet started game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub hands: [Vec<Creature>; PLAYER_COUNT],
    pub overseer: Creature,
    pub battlefields: Vec<Battlefield>,
}

impl Setup {
    /// Shuffle and deal. Three distinct battlefields are drawn from the
    /// ordinary ones and the Last Strand always closes the game.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut creatures = Creature::ALL.to_vec();
        creatures.shuffle(rng);

        let overseer = creatures[2 * HAND_SIZE];
        let second = creatures[HAND_SIZE..2 * HAND_SIZE].to_vec();
        creatures.truncate(HAND_SIZE);

        let mut battlefields: Vec<Battlefield> = Battlefield::ALL
            .into_iter()
            .filter(|b| *b != Battlefield::LastStrand)
            .collect();
        battlefields.shuffle(rng);
        battlefields.truncate(TURN_COUNT - 1);
        battlefields.push(Battlefield::LastStrand);

        Self {
            hands: [creatures, second],
            overseer,
            battlefields,
        }
    }

    /// Check the deal accounts for every creature exactly once
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.battlefields.len() != TURN_COUNT {
            return Err(SetupError::WrongBattlefieldCount(self.battlefields.len()));
        }

        let mut seen = BTreeSet::new();
        for (player, hand) in self.hands.iter().enumerate() {
            if hand.len() != HAND_SIZE {
                return Err(SetupError::WrongHandSize {
                    player,
                    count: hand.len(),
                });
            }
            for creature in hand {
                if *creature == self.overseer {
                    return Err(SetupError::OverseerInHand(*creature));
                }
                if !seen.insert(*creature) {
                    return Err(SetupError::DuplicateCreature(*creature));
                }
            }
        }

        // Ten distinct creatures plus a different overseer covers all eleven
        Ok(())
    }

    /// Battlefields as a fixed array, once validated
    pub(crate) fn battlefield_order(&self) -> Result<[Battlefield; TURN_COUNT], SetupError> {
        self.battlefields
            .clone()
            .try_into()
            .map_err(|v: Vec<Battlefield>| SetupError::WrongBattlefieldCount(v.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_setup() -> Setup {
        use Creature::*;
        Setup {
            hands: [
                vec![Wall, Rogue, Diplomat, Steward, Witch],
                vec![Seer, Bard, Ranger, Barbarian, Mercenary],
            ],
            overseer: Monarch,
            battlefields: vec![
                Battlefield::Plains,
                Battlefield::Plains,
                Battlefield::Plains,
                Battlefield::Plains,
            ],
        }
    }

    #[test]
    fn test_fixed_setup_is_valid() {
        assert_eq!(fixed_setup().validate(), Ok(()));
    }

    #[test]
    fn test_random_setups_are_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let setup = Setup::random(&mut rng);
            assert_eq!(setup.validate(), Ok(()));
            assert_eq!(setup.battlefields[3], Battlefield::LastStrand);
            assert!(!setup.battlefields[..3].contains(&Battlefield::LastStrand));
        }
    }

    #[test]
    fn test_rejects_wrong_hand_size() {
        let mut setup = fixed_setup();
        setup.hands[1].pop();
        assert_eq!(
            setup.validate(),
            Err(SetupError::WrongHandSize {
                player: 1,
                count: 4
            })
        );
    }

    #[test]
    fn test_rejects_overseer_in_hand() {
        let mut setup = fixed_setup();
        setup.overseer = Creature::Wall;
        assert_eq!(
            setup.validate(),
            Err(SetupError::OverseerInHand(Creature::Wall))
        );
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut setup = fixed_setup();
        setup.hands[1][0] = Creature::Wall;
        assert_eq!(
            setup.validate(),
            Err(SetupError::DuplicateCreature(Creature::Wall))
        );

        let mut setup = fixed_setup();
        setup.overseer = Creature::Witch;
        setup.hands[0][4] = Creature::Monarch;
        assert_eq!(setup.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_wrong_battlefield_count() {
        let mut setup = fixed_setup();
        setup.battlefields.push(Battlefield::Night);
        assert_eq!(
            setup.validate(),
            Err(SetupError::WrongBattlefieldCount(5))
        );
    }
}
