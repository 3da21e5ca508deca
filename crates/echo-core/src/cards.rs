//! Static card catalog: creatures, edicts and battlefields.
//!
//! This module contains:
//! - The 11 creatures with their printed strength
//! - The 5 edicts every player starts with
//! - The battlefields, their rewards and which creatures they favour
//!
//! Everything here is plain data. The rules that give the cards meaning live
//! in [`crate::battle`] and [`crate::score`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player identifier (0 or 1)
pub type PlayerId = u8;

/// Number of seats at the table
pub const PLAYER_COUNT: usize = 2;

/// The other seat. `player` must be 0 or 1.
pub fn opponent(player: PlayerId) -> PlayerId {
    1 - player
}

/// Creature cards. Each exists exactly once in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Creature {
    Wall,
    Seer,
    Rogue,
    Bard,
    Diplomat,
    Ranger,
    Steward,
    Barbarian,
    Witch,
    Mercenary,
    Monarch,
}

impl Creature {
    /// All creatures, in catalog order
    pub const ALL: [Creature; 11] = [
        Creature::Wall,
        Creature::Seer,
        Creature::Rogue,
        Creature::Bard,
        Creature::Diplomat,
        Creature::Ranger,
        Creature::Steward,
        Creature::Barbarian,
        Creature::Witch,
        Creature::Mercenary,
        Creature::Monarch,
    ];

    /// Printed strength (top-left of the card)
    pub fn strength(self) -> u8 {
        match self {
            Creature::Wall | Creature::Seer => 0,
            Creature::Rogue => 1,
            Creature::Bard | Creature::Diplomat | Creature::Ranger | Creature::Steward => 2,
            Creature::Barbarian | Creature::Witch => 3,
            Creature::Mercenary => 4,
            Creature::Monarch => 6,
        }
    }

    /// Card text
    pub fn description(self) -> &'static str {
        match self {
            Creature::Wall => "The battle this card is involved in ends in a tie.",
            Creature::Seer => {
                "Next battle, play two creatures instead of one. After the opponent reveals \
                 their creature, choose one creature to reveal, and return the other to your hand."
            }
            Creature::Rogue => "Negates the seer. Wins against the monarch and the wall.",
            Creature::Bard => {
                "Next battle, gain +1 strength. Winning the next battle awards +1 victory point."
            }
            Creature::Diplomat => "Wins the battle if both players played the same edict.",
            Creature::Ranger => {
                "Gains +2 strength if you receive a battlefield bonus and the opponent does not."
            }
            Creature::Steward => {
                "Edicts are twice as effective. At the end of the turn, return all your edicts \
                 back to your hand."
            }
            Creature::Barbarian => "Gains +2 strength if you lost the last battle.",
            Creature::Witch => {
                "Negates the opponent's creature. Cannot gain strength from edicts."
            }
            Creature::Mercenary => "Next battle, lose 1 strength.",
            Creature::Monarch => {
                "If you do not win this battle, your opponent gains +2 additional victory points."
            }
        }
    }
}

impl fmt::Display for Creature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Edict cards. Every player owns one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Edict {
    // Victory point edicts
    RileThePublic,
    DivertAttention,

    // Strength edicts
    Sabotage,
    Gambit,
    Ambush,
}

impl Edict {
    /// The full hand each player starts with
    pub const ALL: [Edict; 5] = [
        Edict::RileThePublic,
        Edict::DivertAttention,
        Edict::Sabotage,
        Edict::Gambit,
        Edict::Ambush,
    ];

    /// Card text
    pub fn description(self) -> &'static str {
        match self {
            Edict::RileThePublic => {
                "This battle is worth +1 victory point. Negates an opposing Divert Attention."
            }
            Edict::DivertAttention => "This battle is worth -1 victory point.",
            Edict::Sabotage => "Guess the creature your opponent has played.",
            Edict::Gambit => "+1 strength, but you lose on ties.",
            Edict::Ambush => "+1 strength if you receive the battlefield bonus.",
        }
    }
}

impl fmt::Display for Edict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Lingering effect a battlefield has on the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlefieldEffect {
    /// Winner gains +2 victory points if they win the next battle
    Glade,
    /// Winner gains +1 strength next battle
    Mountain,
    /// Edicts are twice as effective here
    Urban,
    /// The winner of the following battle gains +1 victory point
    Night,
    None,
}

/// Battlefield cards. A game is played over an ordered list of four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Battlefield {
    Mountain,
    Glade,
    Urban,
    Night,
    LastStrand,
    Plains,
}

impl Battlefield {
    /// All battlefields in the catalog
    pub const ALL: [Battlefield; 6] = [
        Battlefield::Mountain,
        Battlefield::Glade,
        Battlefield::Urban,
        Battlefield::Night,
        Battlefield::LastStrand,
        Battlefield::Plains,
    ];

    /// Victory points for winning a battle here (top-left of the card)
    pub fn reward(self) -> u8 {
        match self {
            Battlefield::LastStrand => 5,
            _ => 3,
        }
    }

    /// Whether the creature gets the +2 battlefield bonus here
    pub fn grants_bonus(self, creature: Creature) -> bool {
        use Creature::*;

        matches!(
            (self, creature),
            (Battlefield::Mountain, Ranger | Barbarian | Mercenary)
                | (Battlefield::Glade, Bard | Ranger | Witch)
                | (Battlefield::Urban, Rogue | Bard | Diplomat | Steward)
                | (Battlefield::Night, Seer | Rogue | Ranger)
        )
    }

    /// Creatures favoured by this battlefield
    pub fn bonus_creatures(self) -> Vec<Creature> {
        Creature::ALL
            .into_iter()
            .filter(|c| self.grants_bonus(*c))
            .collect()
    }

    pub fn effect(self) -> BattlefieldEffect {
        match self {
            Battlefield::Mountain => BattlefieldEffect::Mountain,
            Battlefield::Glade => BattlefieldEffect::Glade,
            Battlefield::Urban => BattlefieldEffect::Urban,
            Battlefield::Night => BattlefieldEffect::Night,
            Battlefield::LastStrand | Battlefield::Plains => BattlefieldEffect::None,
        }
    }

    /// Card text
    pub fn description(self) -> &'static str {
        match self {
            Battlefield::Mountain => "The winner gains +1 strength during the next battle.",
            Battlefield::Glade => {
                "The winner gains +2 victory points if they win the next battle as well."
            }
            Battlefield::Urban => "Edicts are twice as effective.",
            Battlefield::Night => "The winner of the next battle gains +1 victory point.",
            Battlefield::LastStrand => "Worth 5 victory points.",
            Battlefield::Plains => "No special effect.",
        }
    }
}

impl fmt::Display for Battlefield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
