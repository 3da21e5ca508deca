//! Player decisions and the events they produce.
//!
//! This module defines the three kinds of submission a player can make in a
//! turn and every event the engine reports back.

use crate::battle::BattleOutcome;
use crate::cards::{Battlefield, Creature, Edict, PlayerId};
use crate::score::GameResult;
use serde::{Deserialize, Serialize};

/// All possible submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Pick one creature (two under the seer effect) and one edict
    Main {
        creatures: Vec<Creature>,
        edict: Edict,
    },
    /// Name the creature you think the opponent played (Sabotage edict only)
    Sabotage { guess: Creature },
    /// Choose which of your two creatures goes back to hand (seer effect only)
    Seer { return_to_hand: Creature },
}

impl PlayerAction {
    /// Convenience for the common single-creature main phase pick
    pub fn main(creature: Creature, edict: Edict) -> Self {
        PlayerAction::Main {
            creatures: vec![creature],
            edict,
        }
    }
}

/// Main phase pick held by the engine until the reveal steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainSelection {
    pub creatures: Vec<Creature>,
    pub edict: Edict,
}

/// Everything that happened in one evaluated turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    pub turn: u8,
    pub battlefield: Battlefield,
    pub creatures: [Creature; 2],
    pub edicts: [Edict; 2],
    pub sabotage_guesses: [Option<Creature>; 2],
    pub outcome: BattleOutcome,
    /// Running totals after this turn's points
    pub scores_after: [u32; 2],
}

/// Events that occur as a result of submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player locked in their main phase pick (contents stay hidden)
    MainPhaseSubmitted { player: PlayerId },

    /// Both edicts are turned face up
    EdictsRevealed { edicts: [Edict; 2] },

    /// A sabotage guess, shown once every saboteur has guessed
    SabotageGuessed { player: PlayerId, guess: Creature },

    /// A player's creature is turned face up
    CreatureRevealed { player: PlayerId, creature: Creature },

    /// The opponent's Rogue cancelled a player's seer choice. The creature
    /// that went back to hand stays hidden.
    SeerNegated { player: PlayerId, kept: Creature },

    /// A player under the seer effect sent one creature back to hand
    SeerResolved { player: PlayerId },

    /// The battle was fought and scored
    BattleResolved(Box<TurnResult>),

    /// A Steward took its owner's edicts back
    EdictsReturned { player: PlayerId },

    /// Turn ended, the next one starts
    TurnEnded {
        turn: u8,
        next_battlefield: Battlefield,
    },

    /// The fourth battle is over
    GameEnded {
        result: GameResult,
        scores: [u32; 2],
        overseer: Option<Creature>,
    },
}
