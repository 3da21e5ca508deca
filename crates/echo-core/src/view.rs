//! What each player is allowed to see.
//!
//! A [`PlayerView`] is built fresh from the authoritative state for one
//! seat. The opponent's hand is only a count and their current picks only
//! appear once the rules turn them face up.

use crate::actions::{MainSelection, TurnResult};
use crate::cards::{opponent, Battlefield, Creature, Edict, PlayerId, PLAYER_COUNT};
use crate::effects::{GlobalEffect, Scheduled, StatusEffect};
use crate::game::{GameError, GamePhase, GameState, GraveyardEntry, IllegalAction};
use crate::setup::TURN_COUNT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The opponent as seen from across the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    pub id: PlayerId,
    pub hand_size: usize,
    pub edicts: BTreeSet<Edict>,
    pub victory_points: u32,
    /// Whether they still owe a submission this phase
    pub pending: bool,
    /// Their edict this turn, once revealed
    pub edict: Option<Edict>,
    /// Their creature this turn, once revealed
    pub creature: Option<Creature>,
    /// Their sabotage guess, once every guess is in
    pub sabotage_guess: Option<Creature>,
    pub effects: Vec<Scheduled<StatusEffect>>,
}

/// Game state filtered for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub player: PlayerId,
    pub turn: u8,
    pub phase: GamePhase,
    pub battlefields: [Battlefield; TURN_COUNT],
    pub current_battlefield: Battlefield,
    pub hand: BTreeSet<Creature>,
    pub edicts: BTreeSet<Edict>,
    pub victory_points: u32,
    pub effects: Vec<Scheduled<StatusEffect>>,
    pub global_effects: Vec<Scheduled<GlobalEffect>>,
    /// Our own pick this turn, if already submitted
    pub selection: Option<MainSelection>,
    pub sabotage_guess: Option<Creature>,
    /// Creature we fight with this turn, once settled
    pub fighting: Option<Creature>,
    pub opponent: OpponentView,
    pub graveyard: Vec<GraveyardEntry>,
    pub history: Vec<TurnResult>,
    /// Only known once the game is over, if the table plays it that way
    pub overseer: Option<Creature>,
}

impl GameState {
    /// Build the view for one seat
    pub fn view_for(&self, player: PlayerId) -> Result<PlayerView, GameError> {
        if player as usize >= PLAYER_COUNT {
            return Err(IllegalAction::UnknownPlayer(player).into());
        }

        let me = player as usize;
        let them = opponent(player) as usize;
        let slots = &self.slots;
        let pending = self.pending_players();

        let own = &self.players[me];
        let other = &self.players[them];

        let opponent_view = OpponentView {
            id: other.id,
            hand_size: other.hand_size(),
            edicts: other.edicts.clone(),
            victory_points: other.victory_points,
            pending: pending.contains(&other.id),
            edict: slots
                .main[them]
                .as_ref()
                .filter(|_| slots.edicts_revealed)
                .map(|s| s.edict),
            creature: slots.fighting[them].filter(|_| slots.revealed[them]),
            sabotage_guess: slots.sabotage[them].filter(|_| self.phase != GamePhase::Sabotage),
            effects: other.effects.entries().to_vec(),
        };

        let overseer = (self.is_finished() && self.rules.reveal_overseer_at_end)
            .then_some(self.overseer);

        Ok(PlayerView {
            player,
            turn: self.turn,
            phase: self.phase,
            battlefields: self.battlefields,
            current_battlefield: self.current_battlefield(),
            hand: own.hand.clone(),
            edicts: own.edicts.clone(),
            victory_points: own.victory_points,
            effects: own.effects.entries().to_vec(),
            global_effects: self.global_effects.entries().to_vec(),
            selection: slots.main[me].clone(),
            sabotage_guess: slots.sabotage[me],
            fighting: slots.fighting[me],
            opponent: opponent_view,
            graveyard: self.graveyard.entries().to_vec(),
            history: self.history.clone(),
            overseer,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::cards::{Battlefield, Creature, Edict};
    use crate::game::{GameError, GamePhase, GameState, IllegalAction};
    use crate::rules::RuleConfig;
    use crate::setup::Setup;
    use pretty_assertions::assert_eq;
    use Creature::*;

    fn game(rules: RuleConfig) -> GameState {
        let setup = Setup {
            hands: [
                vec![Wall, Rogue, Diplomat, Steward, Witch],
                vec![Seer, Bard, Ranger, Barbarian, Mercenary],
            ],
            overseer: Monarch,
            battlefields: vec![Battlefield::Plains; 4],
        };
        GameState::with_rules(setup, rules).unwrap()
    }

    #[test]
    fn test_opponent_pick_stays_hidden_until_reveal() {
        let mut game = game(RuleConfig::default());
        game.submit_main(0, vec![Witch], Edict::Sabotage).unwrap();

        let view = game.view_for(1).unwrap();
        assert_eq!(view.opponent.hand_size, 5);
        assert_eq!(view.opponent.edict, None);
        assert_eq!(view.opponent.creature, None);
        assert!(!view.opponent.pending);
        assert_eq!(view.hand.len(), 5);

        let own = game.view_for(0).unwrap();
        assert_eq!(own.selection.map(|s| s.creatures), Some(vec![Witch]));
        assert!(own.opponent.pending);

        // Both edicts flip, creatures stay down during sabotage
        game.submit_main(1, vec![Ranger], Edict::Gambit).unwrap();
        assert_eq!(game.phase(), GamePhase::Sabotage);

        let view = game.view_for(1).unwrap();
        assert_eq!(view.opponent.edict, Some(Edict::Sabotage));
        assert_eq!(view.opponent.creature, None);
        assert_eq!(game.view_for(0).unwrap().opponent.edict, Some(Edict::Gambit));
    }

    #[test]
    fn test_views_after_a_turn() {
        let mut game = game(RuleConfig::default());
        game.submit_main(0, vec![Wall], Edict::Gambit).unwrap();
        game.submit_main(1, vec![Bard], Edict::Ambush).unwrap();

        let view = game.view_for(0).unwrap();
        assert_eq!(view.turn, 2);
        assert_eq!(view.hand.len(), 4);
        assert_eq!(view.edicts.len(), 4);
        assert_eq!(view.opponent.hand_size, 4);
        assert!(!view.opponent.edicts.contains(&Edict::Ambush));
        assert_eq!(view.opponent.effects.len(), 1);
        assert_eq!(view.graveyard.len(), 4);
        assert_eq!(view.history.len(), 1);
        assert_eq!(view.overseer, None);
        assert_eq!(view.opponent.edict, None);
    }

    #[test]
    fn test_overseer_shown_at_end_when_configured() {
        let picks = [
            [(Wall, Edict::Ambush), (Bard, Edict::Ambush)],
            // The Rogue stops the Seer from granting a second pick
            [(Rogue, Edict::Gambit), (Seer, Edict::Gambit)],
            [(Diplomat, Edict::RileThePublic), (Ranger, Edict::RileThePublic)],
            [(Steward, Edict::DivertAttention), (Mercenary, Edict::DivertAttention)],
        ];

        for reveal in [true, false] {
            let rules = RuleConfig {
                reveal_overseer_at_end: reveal,
                ..RuleConfig::default()
            };
            let mut game = game(rules);
            for turn in picks {
                game.submit_main(0, vec![turn[0].0], turn[0].1).unwrap();
                game.submit_main(1, vec![turn[1].0], turn[1].1).unwrap();
            }
            assert!(game.is_finished());
            let expected = reveal.then_some(Monarch);
            assert_eq!(game.view_for(0).unwrap().overseer, expected);
            assert_eq!(game.view_for(1).unwrap().overseer, expected);
        }
    }

    #[test]
    fn test_unknown_seat_has_no_view() {
        let game = game(RuleConfig::default());
        assert_eq!(
            game.view_for(2),
            Err(GameError::IllegalAction(IllegalAction::UnknownPlayer(2)))
        );
    }
}
