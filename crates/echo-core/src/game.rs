//! Core game state machine.
//!
//! This module contains the main `GameState` struct and the turn flow:
//!
//! ```text
//! Main -> (edicts revealed) -> Sabotage -> (creatures revealed) -> Seer -> evaluate
//! ```
//!
//! Both players act in every phase and the phase only closes once everyone
//! with something to do has submitted. Players with nothing to do are
//! skipped, and a phase nobody needs is skipped entirely. The reveal steps
//! and the battle itself run inside the submission that closes a phase.

use crate::actions::{GameEvent, MainSelection, PlayerAction, TurnResult};
use crate::battle::{self, BattleInput, BattleSide};
use crate::cards::{Battlefield, BattlefieldEffect, Creature, Edict, PlayerId, PLAYER_COUNT};
use crate::effects::{EffectSchedule, GlobalEffect};
use crate::player::PlayerState;
use crate::rules::RuleConfig;
use crate::score::{self, GameResult};
use crate::setup::{Setup, SetupError, TURN_COUNT};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Players pick their creature(s) and edict in secret
    Main,
    /// Players who played Sabotage name a creature
    Sabotage,
    /// Players under the seer effect pick which creature to keep
    Seer,
    /// All four battles are over
    Finished,
}

/// Submissions the rules do not allow
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum IllegalAction {
    #[error("Not allowed during the {0:?} phase")]
    WrongPhase(GamePhase),

    #[error("Already submitted for this phase")]
    DuplicateSubmission,

    #[error("Nothing to submit this phase")]
    NoActionRequired,

    #[error("Expected {expected} creature(s), got {got}")]
    WrongCreatureCount { expected: usize, got: usize },

    #[error("The same creature was picked twice")]
    DuplicateCreature,

    #[error("{0} is not in hand")]
    CreatureNotInHand(Creature),

    #[error("{0} is not in hand")]
    EdictNotInHand(Edict),

    #[error("{0} was not one of the picked creatures")]
    NotSelected(Creature),

    #[error("No such player: {0}")]
    UnknownPlayer(PlayerId),
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),

    #[error("Invalid setup: {0}")]
    InvalidSetup(#[from] SetupError),

    #[error("Game is over")]
    GameOver,
}

/// A card that has left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayedCard {
    Creature(Creature),
    Edict(Edict),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraveyardEntry {
    pub turn: u8,
    pub player: PlayerId,
    pub card: PlayedCard,
}

/// Append-only record of everything played and resolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graveyard {
    entries: Vec<GraveyardEntry>,
}

impl Graveyard {
    fn push(&mut self, turn: u8, player: PlayerId, card: PlayedCard) {
        self.entries.push(GraveyardEntry { turn, player, card });
    }

    pub fn entries(&self) -> &[GraveyardEntry] {
        &self.entries
    }

    pub fn contains_creature(&self, creature: Creature) -> bool {
        self.entries
            .iter()
            .any(|e| e.card == PlayedCard::Creature(creature))
    }

    pub fn creatures(&self) -> impl Iterator<Item = Creature> + '_ {
        self.entries.iter().filter_map(|e| match e.card {
            PlayedCard::Creature(c) => Some(c),
            PlayedCard::Edict(_) => None,
        })
    }
}

/// Submissions collected during the current turn
#[derive(Debug, Clone, Default)]
pub(crate) struct TurnSlots {
    pub(crate) main: [Option<MainSelection>; PLAYER_COUNT],
    pub(crate) sabotage: [Option<Creature>; PLAYER_COUNT],
    /// The creature each player fights with, once settled
    pub(crate) fighting: [Option<Creature>; PLAYER_COUNT],
    /// Whether the opponent can see that creature yet
    pub(crate) revealed: [bool; PLAYER_COUNT],
    pub(crate) edicts_revealed: bool,
}

/// The complete, authoritative game state.
///
/// Hidden picks live in private fields; players only ever see a
/// [`crate::view::PlayerView`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) players: [PlayerState; PLAYER_COUNT],
    pub(crate) battlefields: [Battlefield; TURN_COUNT],
    /// The creature neither player holds
    pub(crate) overseer: Creature,
    pub(crate) graveyard: Graveyard,
    pub(crate) global_effects: EffectSchedule<GlobalEffect>,
    /// Turn number (1 to 4)
    pub(crate) turn: u8,
    pub(crate) phase: GamePhase,
    pub(crate) slots: TurnSlots,
    pub(crate) history: Vec<TurnResult>,
    pub(crate) rules: RuleConfig,
    pub(crate) result: Option<GameResult>,
}

impl GameState {
    /// Start a game from a dealt setup with the default rules
    pub fn new(setup: Setup) -> Result<Self, GameError> {
        Self::with_rules(setup, RuleConfig::default())
    }

    pub fn with_rules(setup: Setup, rules: RuleConfig) -> Result<Self, GameError> {
        setup.validate()?;
        let battlefields = setup.battlefield_order()?;
        let [first, second] = setup.hands;

        info!(?battlefields, "new game");

        Ok(Self {
            players: [PlayerState::new(0, first), PlayerState::new(1, second)],
            battlefields,
            overseer: setup.overseer,
            graveyard: Graveyard::default(),
            global_effects: EffectSchedule::new(),
            turn: 1,
            phase: GamePhase::Main,
            slots: TurnSlots::default(),
            history: Vec::new(),
            rules,
            result: None,
        })
    }

    /// Deal a random game
    pub fn random<R: Rng>(rng: &mut R, rules: RuleConfig) -> Result<Self, GameError> {
        Self::with_rules(Setup::random(rng), rules)
    }

    pub fn turn(&self) -> u8 {
        self.turn
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn battlefields(&self) -> &[Battlefield; TURN_COUNT] {
        &self.battlefields
    }

    /// Battlefield of the current turn (the last one once the game is over)
    pub fn current_battlefield(&self) -> Battlefield {
        self.battlefields[(self.turn as usize - 1).min(TURN_COUNT - 1)]
    }

    pub fn scores(&self) -> [u32; PLAYER_COUNT] {
        score::scores(&self.players)
    }

    pub fn graveyard(&self) -> &Graveyard {
        &self.graveyard
    }

    pub fn history(&self) -> &[TurnResult] {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    /// Winner or tie, once the game is over
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Players whose submission the current phase is waiting for
    pub fn pending_players(&self) -> Vec<PlayerId> {
        (0..PLAYER_COUNT as PlayerId)
            .filter(|&p| self.is_pending(p as usize))
            .collect()
    }

    fn is_pending(&self, p: usize) -> bool {
        match self.phase {
            GamePhase::Main => self.slots.main[p].is_none(),
            GamePhase::Sabotage => self.sabotage_pending(p),
            GamePhase::Seer => self.slots.fighting[p].is_none(),
            GamePhase::Finished => false,
        }
    }

    fn sabotage_pending(&self, p: usize) -> bool {
        let played = self.slots.main[p].as_ref().map(|s| s.edict) == Some(Edict::Sabotage);
        played && self.slots.sabotage[p].is_none()
    }

    /// Every submission currently legal for a player
    pub fn legal_actions(&self, player: PlayerId) -> Vec<PlayerAction> {
        let mut actions = Vec::new();
        let p = player as usize;
        if p >= PLAYER_COUNT || !self.is_pending(p) {
            return actions;
        }

        match self.phase {
            GamePhase::Main => {
                let state = &self.players[p];
                let hand: Vec<Creature> = state.hand.iter().copied().collect();

                let mut picks: Vec<Vec<Creature>> = Vec::new();
                if state.creatures_to_select(self.turn) == 2 {
                    for (i, first) in hand.iter().enumerate() {
                        for second in &hand[i + 1..] {
                            picks.push(vec![*first, *second]);
                        }
                    }
                } else {
                    picks.extend(hand.iter().map(|c| vec![*c]));
                }

                for creatures in picks {
                    for edict in &state.edicts {
                        actions.push(PlayerAction::Main {
                            creatures: creatures.clone(),
                            edict: *edict,
                        });
                    }
                }
            }

            GamePhase::Sabotage => {
                for guess in Creature::ALL {
                    actions.push(PlayerAction::Sabotage { guess });
                }
            }

            GamePhase::Seer => {
                if let Some(selection) = &self.slots.main[p] {
                    for creature in &selection.creatures {
                        actions.push(PlayerAction::Seer {
                            return_to_hand: *creature,
                        });
                    }
                }
            }

            GamePhase::Finished => {}
        }

        actions
    }

    /// Apply a submission. On error nothing changes.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: PlayerAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if player as usize >= PLAYER_COUNT {
            return Err(IllegalAction::UnknownPlayer(player).into());
        }

        let mut events = Vec::new();

        match action {
            PlayerAction::Main { creatures, edict } => {
                self.submit_main_selection(player, creatures, edict, &mut events)?
            }
            PlayerAction::Sabotage { guess } => self.record_sabotage(player, guess, &mut events)?,
            PlayerAction::Seer { return_to_hand } => {
                self.resolve_seer_choice(player, return_to_hand, &mut events)?
            }
        }

        Ok(events)
    }

    pub fn submit_main(
        &mut self,
        player: PlayerId,
        creatures: Vec<Creature>,
        edict: Edict,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(player, PlayerAction::Main { creatures, edict })
    }

    pub fn submit_sabotage(
        &mut self,
        player: PlayerId,
        guess: Creature,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(player, PlayerAction::Sabotage { guess })
    }

    pub fn submit_seer(
        &mut self,
        player: PlayerId,
        return_to_hand: Creature,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(player, PlayerAction::Seer { return_to_hand })
    }

    /// Submit a random legal action for a player the game is waiting on.
    ///
    /// Deadlines are up to the caller; this is what it calls when one passes.
    pub fn force_default<R: Rng>(
        &mut self,
        player: PlayerId,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }

        let action = self
            .legal_actions(player)
            .choose(rng)
            .cloned()
            .ok_or(IllegalAction::NoActionRequired)?;

        warn!(player, ?action, phase = ?self.phase, "forcing default action");
        self.apply_action(player, action)
    }

    // ==================== Main phase ====================

    fn submit_main_selection(
        &mut self,
        player: PlayerId,
        creatures: Vec<Creature>,
        edict: Edict,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), IllegalAction> {
        if self.phase != GamePhase::Main {
            return Err(IllegalAction::WrongPhase(self.phase));
        }

        let p = player as usize;
        if self.slots.main[p].is_some() {
            return Err(IllegalAction::DuplicateSubmission);
        }

        let state = &self.players[p];
        let expected = state.creatures_to_select(self.turn);
        if creatures.len() != expected {
            return Err(IllegalAction::WrongCreatureCount {
                expected,
                got: creatures.len(),
            });
        }
        if creatures.len() == 2 && creatures[0] == creatures[1] {
            return Err(IllegalAction::DuplicateCreature);
        }
        if let Some(missing) = creatures.iter().find(|c| !state.has_creature(**c)) {
            return Err(IllegalAction::CreatureNotInHand(*missing));
        }
        if !state.has_edict(edict) {
            return Err(IllegalAction::EdictNotInHand(edict));
        }

        debug!(player, turn = self.turn, "main phase pick locked in");
        self.slots.main[p] = Some(MainSelection { creatures, edict });
        events.push(GameEvent::MainPhaseSubmitted { player });

        if let [Some(first), Some(second)] = &self.slots.main {
            let edicts = [first.edict, second.edict];
            self.reveal_edicts(edicts, events);
        }

        Ok(())
    }

    fn reveal_edicts(&mut self, edicts: [Edict; 2], events: &mut Vec<GameEvent>) {
        self.slots.edicts_revealed = true;
        events.push(GameEvent::EdictsRevealed { edicts });

        if edicts.contains(&Edict::Sabotage) {
            debug!(turn = self.turn, "entering sabotage phase");
            self.phase = GamePhase::Sabotage;
        } else {
            self.reveal_creatures(events);
        }
    }

    // ==================== Sabotage phase ====================

    fn record_sabotage(
        &mut self,
        player: PlayerId,
        guess: Creature,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), IllegalAction> {
        if self.phase != GamePhase::Sabotage {
            return Err(IllegalAction::WrongPhase(self.phase));
        }

        let p = player as usize;
        if self.slots.sabotage[p].is_some() {
            return Err(IllegalAction::DuplicateSubmission);
        }
        if !self.sabotage_pending(p) {
            return Err(IllegalAction::NoActionRequired);
        }

        debug!(player, %guess, "sabotage guess");
        self.slots.sabotage[p] = Some(guess);

        // Guesses are simultaneous and only shown once everyone has guessed
        if !(0..PLAYER_COUNT).any(|p| self.sabotage_pending(p)) {
            for (p, guess) in self.slots.sabotage.iter().enumerate() {
                if let Some(guess) = *guess {
                    events.push(GameEvent::SabotageGuessed {
                        player: p as PlayerId,
                        guess,
                    });
                }
            }
            self.reveal_creatures(events);
        }

        Ok(())
    }

    // ==================== Seer phase ====================

    /// Players with a single creature show it. A shown Rogue takes the
    /// choice away from an opposing seer, who keeps their first pick.
    fn reveal_creatures(&mut self, events: &mut Vec<GameEvent>) {
        for p in 0..PLAYER_COUNT {
            let single = match &self.slots.main[p] {
                Some(selection) if selection.creatures.len() == 1 => selection.creatures[0],
                _ => continue,
            };
            self.slots.fighting[p] = Some(single);
            self.slots.revealed[p] = true;
            events.push(GameEvent::CreatureRevealed {
                player: p as PlayerId,
                creature: single,
            });
        }

        for p in 0..PLAYER_COUNT {
            let rogue_shown =
                self.slots.revealed[1 - p] && self.slots.fighting[1 - p] == Some(Creature::Rogue);
            if !rogue_shown || self.slots.fighting[p].is_some() {
                continue;
            }
            let kept = match self.slots.main[p].as_ref().map(|s| s.creatures.as_slice()) {
                Some(&[kept, _]) => kept,
                _ => continue,
            };

            debug!(player = p, %kept, "seer negated by rogue");
            self.slots.fighting[p] = Some(kept);
            self.slots.revealed[p] = true;
            events.push(GameEvent::SeerNegated {
                player: p as PlayerId,
                kept,
            });
        }

        if self.slots.fighting.iter().all(Option::is_some) {
            self.evaluate(events);
        } else {
            debug!(turn = self.turn, "entering seer phase");
            self.phase = GamePhase::Seer;
        }
    }

    fn resolve_seer_choice(
        &mut self,
        player: PlayerId,
        return_to_hand: Creature,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), IllegalAction> {
        if self.phase != GamePhase::Seer {
            return Err(IllegalAction::WrongPhase(self.phase));
        }

        let p = player as usize;
        let pair = match self.slots.main[p].as_ref().map(|s| s.creatures.as_slice()) {
            Some(&[a, b]) => (a, b),
            _ => return Err(IllegalAction::NoActionRequired),
        };
        if self.slots.fighting[p].is_some() {
            return Err(IllegalAction::DuplicateSubmission);
        }

        let kept = if pair.0 == return_to_hand {
            pair.1
        } else if pair.1 == return_to_hand {
            pair.0
        } else {
            return Err(IllegalAction::NotSelected(return_to_hand));
        };

        debug!(player, "seer choice made");
        self.slots.fighting[p] = Some(kept);
        events.push(GameEvent::SeerResolved { player });

        if self.slots.fighting.iter().all(Option::is_some) {
            self.evaluate(events);
        }

        Ok(())
    }

    // ==================== Evaluation ====================

    fn evaluate(&mut self, events: &mut Vec<GameEvent>) {
        let turn = self.turn;
        let battlefield = self.current_battlefield();

        let (creatures, edicts) = match (&self.slots.main, self.slots.fighting) {
            ([Some(first), Some(second)], [Some(a), Some(b)]) => {
                ([a, b], [first.edict, second.edict])
            }
            _ => unreachable!("battle evaluated before both creatures were settled"),
        };

        for p in 0..PLAYER_COUNT {
            if !self.slots.revealed[p] {
                self.slots.revealed[p] = true;
                events.push(GameEvent::CreatureRevealed {
                    player: p as PlayerId,
                    creature: creatures[p],
                });
            }
        }

        let sides = [0usize, 1].map(|p| BattleSide {
            creature: creatures[p],
            edict: edicts[p],
            sabotage_guess: self.slots.sabotage[p],
            status: self.players[p].effects.active_on(turn),
        });
        let input = BattleInput {
            sides,
            battlefield,
            night: self.global_effects.is_active(GlobalEffect::Night, turn),
            barbarian_played: self.graveyard.contains_creature(Creature::Barbarian),
        };

        let outcome = battle::resolve(&input, &self.rules);
        info!(
            turn,
            %battlefield,
            winner = ?outcome.winner,
            reason = ?outcome.reason,
            deltas = ?outcome.point_deltas,
            "battle resolved"
        );

        // Cards leave the table. A Steward's edicts go back to hand instead.
        for p in 0..PLAYER_COUNT {
            let player = &mut self.players[p];
            player.play_creature(creatures[p]);
            player.play_edict(edicts[p]);
            self.graveyard
                .push(turn, p as PlayerId, PlayedCard::Creature(creatures[p]));

            if outcome.edicts_returned[p] {
                player.restore_edicts();
                events.push(GameEvent::EdictsReturned {
                    player: p as PlayerId,
                });
            } else {
                self.graveyard
                    .push(turn, p as PlayerId, PlayedCard::Edict(edicts[p]));
            }
        }

        score::apply(&mut self.players, outcome.point_deltas);

        // Effects for this turn are spent whether they mattered or not
        for player in &mut self.players {
            player.effects.expire(turn);
        }
        self.global_effects.expire(turn);

        if (turn as usize) < TURN_COUNT {
            let next = turn + 1;
            for grant in &outcome.status_grants {
                self.players[grant.player as usize]
                    .effects
                    .schedule(grant.effect, next);
            }
            if battlefield.effect() == BattlefieldEffect::Night {
                self.global_effects.schedule(GlobalEffect::Night, next);
            }
        }

        let result = TurnResult {
            turn,
            battlefield,
            creatures,
            edicts,
            sabotage_guesses: self.slots.sabotage,
            outcome,
            scores_after: self.scores(),
        };
        self.history.push(result.clone());
        events.push(GameEvent::BattleResolved(Box::new(result)));

        self.slots = TurnSlots::default();
        if turn as usize == TURN_COUNT {
            self.finish(events);
        } else {
            self.turn += 1;
            self.phase = GamePhase::Main;
            events.push(GameEvent::TurnEnded {
                turn,
                next_battlefield: self.current_battlefield(),
            });
        }
    }

    fn finish(&mut self, events: &mut Vec<GameEvent>) {
        let scores = self.scores();
        let result = score::final_result(scores);

        info!(?result, ?scores, "game over");
        self.result = Some(result);
        self.phase = GamePhase::Finished;

        events.push(GameEvent::GameEnded {
            result,
            scores,
            overseer: self.rules.reveal_overseer_at_end.then_some(self.overseer),
        });
    }
}
