//! Echo - a two-player hidden-information card game engine
//!
//! This crate provides the rules engine for Echo, including:
//! - The card catalog (creatures, edicts, battlefields)
//! - Battle resolution and victory point scoring
//! - Status effects that carry from one battle into the next
//! - The turn state machine with simultaneous, hidden submissions
//! - Per-player views that never leak the opponent's hidden cards
//!
//! # Architecture
//!
//! The engine is transport-agnostic. Hosts feed it [`PlayerAction`]s and
//! forward the [`GameEvent`]s it returns; timing, matchmaking and storage
//! all live outside this crate.
//!
//! # Modules
//!
//! - [`cards`]: Static catalog of creatures, edicts and battlefields
//! - [`effects`]: Turn-scoped status and global effects
//! - [`battle`]: Pure battle resolution
//! - [`score`]: Victory point bookkeeping and the final result
//! - [`game`]: Game state machine with full rule enforcement
//! - [`view`]: Hidden-information views for each seat

pub mod actions;
pub mod battle;
pub mod cards;
pub mod effects;
pub mod game;
pub mod player;
pub mod rules;
pub mod score;
pub mod setup;
pub mod view;

// Re-export commonly used types
pub use actions::{GameEvent, MainSelection, PlayerAction, TurnResult};
pub use battle::{
    resolve, BattleInput, BattleOutcome, BattleReason, BattleSide, BattleWinner, Negation,
    RuleNote, SideReport,
};
pub use cards::{opponent, Battlefield, BattlefieldEffect, Creature, Edict, PlayerId, PLAYER_COUNT};
pub use effects::{EffectSchedule, GlobalEffect, Scheduled, StatusEffect, StatusGrant};
pub use game::{GameError, GamePhase, GameState, Graveyard, GraveyardEntry, IllegalAction, PlayedCard};
pub use player::PlayerState;
pub use rules::RuleConfig;
pub use score::GameResult;
pub use setup::{Setup, SetupError, HAND_SIZE, TURN_COUNT};
pub use view::{OpponentView, PlayerView};
