//! Replay script format.
//!
//! A script is a JSON document describing one game:
//!
//! ```json
//! {
//!   "seed": 7,
//!   "rules": { "sabotage_strength": 3 },
//!   "steps": [
//!     { "player": 0, "action": { "Main": { "creatures": ["Witch"], "edict": "Gambit" } } },
//!     { "player": 1, "action": { "Main": { "creatures": ["Bard"], "edict": "Ambush" } } }
//!   ],
//!   "autofill": true
//! }
//! ```
//!
//! Without an explicit `setup` the game is dealt from `seed`.

use echo_core::{GameError, PlayerAction, PlayerId, RuleConfig, Setup};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not start the game: {0}")]
    Start(#[source] GameError),

    #[error("Autofill failed: {0}")]
    Autofill(#[source] GameError),

    #[error("Could not build a view: {0}")]
    View(#[source] GameError),
}

/// One scripted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub player: PlayerId,
    pub action: PlayerAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Explicit deal; dealt at random when absent
    pub setup: Option<Setup>,
    /// Seed for the random deal and for autofilled choices
    pub seed: Option<u64>,
    pub rules: Option<RuleConfig>,
    pub steps: Vec<Step>,
    /// Play random legal actions after the last step until the game ends
    pub autofill: bool,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }
}
