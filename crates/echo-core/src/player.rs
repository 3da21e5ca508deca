//! Player state: hands, victory points and status effects.
//!
//! This module contains:
//! - PlayerState with the creature hand and edict hand of one seat
//! - Victory point bookkeeping (never below zero)
//! - The per-player status effect schedule

use crate::cards::{Creature, Edict, PlayerId};
use crate::effects::{EffectSchedule, StatusEffect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the engine tracks about one seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    /// Creatures not yet played (hidden from the opponent)
    pub hand: BTreeSet<Creature>,
    /// Edicts still available (public knowledge)
    pub edicts: BTreeSet<Edict>,
    pub victory_points: u32,
    pub effects: EffectSchedule<StatusEffect>,
}

impl PlayerState {
    /// Create a player holding the dealt creatures and a full edict hand
    pub fn new(id: PlayerId, hand: impl IntoIterator<Item = Creature>) -> Self {
        Self {
            id,
            hand: hand.into_iter().collect(),
            edicts: Edict::ALL.into_iter().collect(),
            victory_points: 0,
            effects: EffectSchedule::new(),
        }
    }

    pub fn has_creature(&self, creature: Creature) -> bool {
        self.hand.contains(&creature)
    }

    pub fn has_edict(&self, edict: Edict) -> bool {
        self.edicts.contains(&edict)
    }

    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Remove a played creature. Returns false if it was not in hand.
    pub fn play_creature(&mut self, creature: Creature) -> bool {
        self.hand.remove(&creature)
    }

    /// Remove a played edict. Returns false if it was not in hand.
    pub fn play_edict(&mut self, edict: Edict) -> bool {
        self.edicts.remove(&edict)
    }

    /// Take every edict back into hand (Steward)
    pub fn restore_edicts(&mut self) {
        self.edicts = Edict::ALL.into_iter().collect();
    }

    pub fn has_effect(&self, effect: StatusEffect, turn: u8) -> bool {
        self.effects.is_active(effect, turn)
    }

    /// Number of creatures this player must put forward on `turn`
    pub fn creatures_to_select(&self, turn: u8) -> usize {
        if self.has_effect(StatusEffect::Seer, turn) {
            self.hand.len().min(2)
        } else {
            1
        }
    }

    /// Apply a point change. The running total never drops below zero.
    pub fn add_points(&mut self, delta: i32) {
        let total = self.victory_points as i64 + delta as i64;
        self.victory_points = total.max(0) as u32;
    }
}
