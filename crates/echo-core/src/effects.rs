//! Status effects that linger from one battle into the next.
//!
//! Every effect is scheduled for one specific turn. Once that turn has been
//! evaluated the effect is gone, whether or not it changed anything.

use crate::cards::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Effects attached to a single player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusEffect {
    /// Play two creatures, keep one after the opponent reveals
    Seer,
    /// +1 strength, and +1 victory point when winning
    Bard,
    /// A played Barbarian gains +2 strength
    Barbarian,
    /// -1 strength
    Mercenary,
    /// +2 victory points when winning
    Glade,
    /// +1 strength
    Mountain,
}

impl StatusEffect {
    pub const ALL: [StatusEffect; 6] = [
        StatusEffect::Seer,
        StatusEffect::Bard,
        StatusEffect::Barbarian,
        StatusEffect::Mercenary,
        StatusEffect::Glade,
        StatusEffect::Mountain,
    ];
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Effects shared by both players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GlobalEffect {
    /// The winner of this battle gains +1 victory point
    Night,
}

/// An effect together with the turn it applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduled<E> {
    pub effect: E,
    pub turn: u8,
}

/// A status effect handed to a player by a battle, for the following turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusGrant {
    pub player: PlayerId,
    pub effect: StatusEffect,
}

/// Turn-scoped effect list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSchedule<E> {
    entries: Vec<Scheduled<E>>,
}

impl<E> Default for EffectSchedule<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: Copy + PartialEq> EffectSchedule<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an effect for a turn. Scheduling the same effect twice is a no-op.
    pub fn schedule(&mut self, effect: E, turn: u8) {
        if !self.is_active(effect, turn) {
            self.entries.push(Scheduled { effect, turn });
        }
    }

    pub fn is_active(&self, effect: E, turn: u8) -> bool {
        self.entries
            .iter()
            .any(|s| s.effect == effect && s.turn == turn)
    }

    /// Effects applying to the given turn
    pub fn active_on(&self, turn: u8) -> Vec<E> {
        self.entries
            .iter()
            .filter(|s| s.turn == turn)
            .map(|s| s.effect)
            .collect()
    }

    /// Drop everything scheduled for `turn` or earlier
    pub fn expire(&mut self, turn: u8) {
        self.entries.retain(|s| s.turn > turn);
    }

    pub fn entries(&self) -> &[Scheduled<E>] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_applies_to_one_turn_only() {
        let mut schedule = EffectSchedule::new();
        schedule.schedule(StatusEffect::Bard, 2);

        assert!(!schedule.is_active(StatusEffect::Bard, 1));
        assert!(schedule.is_active(StatusEffect::Bard, 2));
        assert!(!schedule.is_active(StatusEffect::Bard, 3));
    }

    #[test]
    fn test_expire_clears_unconsumed_effects() {
        let mut schedule = EffectSchedule::new();
        schedule.schedule(StatusEffect::Glade, 2);
        schedule.schedule(StatusEffect::Mountain, 3);

        schedule.expire(2);

        assert!(schedule.active_on(2).is_empty());
        assert_eq!(schedule.active_on(3), vec![StatusEffect::Mountain]);
    }

    #[test]
    fn test_schedule_is_idempotent() {
        let mut schedule = EffectSchedule::new();
        schedule.schedule(GlobalEffect::Night, 4);
        schedule.schedule(GlobalEffect::Night, 4);
        assert_eq!(schedule.entries().len(), 1);
    }
}
