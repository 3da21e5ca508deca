//! Battle resolution.
//!
//! [`resolve`] is a pure function from the two revealed cards, the active
//! battlefield and the status effects in play to a [`BattleOutcome`]. The
//! steps run in a fixed order, and the order is part of the rules:
//!
//! 1. Negation: a Witch negates the opposing creature, a Rogue negates a Seer.
//! 2. Instant wins: Rogue beats Monarch and Wall, Witch beats Wall.
//! 3. Any other Wall forces a tie.
//! 4. Diplomat wins when both edicts are the same.
//! 5. Strength comparison, with Gambit losing ties.
//!
//! Points are worked out by [`crate::score`] from the winner found here.

use crate::cards::{opponent, Battlefield, BattlefieldEffect, Creature, Edict, PlayerId};
use crate::effects::{StatusEffect, StatusGrant};
use crate::rules::RuleConfig;
use crate::score::{self, Award};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;

/// Battlefield bonus strength
const BATTLEFIELD_BONUS: i32 = 2;

/// One player's revealed cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSide {
    pub creature: Creature,
    pub edict: Edict,
    /// Creature named during the sabotage phase, if any
    pub sabotage_guess: Option<Creature>,
    /// Status effects active for this player this turn
    pub status: Vec<StatusEffect>,
}

impl BattleSide {
    pub fn new(creature: Creature, edict: Edict) -> Self {
        Self {
            creature,
            edict,
            sabotage_guess: None,
            status: Vec::new(),
        }
    }

    pub fn with_status(mut self, effect: StatusEffect) -> Self {
        self.status.push(effect);
        self
    }

    pub fn with_guess(mut self, guess: Creature) -> Self {
        self.sabotage_guess = Some(guess);
        self
    }

    pub fn has(&self, effect: StatusEffect) -> bool {
        self.status.contains(&effect)
    }
}

/// Read-only view of everything a battle depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleInput {
    pub sides: [BattleSide; 2],
    pub battlefield: Battlefield,
    /// The previous battle was fought at Night
    pub night: bool,
    /// The Barbarian was played in an earlier turn
    pub barbarian_played: bool,
}

impl BattleInput {
    pub fn new(first: BattleSide, second: BattleSide, battlefield: Battlefield) -> Self {
        Self {
            sides: [first, second],
            battlefield,
            night: false,
            barbarian_played: false,
        }
    }

    pub fn edicts(&self) -> [Edict; 2] {
        [self.sides[0].edict, self.sides[1].edict]
    }
}

/// Why a creature's effect is switched off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Negation {
    /// The opponent played the Witch
    ByWitch,
    /// A Seer facing the Rogue
    ByRogue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleWinner {
    Player(PlayerId),
    Tie,
}

impl BattleWinner {
    pub fn player(self) -> Option<PlayerId> {
        match self {
            BattleWinner::Player(p) => Some(p),
            BattleWinner::Tie => None,
        }
    }

    pub fn is_tie(self) -> bool {
        self == BattleWinner::Tie
    }
}

/// Which rule decided the battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleReason {
    /// A creature beat its counter outright (Rogue or Witch)
    InstantWin(Creature),
    WallTie,
    /// Diplomat with matching edicts
    Diplomat,
    /// Higher final strength
    Strength,
    /// Equal strength and exactly one Gambit
    GambitTieBreak,
    /// Equal strength with no Gambit, or Gambits on both sides
    EqualStrength,
}

/// Rule situations the cards do not settle, and how they were settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleNote {
    /// Both sides qualified for a Diplomat win; resolved as a tie
    AmbiguousDiplomat,
}

/// Per-side breakdown of the battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideReport {
    pub negated: Option<Negation>,
    pub battlefield_bonus: bool,
    pub edict_multiplier: u8,
    pub strength: i32,
}

/// Result of a single battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub winner: BattleWinner,
    pub reason: BattleReason,
    pub sides: [SideReport; 2],
    /// Points the winner earns from the battlefield (0 on a tie)
    pub reward: i32,
    /// Points gained by each player this battle
    pub point_deltas: [i32; 2],
    /// Effects for the next turn
    pub status_grants: Vec<StatusGrant>,
    /// Players whose Steward takes their edicts back
    pub edicts_returned: [bool; 2],
    pub notes: Vec<RuleNote>,
}

/// The battle seen from one side
#[derive(Clone, Copy)]
struct Matchup<'a> {
    input: &'a BattleInput,
    me: usize,
}

impl<'a> Matchup<'a> {
    fn new(input: &'a BattleInput, me: usize) -> Self {
        Self { input, me }
    }

    fn flip(self) -> Self {
        Self::new(self.input, 1 - self.me)
    }

    fn mine(&self) -> &'a BattleSide {
        &self.input.sides[self.me]
    }

    fn theirs(&self) -> &'a BattleSide {
        &self.input.sides[1 - self.me]
    }

    fn negation(&self) -> Option<Negation> {
        match (self.mine().creature, self.theirs().creature) {
            (_, Creature::Witch) => Some(Negation::ByWitch),
            (Creature::Seer, Creature::Rogue) => Some(Negation::ByRogue),
            _ => None,
        }
    }

    /// We played `creature` and its effect is live
    fn is_active(&self, creature: Creature) -> bool {
        self.mine().creature == creature && self.negation().is_none()
    }

    fn has_bonus(&self) -> bool {
        self.input.battlefield.grants_bonus(self.mine().creature)
            && self.negation() != Some(Negation::ByWitch)
    }

    fn edict_multiplier(&self) -> u8 {
        let mut multiplier = 1;
        if self.input.battlefield.effect() == BattlefieldEffect::Urban {
            multiplier += 1;
        }
        if self.is_active(Creature::Steward) {
            multiplier += 1;
        }
        multiplier
    }

    fn instant_win(&self) -> bool {
        let theirs = self.theirs().creature;
        (self.is_active(Creature::Rogue) && matches!(theirs, Creature::Monarch | Creature::Wall))
            || (self.is_active(Creature::Witch) && theirs == Creature::Wall)
    }

    fn diplomat_win(&self) -> bool {
        self.is_active(Creature::Diplomat) && self.mine().edict == self.theirs().edict
    }

    fn edict_strength(&self, rules: &RuleConfig) -> i32 {
        // The Witch never gains strength from edicts
        if self.mine().creature == Creature::Witch {
            return 0;
        }

        let bonus = match self.mine().edict {
            Edict::Gambit => 1,
            Edict::Ambush if self.has_bonus() => 1,
            Edict::Sabotage if self.mine().sabotage_guess == Some(self.theirs().creature) => {
                rules.sabotage_strength as i32
            }
            _ => 0,
        };

        bonus * self.edict_multiplier() as i32
    }

    fn creature_strength(&self) -> i32 {
        if self.is_active(Creature::Ranger) && self.has_bonus() && !self.flip().has_bonus() {
            2
        } else if self.is_active(Creature::Barbarian) && self.mine().has(StatusEffect::Barbarian) {
            2
        } else {
            0
        }
    }

    fn status_strength(&self) -> i32 {
        let side = self.mine();
        let mut total = 0;
        if side.has(StatusEffect::Bard) {
            total += 1;
        }
        if side.has(StatusEffect::Mountain) {
            total += 1;
        }
        if side.has(StatusEffect::Mercenary) {
            total -= 1;
        }
        total
    }

    fn strength(&self, rules: &RuleConfig) -> i32 {
        let base = self.mine().creature.strength() as i32;
        let bonus = if self.has_bonus() { BATTLEFIELD_BONUS } else { 0 };
        let edict = self.edict_strength(rules);
        let creature = self.creature_strength();
        let status = self.status_strength();

        trace!(
            player = self.me,
            creature = %self.mine().creature,
            base,
            bonus,
            edict,
            creature_bonus = creature,
            status,
            "strength breakdown"
        );

        base + bonus + edict + creature + status
    }

    fn report(&self, rules: &RuleConfig) -> SideReport {
        SideReport {
            negated: self.negation(),
            battlefield_bonus: self.has_bonus(),
            edict_multiplier: self.edict_multiplier(),
            strength: self.strength(rules),
        }
    }
}

/// Resolve one battle
pub fn resolve(input: &BattleInput, rules: &RuleConfig) -> BattleOutcome {
    let views = [Matchup::new(input, 0), Matchup::new(input, 1)];
    let sides = [views[0].report(rules), views[1].report(rules)];
    let mut notes = Vec::new();

    let (winner, reason) = decide(input, &views, &sides, &mut notes);

    let monarch_owner = (0..2u8).find(|&p| views[p as usize].is_active(Creature::Monarch));
    let Award {
        reward,
        point_deltas,
    } = score::award(input, winner, monarch_owner, rules);

    let status_grants = status_grants(input, &views, winner);
    let edicts_returned = [
        views[0].is_active(Creature::Steward),
        views[1].is_active(Creature::Steward),
    ];

    BattleOutcome {
        winner,
        reason,
        sides,
        reward,
        point_deltas,
        status_grants,
        edicts_returned,
        notes,
    }
}

fn decide(
    input: &BattleInput,
    views: &[Matchup<'_>; 2],
    sides: &[SideReport; 2],
    notes: &mut Vec<RuleNote>,
) -> (BattleWinner, BattleReason) {
    if let Some(p) = (0..2).find(|&p| views[p].instant_win()) {
        let creature = input.sides[p].creature;
        return (BattleWinner::Player(p as PlayerId), BattleReason::InstantWin(creature));
    }

    if input.sides.iter().any(|s| s.creature == Creature::Wall) {
        return (BattleWinner::Tie, BattleReason::WallTie);
    }

    let diplomats: Vec<usize> = (0..2).filter(|&p| views[p].diplomat_win()).collect();
    match diplomats.as_slice() {
        [p] => return (BattleWinner::Player(*p as PlayerId), BattleReason::Diplomat),
        // Creatures are unique so this needs a doctored input, but it must
        // still resolve to something documented.
        [_, _] => {
            notes.push(RuleNote::AmbiguousDiplomat);
            return (BattleWinner::Tie, BattleReason::Diplomat);
        }
        _ => {}
    }

    match sides[0].strength.cmp(&sides[1].strength) {
        Ordering::Greater => (BattleWinner::Player(0), BattleReason::Strength),
        Ordering::Less => (BattleWinner::Player(1), BattleReason::Strength),
        Ordering::Equal => gambit_tie_break(input.edicts()),
    }
}

/// A lone Gambit loses ties
fn gambit_tie_break(edicts: [Edict; 2]) -> (BattleWinner, BattleReason) {
    match (edicts[0] == Edict::Gambit, edicts[1] == Edict::Gambit) {
        (true, false) => (BattleWinner::Player(1), BattleReason::GambitTieBreak),
        (false, true) => (BattleWinner::Player(0), BattleReason::GambitTieBreak),
        _ => (BattleWinner::Tie, BattleReason::EqualStrength),
    }
}

fn status_grants(
    input: &BattleInput,
    views: &[Matchup<'_>; 2],
    winner: BattleWinner,
) -> Vec<StatusGrant> {
    let mut grants = Vec::new();

    if let BattleWinner::Player(winner) = winner {
        let loser = opponent(winner);
        match input.battlefield.effect() {
            BattlefieldEffect::Glade => grants.push(StatusGrant {
                player: winner,
                effect: StatusEffect::Glade,
            }),
            BattlefieldEffect::Mountain => grants.push(StatusGrant {
                player: winner,
                effect: StatusEffect::Mountain,
            }),
            _ => {}
        }

        let barbarian_gone = input.barbarian_played
            || input.sides.iter().any(|s| s.creature == Creature::Barbarian);
        if !barbarian_gone {
            grants.push(StatusGrant {
                player: loser,
                effect: StatusEffect::Barbarian,
            });
        }
    }

    let lingering = [
        (Creature::Seer, StatusEffect::Seer),
        (Creature::Bard, StatusEffect::Bard),
        (Creature::Mercenary, StatusEffect::Mercenary),
    ];
    for (player, view) in views.iter().enumerate() {
        for (creature, effect) in lingering {
            if view.is_active(creature) {
                grants.push(StatusGrant {
                    player: player as PlayerId,
                    effect,
                });
            }
        }
    }

    grants
}
