//! Victory point bookkeeping.
//!
//! Works out what a battle is worth, applies the result to the players and
//! decides the game once the last battle is over.

use crate::battle::{BattleInput, BattleWinner};
use crate::cards::{opponent, Edict, PlayerId};
use crate::effects::StatusEffect;
use crate::player::PlayerState;
use crate::rules::RuleConfig;
use serde::{Deserialize, Serialize};

/// Extra points the opponent gets when the Monarch does not win
const MONARCH_BOUNTY: i32 = 2;

/// Points handed out by one battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    /// What the battlefield paid the winner
    pub reward: i32,
    pub point_deltas: [i32; 2],
}

/// Final outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    Tie,
}

/// Net change to a battle's value from the victory point edicts.
///
/// Rile the Public adds one point and Divert Attention takes one away, but a
/// Rile played against a Divert spends itself cancelling it.
pub fn edict_adjustment(edicts: [Edict; 2]) -> i32 {
    use Edict::*;

    match edicts {
        [RileThePublic, DivertAttention] | [DivertAttention, RileThePublic] => 0,
        _ => edicts
            .iter()
            .map(|e| match e {
                RileThePublic => 1,
                DivertAttention => -1,
                _ => 0,
            })
            .sum(),
    }
}

/// Points the winner of this battle earns
pub fn battle_reward(input: &BattleInput, winner: PlayerId, rules: &RuleConfig) -> i32 {
    let side = &input.sides[winner as usize];
    let mut total = input.battlefield.reward() as i32;

    if input.night {
        total += 1;
    }
    if side.has(StatusEffect::Bard) {
        total += 1;
    }
    if side.has(StatusEffect::Glade) {
        total += 2;
    }

    total += edict_adjustment(input.edicts());

    if rules.clamp_negative_reward {
        total.max(0)
    } else {
        total
    }
}

/// Points for both players. `monarch_owner` is the player whose Monarch
/// was played with its effect intact.
pub fn award(
    input: &BattleInput,
    winner: BattleWinner,
    monarch_owner: Option<PlayerId>,
    rules: &RuleConfig,
) -> Award {
    let mut point_deltas = [0; 2];
    let mut reward = 0;

    if let BattleWinner::Player(p) = winner {
        reward = battle_reward(input, p, rules);
        point_deltas[p as usize] += reward;
    }

    if let Some(owner) = monarch_owner {
        if winner != BattleWinner::Player(owner) {
            point_deltas[opponent(owner) as usize] += MONARCH_BOUNTY;
        }
    }

    Award {
        reward,
        point_deltas,
    }
}

/// Add a battle's points to the running totals
pub fn apply(players: &mut [PlayerState; 2], point_deltas: [i32; 2]) {
    for (player, delta) in players.iter_mut().zip(point_deltas) {
        player.add_points(delta);
    }
}

pub fn scores(players: &[PlayerState; 2]) -> [u32; 2] {
    [players[0].victory_points, players[1].victory_points]
}

/// Strictly more points wins; equal totals are a tie
pub fn final_result(scores: [u32; 2]) -> GameResult {
    match scores[0].cmp(&scores[1]) {
        std::cmp::Ordering::Greater => GameResult::Winner(0),
        std::cmp::Ordering::Less => GameResult::Winner(1),
        std::cmp::Ordering::Equal => GameResult::Tie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::BattleSide;
    use crate::cards::{Battlefield, Creature};

    fn input(winner_status: &[StatusEffect], edicts: [Edict; 2], field: Battlefield) -> BattleInput {
        let mut first = BattleSide::new(Creature::Monarch, edicts[0]);
        for effect in winner_status {
            first = first.with_status(*effect);
        }
        BattleInput::new(first, BattleSide::new(Creature::Bard, edicts[1]), field)
    }

    #[test]
    fn test_edict_adjustment() {
        use Edict::*;
        assert_eq!(edict_adjustment([RileThePublic, DivertAttention]), 0);
        assert_eq!(edict_adjustment([DivertAttention, RileThePublic]), 0);
        assert_eq!(edict_adjustment([RileThePublic, RileThePublic]), 2);
        assert_eq!(edict_adjustment([DivertAttention, DivertAttention]), -2);
        assert_eq!(edict_adjustment([RileThePublic, Gambit]), 1);
        assert_eq!(edict_adjustment([Ambush, DivertAttention]), -1);
        assert_eq!(edict_adjustment([Ambush, Gambit]), 0);
    }

    #[test]
    fn test_base_rewards() {
        let rules = RuleConfig::default();
        let plains = input(&[], [Edict::Ambush, Edict::Gambit], Battlefield::Plains);
        assert_eq!(battle_reward(&plains, 0, &rules), 3);

        let last = input(&[], [Edict::Ambush, Edict::Gambit], Battlefield::LastStrand);
        assert_eq!(battle_reward(&last, 0, &rules), 5);
    }

    #[test]
    fn test_lingering_reward_bonuses() {
        let rules = RuleConfig::default();
        let mut battle = input(
            &[StatusEffect::Glade, StatusEffect::Bard],
            [Edict::Ambush, Edict::Gambit],
            Battlefield::Plains,
        );
        battle.night = true;
        // 3 + 2 Glade + 1 Bard + 1 Night
        assert_eq!(battle_reward(&battle, 0, &rules), 7);
        // The loser's lingering effects do not count for the other side
        assert_eq!(battle_reward(&battle, 1, &rules), 4);
    }

    #[test]
    fn test_double_divert_reduces_reward() {
        let battle = input(
            &[],
            [Edict::DivertAttention, Edict::DivertAttention],
            Battlefield::Plains,
        );
        assert_eq!(battle_reward(&battle, 0, &RuleConfig::default()), 1);

        let rules = RuleConfig {
            clamp_negative_reward: false,
            ..RuleConfig::default()
        };
        assert_eq!(battle_reward(&battle, 0, &rules), 1);
    }

    #[test]
    fn test_award_with_monarch() {
        let rules = RuleConfig::default();
        let battle = input(&[], [Edict::Ambush, Edict::Gambit], Battlefield::Plains);

        let award = super::award(&battle, BattleWinner::Player(1), Some(0), &rules);
        assert_eq!(award.reward, 3);
        assert_eq!(award.point_deltas, [0, 5]);

        let award = super::award(&battle, BattleWinner::Tie, Some(0), &rules);
        assert_eq!(award.reward, 0);
        assert_eq!(award.point_deltas, [0, 2]);

        let award = super::award(&battle, BattleWinner::Player(0), Some(0), &rules);
        assert_eq!(award.point_deltas, [3, 0]);
    }

    #[test]
    fn test_apply_and_final_result() {
        let mut players = [PlayerState::new(0, []), PlayerState::new(1, [])];
        apply(&mut players, [3, 0]);
        apply(&mut players, [0, 5]);
        assert_eq!(scores(&players), [3, 5]);
        assert_eq!(final_result(scores(&players)), GameResult::Winner(1));

        apply(&mut players, [2, 0]);
        assert_eq!(final_result(scores(&players)), GameResult::Tie);
    }
}
