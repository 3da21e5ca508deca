//! Plays a script against the engine and collects what happened.

use crate::script::{Script, ScriptError};
use echo_core::{GameEvent, GameState, PlayerId, PlayerView, RuleConfig, Setup, PLAYER_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

/// One line of replay output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum OutputLine {
    /// An event, with the script step that caused it (none when autofilled)
    Event {
        step: Option<usize>,
        event: GameEvent,
    },

    /// A scripted step the engine refused
    Rejected {
        step: usize,
        player: PlayerId,
        error: String,
    },

    /// Final state as each player sees it
    View(Box<PlayerView>),
}

/// Run a script to completion. `rules` overrides the script's own rules.
pub fn run(script: &Script, rules: Option<RuleConfig>) -> Result<Vec<OutputLine>, ScriptError> {
    let mut rng = match script.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let rules = rules
        .or_else(|| script.rules.clone())
        .unwrap_or_default();
    let setup = script
        .setup
        .clone()
        .unwrap_or_else(|| Setup::random(&mut rng));

    let mut game = GameState::with_rules(setup, rules).map_err(ScriptError::Start)?;
    let mut output = Vec::new();

    for (index, step) in script.steps.iter().enumerate() {
        match game.apply_action(step.player, step.action.clone()) {
            Ok(events) => output.extend(events.into_iter().map(|event| OutputLine::Event {
                step: Some(index),
                event,
            })),
            Err(e) => {
                warn!(step = index, player = step.player, error = %e, "step rejected");
                output.push(OutputLine::Rejected {
                    step: index,
                    player: step.player,
                    error: e.to_string(),
                });
            }
        }
    }

    if script.autofill {
        while let Some(&player) = game.pending_players().first() {
            let events = game
                .force_default(player, &mut rng)
                .map_err(ScriptError::Autofill)?;
            output.extend(
                events
                    .into_iter()
                    .map(|event| OutputLine::Event { step: None, event }),
            );
        }
    }

    info!(
        turn = game.turn(),
        phase = ?game.phase(),
        scores = ?game.scores(),
        "replay finished"
    );

    for player in 0..PLAYER_COUNT as PlayerId {
        let view = game.view_for(player).map_err(ScriptError::View)?;
        output.push(OutputLine::View(Box::new(view)));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Step;
    use echo_core::{Battlefield, Creature, Edict, GamePhase, GameResult, PlayerAction};

    fn fixed_setup() -> Setup {
        use Creature::*;
        Setup {
            hands: [
                vec![Wall, Rogue, Diplomat, Steward, Witch],
                vec![Seer, Bard, Ranger, Barbarian, Mercenary],
            ],
            overseer: Monarch,
            battlefields: vec![Battlefield::Plains; 4],
        }
    }

    fn step(player: PlayerId, creature: Creature, edict: Edict) -> Step {
        Step {
            player,
            action: PlayerAction::main(creature, edict),
        }
    }

    fn final_views(output: &[OutputLine]) -> Vec<&PlayerView> {
        output
            .iter()
            .filter_map(|line| match line {
                OutputLine::View(view) => Some(&**view),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_scripted_turn() {
        let script = Script {
            setup: Some(fixed_setup()),
            steps: vec![
                step(0, Creature::Witch, Edict::Ambush),
                step(1, Creature::Bard, Edict::Ambush),
            ],
            ..Script::default()
        };
        let output = run(&script, None).unwrap();

        assert!(output.contains(&OutputLine::Event {
            step: Some(0),
            event: GameEvent::MainPhaseSubmitted { player: 0 },
        }));
        assert!(output.iter().any(|line| matches!(
            line,
            OutputLine::Event {
                step: Some(1),
                event: GameEvent::BattleResolved(_)
            }
        )));

        let views = final_views(&output);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].victory_points, 3);
        assert_eq!(views[1].turn, 2);
    }

    #[test]
    fn test_rejected_step_is_reported() {
        let script = Script {
            setup: Some(fixed_setup()),
            steps: vec![step(0, Creature::Seer, Edict::Ambush)],
            ..Script::default()
        };
        let output = run(&script, None).unwrap();

        assert!(matches!(
            output[0],
            OutputLine::Rejected {
                step: 0,
                player: 0,
                ..
            }
        ));
        assert_eq!(final_views(&output)[0].phase, GamePhase::Main);
    }

    #[test]
    fn test_invalid_setup_fails_the_run() {
        let mut setup = fixed_setup();
        setup.battlefields.pop();
        let script = Script {
            setup: Some(setup),
            ..Script::default()
        };
        assert!(matches!(run(&script, None), Err(ScriptError::Start(_))));
    }

    #[test]
    fn test_autofill_finishes_the_game() {
        let script = Script {
            seed: Some(11),
            autofill: true,
            ..Script::default()
        };
        let output = run(&script, Some(RuleConfig::classic())).unwrap();

        let ended = output.iter().any(|line| {
            matches!(
                line,
                OutputLine::Event {
                    step: None,
                    event: GameEvent::GameEnded { .. }
                }
            )
        });
        assert!(ended);
        assert_eq!(final_views(&output)[0].phase, GamePhase::Finished);
        assert_eq!(final_views(&output)[0].history.len(), 4);
    }

    #[test]
    fn test_same_seed_same_game() {
        let script = Script {
            seed: Some(3),
            autofill: true,
            ..Script::default()
        };
        let first = run(&script, None).unwrap();
        let second = run(&script, None).unwrap();
        assert_eq!(first, second);

        let result = first.iter().find_map(|line| match line {
            OutputLine::Event {
                event: GameEvent::GameEnded { result, .. },
                ..
            } => Some(*result),
            _ => None,
        });
        assert!(matches!(
            result,
            Some(GameResult::Winner(_)) | Some(GameResult::Tie)
        ));
    }
}
