use log::{debug, info};
use rand::Rng;

use crate::game::{GameState, MoveReport, Score, Token};

use super::search::{search, Progress};

/// Column the computer commits to, and how it feels about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDecision {
    pub column: usize,
    /// Search depth the column was chosen at.
    pub depth: usize,
    /// A forced win was found within the horizon.
    pub is_win_imminent: bool,
    /// Every move loses by force at the next depth.
    pub is_loss_imminent: bool,
}

/// A committed computer move on the live game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerMove {
    pub report: MoveReport,
    pub decision: MoveDecision,
}

/// Progressive deepening from depth 0 to `max_depth` inclusive.
///
/// Deepening stops at the first depth that shows a forced result. A forced
/// win commits that depth's column; a forced loss keeps the column from the
/// depth before, since every move looks equally lost from there. Only the
/// `max_depth` pass reports progress. Returns `None` if no column is open.
pub fn decide<R: Rng + ?Sized>(
    state: &GameState,
    max_depth: usize,
    progress: &mut dyn Progress,
    rng: &mut R,
) -> Option<MoveDecision> {
    if state.board().open_columns().next().is_none() {
        return None;
    }

    let mut decision: Option<MoveDecision> = None;
    for depth in 0..=max_depth {
        let mut origin = state.fork();
        let top_level = if depth == max_depth {
            Some(&mut *progress)
        } else {
            None
        };
        let tentative = search(&mut origin, Token::Computer, depth, top_level, rng);
        debug!(
            "depth {}/{}: score {}, tentative column {:?}",
            depth,
            max_depth,
            origin.score().value(),
            tentative
        );

        match origin.score() {
            Score::HumanWin => {
                if let Some(kept) = decision.as_mut() {
                    kept.is_loss_imminent = true;
                }
                break;
            }
            Score::ComputerWin => {
                decision = tentative.map(|column| MoveDecision {
                    column,
                    depth,
                    is_win_imminent: true,
                    is_loss_imminent: false,
                });
                break;
            }
            Score::Neutral => {
                decision = tentative.map(|column| MoveDecision {
                    column,
                    depth,
                    is_win_imminent: false,
                    is_loss_imminent: false,
                });
            }
        }
    }
    decision
}

/// Decide and play the computer's move on the live game.
pub fn take_turn<R: Rng + ?Sized>(
    state: &mut GameState,
    max_depth: usize,
    progress: &mut dyn Progress,
    rng: &mut R,
) -> Option<ComputerMove> {
    let decision = decide(state, max_depth, progress, rng)?;
    let coordinates = state.place(Token::Computer, decision.column);
    info!(
        "computer plays column {} (depth {}, win imminent: {}, loss imminent: {})",
        decision.column, decision.depth, decision.is_win_imminent, decision.is_loss_imminent
    );
    Some(ComputerMove {
        report: state.report(coordinates),
        decision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coordinates, COLUMNS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_with(moves: &[(Token, usize)]) -> GameState {
        let mut state = GameState::new();
        for &(token, column) in moves {
            state.place(token, column).unwrap();
        }
        state
    }

    fn quiet() -> impl FnMut(usize) {
        |_| {}
    }

    #[test]
    fn blocks_bottom_row_threat() {
        let state = state_with(&[(Token::Human, 0), (Token::Human, 1), (Token::Human, 2)]);
        for max_depth in 1..=3 {
            let mut rng = StdRng::seed_from_u64(max_depth as u64);
            let decision = decide(&state, max_depth, &mut quiet(), &mut rng).unwrap();
            assert_eq!(decision.column, 3, "max_depth {max_depth}");
            assert_eq!(decision.depth, max_depth);
            assert!(!decision.is_win_imminent);
            assert!(!decision.is_loss_imminent);
        }
    }

    #[test]
    fn overconfidence_guard_stops_at_first_win() {
        let state = state_with(&[
            (Token::Computer, 5),
            (Token::Computer, 5),
            (Token::Computer, 5),
            (Token::Human, 0),
            (Token::Human, 1),
        ]);
        let mut calls = 0;
        let mut counting = |_: usize| calls += 1;
        let mut rng = StdRng::seed_from_u64(7);
        let decision = decide(&state, 4, &mut counting, &mut rng).unwrap();
        assert_eq!(decision.column, 5);
        assert_eq!(decision.depth, 0);
        assert!(decision.is_win_imminent);
        assert!(!decision.is_loss_imminent);
        // Never reached the top level, so nothing was reported.
        assert_eq!(calls, 0);
    }

    #[test]
    fn forced_win_found_at_depth_two() {
        let state = state_with(&[
            (Token::Computer, 1),
            (Token::Computer, 2),
            (Token::Human, 6),
            (Token::Human, 6),
        ]);
        let mut rng = StdRng::seed_from_u64(21);
        let decision = decide(&state, 4, &mut quiet(), &mut rng).unwrap();
        assert_eq!(decision.column, 3);
        assert_eq!(decision.depth, 2);
        assert!(decision.is_win_imminent);
    }

    #[test]
    fn apathy_guard_keeps_shallower_choice() {
        // Human threatens both ends of 1, 2, 3: every move loses at depth 1.
        let state = state_with(&[
            (Token::Human, 1),
            (Token::Human, 2),
            (Token::Human, 3),
            (Token::Computer, 6),
        ]);

        let mut reference_rng = StdRng::seed_from_u64(99);
        let shallow = search(&mut state.fork(), Token::Computer, 0, None, &mut reference_rng);

        let mut rng = StdRng::seed_from_u64(99);
        let decision = decide(&state, 3, &mut quiet(), &mut rng).unwrap();
        assert_eq!(Some(decision.column), shallow);
        assert_eq!(decision.depth, 0);
        assert!(decision.is_loss_imminent);
        assert!(!decision.is_win_imminent);
    }

    #[test]
    fn max_depth_zero_on_empty_board_is_uniform() {
        let state = GameState::new();
        let mut rng = StdRng::seed_from_u64(4242);
        let mut counts = [0usize; COLUMNS];
        for _ in 0..7_000 {
            let decision = decide(&state, 0, &mut quiet(), &mut rng).unwrap();
            counts[decision.column] += 1;
        }
        assert!(counts.iter().all(|&count| (800..=1200).contains(&count)), "{counts:?}");
    }

    #[test]
    fn progress_only_from_top_level() {
        let state = state_with(&[(Token::Human, 0), (Token::Human, 1), (Token::Human, 2)]);
        let mut seen = Vec::new();
        let mut sink = |column: usize| seen.push(column);
        let mut rng = StdRng::seed_from_u64(5);
        decide(&state, 2, &mut sink, &mut rng).unwrap();
        assert_eq!(seen, (0..COLUMNS).collect::<Vec<_>>());
    }

    #[test]
    fn one_progress_sink_serves_consecutive_turns() {
        let mut state = state_with(&[(Token::Human, 3)]);
        let mut seen = Vec::new();
        let mut sink = |column: usize| seen.push(column);
        let progress: &mut dyn Progress = &mut sink;
        let mut rng = StdRng::seed_from_u64(12);

        take_turn(&mut state, 3, progress, &mut rng).unwrap();
        state.place(Token::Human, 3).unwrap();
        take_turn(&mut state, 3, progress, &mut rng).unwrap();

        let expected: Vec<usize> = (0..COLUMNS).chain(0..COLUMNS).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn decide_leaves_live_state_untouched() {
        let state = state_with(&[(Token::Human, 3), (Token::Computer, 3)]);
        let snapshot = state.fork();
        let mut rng = StdRng::seed_from_u64(8);
        decide(&state, 3, &mut quiet(), &mut rng).unwrap();
        assert_eq!(state.board(), snapshot.board());
        assert_eq!(state.score(), snapshot.score());
    }

    #[test]
    fn take_turn_plays_winning_move() {
        let mut state = state_with(&[
            (Token::Computer, 5),
            (Token::Computer, 5),
            (Token::Computer, 5),
            (Token::Human, 0),
            (Token::Human, 1),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let played = take_turn(&mut state, 2, &mut quiet(), &mut rng).unwrap();

        assert_eq!(played.report.coordinates, Some(Coordinates::new(5, 3)));
        assert!(played.report.is_win);
        assert!(!played.report.is_board_full);
        let chips = played.report.winning_chips.unwrap();
        assert!(chips.iter().all(|chip| chip.column == 5));
        assert_eq!(state.score(), Score::ComputerWin);
    }

    #[test]
    fn no_move_on_full_board() {
        let mut state = GameState::drawn_full();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(decide(&state, 2, &mut quiet(), &mut rng), None);
        assert!(take_turn(&mut state, 2, &mut quiet(), &mut rng).is_none());
    }
}
