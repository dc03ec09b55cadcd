use rand::seq::IndexedRandom;
use rand::Rng;

use crate::game::{GameState, Score, Token, COLUMNS};

/// Receives the top-level column currently under evaluation.
pub trait Progress {
    fn exploring(&mut self, column: usize);
}

impl<F: FnMut(usize)> Progress for F {
    fn exploring(&mut self, column: usize) {
        self(column)
    }
}

/// Outcome of each child position by column; `None` where the column was full.
pub type ChildScores = [Option<Score>; COLUMNS];

/// Evaluate `state` with `to_move` to play and pick a column among the best.
///
/// Leaves the search-determined score in `state`. Passing a `progress` sink
/// marks this as the top-level call; it is told about every column in turn.
/// Returns `None` only when every column is full.
pub fn search<'p, R: Rng + ?Sized>(
    state: &mut GameState,
    to_move: Token,
    depth_remaining: usize,
    progress: Option<&mut (dyn Progress + 'p)>,
    rng: &mut R,
) -> Option<usize> {
    let scores = evaluate(state, to_move, depth_remaining, progress);
    choose(&candidates(&scores, state.score()), rng)
}

/// Score every legal move from `state` and fold the results into it.
///
/// The human is modelled as picking the outcome worst for the computer, the
/// computer the best one. Positions without a forced result inside the
/// horizon stay [`Score::Neutral`].
pub fn evaluate<'p>(
    state: &mut GameState,
    to_move: Token,
    depth_remaining: usize,
    mut progress: Option<&mut (dyn Progress + 'p)>,
) -> ChildScores {
    let mut scores: ChildScores = [None; COLUMNS];
    let mut folded: Option<Score> = None;

    for (column, slot) in scores.iter_mut().enumerate() {
        if let Some(progress) = progress.as_deref_mut() {
            progress.exploring(column);
        }

        let mut child = state.fork();
        if child.place(to_move, column).is_none() {
            continue;
        }
        if !child.is_win() && depth_remaining > 0 {
            // Only the child's folded score matters here, not its column choice.
            evaluate(&mut child, to_move.other(), depth_remaining - 1, None);
        }

        let score = child.score();
        folded = Some(match (folded, to_move) {
            (None, _) => score,
            (Some(best), Token::Human) => best.min(score),
            (Some(best), Token::Computer) => best.max(score),
        });
        *slot = Some(score);
    }

    if let Some(score) = folded {
        state.set_score(score);
    }
    scores
}

/// Columns whose child reached `target`, ascending.
pub fn candidates(scores: &ChildScores, target: Score) -> Vec<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score == Some(target))
        .map(|(column, _)| column)
        .collect()
}

/// Uniform pick among tied columns.
pub fn choose<R: Rng + ?Sized>(candidates: &[usize], rng: &mut R) -> Option<usize> {
    candidates.choose(rng).copied()
}
