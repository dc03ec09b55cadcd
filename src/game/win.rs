//! Run-length scan around a freshly placed chip.

use super::board::{Board, Coordinates};
use super::player::Token;

/// Scan axes as (column step, row step), checked in this order.
pub const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // vertical
    (1, 0),  // horizontal
    (1, 1),  // diagonal
    (1, -1), // anti-diagonal
];

/// Chips needed in a row to win.
pub const RUN_LENGTH: usize = 4;

/// Half-width of the scan window around the placed chip.
const REACH: isize = RUN_LENGTH as isize - 1;

/// Find a run of four through `at` owned by `token`.
///
/// Returns the run ordered along the scan direction, from the first of the
/// four cells to the last. Axes are tried in [`DIRECTIONS`] order and the
/// first winning axis is reported.
pub fn find_run(
    board: &Board,
    token: Token,
    at: Coordinates,
) -> Option<[Coordinates; RUN_LENGTH]> {
    DIRECTIONS
        .iter()
        .find_map(|&direction| scan_axis(board, token, at, direction))
}

fn scan_axis(
    board: &Board,
    token: Token,
    at: Coordinates,
    (column_step, row_step): (isize, isize),
) -> Option<[Coordinates; RUN_LENGTH]> {
    let (column, row) = (at.column as isize, at.row as isize);
    let cell = |step: isize| (column + step * column_step, row + step * row_step);

    let mut run = 0;
    for step in -REACH..=REACH {
        let (c, r) = cell(step);
        if board.token_at(c, r) == Some(token) {
            run += 1;
            if run == RUN_LENGTH {
                let mut chips = [at; RUN_LENGTH];
                for (chip, offset) in chips.iter_mut().zip(step - REACH..=step) {
                    let (c, r) = cell(offset);
                    *chip = Coordinates::new(c as usize, r as usize);
                }
                return Some(chips);
            }
        } else {
            run = 0;
            // The placed chip itself can't mismatch; stop rather than read past it.
            if step == 0 {
                break;
            }
        }
    }
    None
}
