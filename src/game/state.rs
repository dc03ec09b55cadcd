use serde::{Deserialize, Serialize};

use super::board::{Board, Coordinates};
use super::player::Token;
use super::win::{self, RUN_LENGTH};

/// Forced-outcome score of a position, from the computer's point of view.
///
/// Ordering follows the numeric value: `HumanWin < Neutral < ComputerWin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Score {
    HumanWin = -4,
    Neutral = 0,
    ComputerWin = 4,
}

impl Score {
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Score produced when `token` completes a run.
    pub fn win_for(token: Token) -> Score {
        match token {
            Token::Human => Score::HumanWin,
            Token::Computer => Score::ComputerWin,
        }
    }

    pub fn is_win(self) -> bool {
        self != Score::Neutral
    }
}

/// Outcome of a placement on the live game, as reported to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    /// `None` when the column was full and nothing was placed.
    #[serde(rename = "coords", skip_serializing_if = "Option::is_none", default)]
    pub coordinates: Option<Coordinates>,
    pub is_win: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub winning_chips: Option<[Coordinates; RUN_LENGTH]>,
    pub is_board_full: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    score: Score,
    winning_chips: Option<[Coordinates; RUN_LENGTH]>,
}

impl GameState {
    /// Create an empty game with a neutral score
    pub fn new() -> Self {
        GameState {
            board: Board::new(),
            score: Score::Neutral,
            winning_chips: None,
        }
    }

    /// Hypothetical successor: same board and score, no winning run.
    pub fn fork(&self) -> Self {
        GameState {
            board: self.board.clone(),
            score: self.score,
            winning_chips: None,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Search folds child outcomes into the parent through this.
    pub(crate) fn set_score(&mut self, score: Score) {
        self.score = score;
    }

    /// The run that produced the current win, if any
    pub fn winning_chips(&self) -> Option<[Coordinates; RUN_LENGTH]> {
        self.winning_chips
    }

    /// Drop `token` into `column` and rescore from that cell.
    ///
    /// A full (or nonexistent) column leaves the state untouched and yields `None`.
    pub fn place(&mut self, token: Token, column: usize) -> Option<Coordinates> {
        let at = self.board.drop_token(column, token)?;
        self.winning_chips = win::find_run(&self.board, token, at);
        self.score = match self.winning_chips {
            Some(_) => Score::win_for(token),
            None => Score::Neutral,
        };
        Some(at)
    }

    pub fn is_full(&self) -> bool {
        self.board.is_full()
    }

    /// Check if the last placement completed a run
    pub fn is_win(&self) -> bool {
        self.score.is_win()
    }

    pub fn report(&self, coordinates: Option<Coordinates>) -> MoveReport {
        MoveReport {
            coordinates,
            is_win: self.is_win(),
            winning_chips: self.winning_chips,
            is_board_full: self.is_full(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner pattern for a completely filled board with no run anywhere:
/// rows read HHCCHHC / CCHHCCH and alternate upward.
#[cfg(test)]
fn drawn_owner(column: usize, row: usize) -> Token {
    if (column / 2 + row) % 2 == 0 {
        Token::Human
    } else {
        Token::Computer
    }
}

#[cfg(test)]
impl GameState {
    /// A full board that ended in a tie.
    pub(crate) fn drawn_full() -> Self {
        let mut state = GameState::new();
        for column in 0..super::COLUMNS {
            for row in 0..super::ROWS {
                state.board.drop_token(column, drawn_owner(column, row));
            }
        }
        state
    }
}
