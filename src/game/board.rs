use serde::{Deserialize, Serialize};

use super::player::Token;

pub const ROWS: usize = 7;
pub const COLUMNS: usize = 7;

/// A cell on the grid. Row 0 is the bottom of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "col")]
    pub column: usize,
    pub row: usize,
}

impl Coordinates {
    pub fn new(column: usize, row: usize) -> Self {
        Coordinates { column, row }
    }
}

/// Gravity-filled grid stored column by column. A cell's row is its index
/// within the column; cells above the stack are simply absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Vec<Token>>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            columns: (0..COLUMNS).map(|_| Vec::with_capacity(ROWS)).collect(),
        }
    }

    /// Token at a cell, or `None` for empty and out-of-range cells.
    ///
    /// Takes signed indices so scan arithmetic can step off the grid freely.
    pub fn token_at(&self, column: isize, row: isize) -> Option<Token> {
        if column < 0 || row < 0 {
            return None;
        }
        self.columns
            .get(column as usize)
            .and_then(|stack| stack.get(row as usize))
            .copied()
    }

    /// Number of tokens stacked in a column (0 for out-of-range columns)
    pub fn height(&self, column: usize) -> usize {
        self.columns.get(column).map_or(0, Vec::len)
    }

    /// Check if a column can take no more tokens. Out-of-range columns count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        match self.columns.get(column) {
            Some(stack) => stack.len() >= ROWS,
            None => true,
        }
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.columns.iter().all(|stack| stack.len() >= ROWS)
    }

    /// Drop a token into a column, returns where it landed
    pub fn drop_token(&mut self, column: usize, token: Token) -> Option<Coordinates> {
        if self.is_column_full(column) {
            return None;
        }
        let stack = &mut self.columns[column];
        let row = stack.len();
        stack.push(token);
        Some(Coordinates::new(column, row))
    }

    /// Columns that still accept a token, in ascending order
    pub fn open_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLUMNS).filter(move |&column| !self.is_column_full(column))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
