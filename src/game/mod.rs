//! Core Connect Four game logic: gravity-filled board, chip owners, win
//! detection, and the scored game state that the search forks.

mod board;
mod player;
mod state;
pub mod win;

pub use board::{Board, Coordinates, COLUMNS, ROWS};
pub use player::Token;
pub use state::{GameState, MoveReport, Score};
