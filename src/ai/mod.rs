//! The computer player: forced-outcome tree search and the progressive
//! deepening controller that drives it.

pub mod controller;
pub mod search;

pub use controller::{decide, take_turn, ComputerMove, MoveDecision};
pub use search::{candidates, choose, evaluate, search, ChildScores, Progress};
