//! Terminal UI: difficulty selection, the board, and the engine's running
//! commentary while it searches.

mod app;
mod game_view;

pub use app::{App, Ending, Outlook, Phase};
