//! # Connect Four Deepening
//!
//! Connect Four against a computer that searches for forced outcomes,
//! deepening one ply at a time until it finds a win, a loss, or its depth limit.
//!
//! ## Modules
//!
//! - [`game`]: Board, tokens, win detection, game state
//! - [`ai`]: Exhaustive forced-outcome search and the deepening controller
//! - [`engine`]: Message protocol and the worker thread that owns the live game
//! - [`ui`]: Terminal UI: difficulty selection and play
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: stderr logger setup
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
