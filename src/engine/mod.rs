//! The engine actor: owns the live game on its own thread and speaks a
//! request/response protocol with the front end over channels.

pub mod messages;
mod worker;

pub use messages::{ComputerMoveReport, Request, Response};
pub use worker::{Engine, EngineHandle};
