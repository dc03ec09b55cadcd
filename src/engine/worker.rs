use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ai::{take_turn, Progress};
use crate::error::EngineError;
use crate::game::{GameState, Token};

use super::messages::{Request, Response};

/// Owns the live game and answers requests against it.
pub struct Engine {
    state: GameState,
    rng: StdRng,
}

impl Engine {
    /// Starts with a fresh game in place; `seed` fixes the tie-break sequence.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Engine {
            state: GameState::new(),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply one request to the live game.
    ///
    /// Progress is only reported while a computer move is being searched.
    pub fn handle(
        &mut self,
        request: Request,
        progress: &mut dyn Progress,
    ) -> Result<Response, EngineError> {
        match request {
            Request::Reset => {
                self.state = GameState::new();
                info!("new game");
                Ok(Response::ResetDone)
            }
            Request::HumanMove { column } => {
                let coordinates = self.state.place(Token::Human, column);
                match coordinates {
                    Some(at) => info!("human plays column {} row {}", at.column, at.row),
                    None => debug!("column {} is full, human goes again", column),
                }
                Ok(Response::HumanMoveDone(self.state.report(coordinates)))
            }
            Request::ComputerMove { max_depth } => {
                let played = take_turn(&mut self.state, max_depth, progress, &mut self.rng)
                    .ok_or(EngineError::NoLegalMove)?;
                Ok(Response::ComputerMoveDone(played.into()))
            }
        }
    }
}

/// Front-end side of an engine running on its own thread.
///
/// Requests are answered in order. Progress messages for a computer move
/// arrive before its `ComputerMoveDone`.
pub struct EngineHandle {
    requests: Sender<Request>,
    responses: Receiver<Response>,
    worker: JoinHandle<()>,
}

impl EngineHandle {
    pub fn spawn(seed: Option<u64>) -> Result<Self, EngineError> {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (response_tx, response_rx) = mpsc::channel::<Response>();

        let engine = Engine::new(seed);
        let worker = thread::Builder::new()
            .name("engine".into())
            .spawn(move || run(engine, request_rx, response_tx))?;

        Ok(EngineHandle {
            requests: request_tx,
            responses: response_rx,
            worker,
        })
    }

    pub fn send(&self, request: Request) -> Result<(), EngineError> {
        self.requests
            .send(request)
            .map_err(|_| EngineError::Disconnected)
    }

    /// Next pending message, if one has arrived.
    pub fn try_recv(&self) -> Result<Option<Response>, EngineError> {
        match self.responses.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(EngineError::Disconnected),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<Response>, EngineError> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Disconnected),
        }
    }

    /// Close the request channel and wait for the worker to finish.
    ///
    /// A search already under way runs to completion first.
    pub fn shutdown(self) {
        let EngineHandle {
            requests,
            responses,
            worker,
        } = self;
        drop(requests);
        drop(responses);
        if worker.join().is_err() {
            warn!("engine worker panicked");
        }
    }
}

fn run(mut engine: Engine, requests: Receiver<Request>, responses: Sender<Response>) {
    for request in requests {
        debug!(
            "engine received {}",
            serde_json::to_string(&request).unwrap_or_default()
        );
        let mut progress = |column: usize| {
            // Fire and forget; a vanished front end is noticed below.
            let _ = responses.send(Response::Progress { column });
        };
        let response = match engine.handle(request, &mut progress) {
            Ok(response) => response,
            Err(e) => {
                warn!("request failed: {e}");
                Response::Error {
                    message: e.to_string(),
                }
            }
        };
        if responses.send(response).is_err() {
            break;
        }
    }
    debug!("engine worker stopped");
}
