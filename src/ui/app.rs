use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{backend::Backend, Terminal};

use crate::config::{AppConfig, MAX_DEPTH};
use crate::engine::{ComputerMoveReport, EngineHandle, Request, Response};
use crate::game::{Board, Coordinates, MoveReport, Token, COLUMNS};

/// Where the game is in its turn cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Picking a difficulty before a game.
    Setup,
    /// Waiting for the engine to start a new game.
    Resetting,
    HumanTurn,
    /// Waiting for the engine to accept the human's chip.
    HumanMoving,
    /// The engine is searching; `cursor` follows its progress.
    ComputerThinking { cursor: usize },
    /// Move is known and shown over its column until `until`.
    Revealing {
        done: ComputerMoveReport,
        until: Instant,
    },
    GameOver(Ending),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    HumanWin,
    ComputerWin,
    Tie,
}

/// What the computer's last search revealed about the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlook {
    WinImminent,
    LossImminent,
}

pub struct App {
    engine: EngineHandle,
    pub(super) board: Board,
    pub(super) phase: Phase,
    pub(super) selected_column: usize,
    pub(super) max_depth: usize,
    pub(super) outlook: Option<Outlook>,
    pub(super) winning_chips: Option<[Coordinates; 4]>,
    pub(super) message: Option<String>,
    tick: Duration,
    reveal_delay: Duration,
    disconnected: bool,
    should_quit: bool,
}

impl App {
    pub fn new(engine: EngineHandle, config: &AppConfig) -> Self {
        App {
            engine,
            board: Board::new(),
            phase: Phase::Setup,
            selected_column: COLUMNS / 2, // Start in middle
            max_depth: config.engine.max_depth.clamp(1, MAX_DEPTH),
            outlook: None,
            winning_chips: None,
            message: None,
            tick: Duration::from_millis(config.ui.tick_ms),
            reveal_delay: Duration::from_millis(config.ui.reveal_delay_ms),
            disconnected: false,
            should_quit: false,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.poll_engine();
            self.on_tick(Instant::now());

            terminal.draw(|f| super::game_view::render(f, self))?;

            if self.disconnected {
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "engine stopped responding",
                ));
            }
            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Drain everything the engine has sent since the last frame.
    fn poll_engine(&mut self) {
        loop {
            match self.engine.try_recv() {
                Ok(Some(response)) => self.apply_response(response),
                Ok(None) => break,
                Err(e) => {
                    warn!("{e}");
                    self.disconnected = true;
                    break;
                }
            }
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn request(&mut self, request: Request) {
        if let Err(e) = self.engine.send(request) {
            warn!("{e}");
            self.disconnected = true;
        }
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
            return;
        }

        match self.phase {
            Phase::Setup => match key.code {
                KeyCode::Left => self.max_depth = (self.max_depth - 1).max(1),
                KeyCode::Right => self.max_depth = (self.max_depth + 1).min(MAX_DEPTH),
                KeyCode::Enter | KeyCode::Char(' ') => self.start_game(),
                _ => {}
            },
            Phase::GameOver(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.phase = Phase::Setup;
                }
            }
            Phase::HumanTurn => match key.code {
                KeyCode::Left => self.selected_column = self.selected_column.saturating_sub(1),
                KeyCode::Right => {
                    self.selected_column = (self.selected_column + 1).min(COLUMNS - 1)
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.message = None;
                    self.phase = Phase::HumanMoving;
                    self.request(Request::HumanMove {
                        column: self.selected_column,
                    });
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn start_game(&mut self) {
        self.board = Board::new();
        self.winning_chips = None;
        self.outlook = None;
        self.message = None;
        self.phase = Phase::Resetting;
        self.request(Request::Reset);
    }

    pub fn apply_response(&mut self, response: Response) {
        match response {
            Response::ResetDone => self.phase = Phase::HumanTurn,
            Response::HumanMoveDone(report) => self.end_human_turn(report),
            Response::Progress { column } => {
                if let Phase::ComputerThinking { cursor } = &mut self.phase {
                    *cursor = column;
                }
            }
            Response::ComputerMoveDone(done) => {
                self.phase = Phase::Revealing {
                    done,
                    until: Instant::now() + self.reveal_delay,
                };
            }
            Response::Error { message } => {
                self.message = Some(message);
                self.phase = Phase::Setup;
            }
        }
    }

    fn end_human_turn(&mut self, report: MoveReport) {
        let Some(at) = report.coordinates else {
            // Column was full, human goes again
            self.message = Some("Column is full!".to_string());
            self.phase = Phase::HumanTurn;
            return;
        };
        self.board.drop_token(at.column, Token::Human);

        if report.is_win {
            self.end_game(Ending::HumanWin, report.winning_chips);
        } else if report.is_board_full {
            self.end_game(Ending::Tie, None);
        } else {
            self.phase = Phase::ComputerThinking { cursor: 0 };
            self.request(Request::ComputerMove {
                max_depth: self.max_depth,
            });
        }
    }

    /// Drop the revealed computer chip once its delay has passed.
    pub fn on_tick(&mut self, now: Instant) {
        let done = match &self.phase {
            Phase::Revealing { done, until } if now >= *until => done.clone(),
            _ => return,
        };

        let Some(at) = done.report.coordinates else {
            self.message = Some("Computer could not move".to_string());
            self.phase = Phase::Setup;
            return;
        };
        self.board.drop_token(at.column, Token::Computer);

        if done.report.is_win {
            self.end_game(Ending::ComputerWin, done.report.winning_chips);
        } else if done.report.is_board_full {
            self.end_game(Ending::Tie, None);
        } else {
            self.outlook = if done.is_win_imminent {
                Some(Outlook::WinImminent)
            } else if done.is_loss_imminent {
                Some(Outlook::LossImminent)
            } else {
                None
            };
            self.phase = Phase::HumanTurn;
        }
    }

    fn end_game(&mut self, ending: Ending, winning_chips: Option<[Coordinates; 4]>) {
        self.outlook = None;
        self.winning_chips = winning_chips;
        self.phase = Phase::GameOver(ending);
    }

    /// Column the cursor chip hovers over, and whose chip it is.
    pub(super) fn cursor(&self) -> Option<(usize, Token)> {
        match &self.phase {
            Phase::HumanTurn | Phase::HumanMoving => Some((self.selected_column, Token::Human)),
            Phase::ComputerThinking { cursor } => Some((*cursor, Token::Computer)),
            Phase::Revealing { done, .. } => done
                .report
                .coordinates
                .map(|at| (at.column, Token::Computer)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        let mut config = AppConfig::default();
        config.engine.max_depth = 1;
        config.ui.reveal_delay_ms = 0;
        let engine = EngineHandle::spawn(Some(5)).unwrap();
        App::new(engine, &config)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn placed(column: usize, row: usize) -> MoveReport {
        MoveReport {
            coordinates: Some(Coordinates::new(column, row)),
            is_win: false,
            winning_chips: None,
            is_board_full: false,
        }
    }

    #[test]
    fn enter_starts_a_game() {
        let mut app = app();
        assert_eq!(app.phase, Phase::Setup);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.phase, Phase::Resetting);
        app.apply_response(Response::ResetDone);
        assert_eq!(app.phase, Phase::HumanTurn);
        assert_eq!(app.cursor(), Some((COLUMNS / 2, Token::Human)));
    }

    #[test]
    fn difficulty_is_clamped() {
        let mut app = app();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.max_depth, 1);
        for _ in 0..20 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.max_depth, MAX_DEPTH);
    }

    #[test]
    fn full_column_hands_turn_back() {
        let mut app = app();
        app.phase = Phase::HumanMoving;
        app.apply_response(Response::HumanMoveDone(MoveReport {
            coordinates: None,
            is_win: false,
            winning_chips: None,
            is_board_full: false,
        }));
        assert_eq!(app.phase, Phase::HumanTurn);
        assert!(app.message.is_some());
    }

    #[test]
    fn human_move_passes_turn_to_computer() {
        let mut app = app();
        app.phase = Phase::HumanTurn;
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.phase, Phase::HumanMoving);

        app.apply_response(Response::HumanMoveDone(placed(COLUMNS / 2 + 1, 0)));
        assert_eq!(app.board.token_at(COLUMNS as isize / 2 + 1, 0), Some(Token::Human));
        assert_eq!(app.phase, Phase::ComputerThinking { cursor: 0 });

        app.apply_response(Response::Progress { column: 4 });
        assert_eq!(app.cursor(), Some((4, Token::Computer)));
    }

    #[test]
    fn human_win_ends_game_with_chips() {
        let mut app = app();
        app.phase = Phase::HumanMoving;
        let chips = [
            Coordinates::new(0, 0),
            Coordinates::new(1, 0),
            Coordinates::new(2, 0),
            Coordinates::new(3, 0),
        ];
        app.apply_response(Response::HumanMoveDone(MoveReport {
            coordinates: Some(Coordinates::new(3, 0)),
            is_win: true,
            winning_chips: Some(chips),
            is_board_full: false,
        }));
        assert_eq!(app.phase, Phase::GameOver(Ending::HumanWin));
        assert_eq!(app.winning_chips, Some(chips));
        assert_eq!(app.cursor(), None);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.phase, Phase::Setup);
    }

    #[test]
    fn computer_move_is_revealed_then_dropped() {
        let mut app = app();
        app.phase = Phase::ComputerThinking { cursor: 6 };
        app.apply_response(Response::ComputerMoveDone(ComputerMoveReport {
            report: placed(2, 0),
            is_win_imminent: false,
            is_loss_imminent: true,
        }));
        assert!(matches!(app.phase, Phase::Revealing { .. }));
        assert_eq!(app.cursor(), Some((2, Token::Computer)));

        app.on_tick(Instant::now() + Duration::from_millis(1));
        assert_eq!(app.phase, Phase::HumanTurn);
        assert_eq!(app.board.token_at(2, 0), Some(Token::Computer));
        assert_eq!(app.outlook, Some(Outlook::LossImminent));
    }

    #[test]
    fn tie_when_board_fills() {
        let mut app = app();
        app.phase = Phase::ComputerThinking { cursor: 0 };
        app.apply_response(Response::ComputerMoveDone(ComputerMoveReport {
            report: MoveReport {
                is_board_full: true,
                ..placed(6, 0)
            },
            is_win_imminent: false,
            is_loss_imminent: false,
        }));
        app.on_tick(Instant::now() + Duration::from_millis(1));
        assert_eq!(app.phase, Phase::GameOver(Ending::Tie));
        assert_eq!(app.winning_chips, None);
    }

    #[test]
    fn engine_error_returns_to_setup() {
        let mut app = app();
        app.phase = Phase::ComputerThinking { cursor: 0 };
        app.apply_response(Response::Error {
            message: "no legal move: every column is full".into(),
        });
        assert_eq!(app.phase, Phase::Setup);
        assert!(app.message.as_deref().unwrap().contains("no legal move"));
    }

    #[test]
    fn plays_against_real_engine() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        let deadline = Instant::now() + Duration::from_secs(30);
        while app.phase != Phase::HumanTurn && Instant::now() < deadline {
            app.poll_engine();
        }
        assert_eq!(app.phase, Phase::HumanTurn);

        press(&mut app, KeyCode::Enter);
        while app.phase != Phase::HumanTurn && Instant::now() < deadline {
            app.poll_engine();
            app.on_tick(Instant::now());
        }
        assert_eq!(app.phase, Phase::HumanTurn);
        let chips: usize = (0..COLUMNS).map(|column| app.board.height(column)).sum();
        assert_eq!(chips, 2);
    }
}
