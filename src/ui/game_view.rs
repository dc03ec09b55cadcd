use crate::game::{Coordinates, Token, COLUMNS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Ending, Outlook, Phase};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Header
            Constraint::Min(12),    // Board
            Constraint::Length(3),  // Message
            Constraint::Length(3),  // Controls
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_board(frame, app, chunks[1]);
    render_message(frame, app, chunks[2]);
    render_controls(frame, &app.phase, chunks[3]);
}

/// Heading and blurb for each phase of the game.
fn blurb(phase: &Phase) -> (&'static str, &'static str) {
    match phase {
        Phase::Setup | Phase::Resetting => {
            ("Get Ready", "Select your Difficulty and Start the Game.")
        }
        Phase::HumanTurn | Phase::HumanMoving => {
            ("Your Turn", "Pick a column and drop your chip.")
        }
        Phase::ComputerThinking { .. } | Phase::Revealing { .. } => (
            "Computer's Turn",
            "The Computer is trying to find the best way to make you Lose.",
        ),
        Phase::GameOver(Ending::HumanWin) => (
            "You Win",
            "You are a winner. Remember this moment. Carry it with you, forever.",
        ),
        Phase::GameOver(Ending::ComputerWin) => {
            ("Computer Wins", "Try again and NEVER GIVE UP, remember that.")
        }
        Phase::GameOver(Ending::Tie) => (
            "Tie",
            "Everyone's a winner! Or loser. Depends on how you look at it.",
        ),
    }
}

fn token_color(token: Token) -> Color {
    match token {
        Token::Human => Color::Red,
        Token::Computer => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (heading, text) = blurb(&app.phase);
    let color = match app.phase {
        Phase::HumanTurn | Phase::HumanMoving | Phase::GameOver(Ending::HumanWin) => Color::Red,
        Phase::ComputerThinking { .. }
        | Phase::Revealing { .. }
        | Phase::GameOver(Ending::ComputerWin) => Color::Yellow,
        _ => Color::White,
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("{}  |  Difficulty {}", heading, app.max_depth),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(text),
    ];

    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    let cursor = app.cursor();
    let is_winning = |column: usize, row: usize| {
        app.winning_chips
            .is_some_and(|chips| chips.contains(&Coordinates::new(column, row)))
    };

    // Chip hovering over the column about to be played
    let mut hover_line = vec![Span::raw("   ")];
    for column in 0..COLUMNS {
        match cursor {
            Some((at, token)) if at == column => hover_line.push(Span::styled(
                " ● ",
                Style::default().fg(token_color(token)).add_modifier(Modifier::BOLD),
            )),
            _ => hover_line.push(Span::raw("   ")),
        }
    }
    hover_line.push(Span::raw("  "));
    lines.push(Line::from(hover_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(COLUMNS * 3 + 1))));

    // Row 0 is the bottom of the board
    for row in (0..ROWS).rev() {
        let mut row_spans = vec![Span::raw("  ║")];
        for column in 0..COLUMNS {
            let span = match app.board.token_at(column as isize, row as isize) {
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Some(token) => {
                    let mut style = Style::default().fg(token_color(token));
                    if is_winning(column, row) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Span::styled(" ● ", style)
                }
            };
            row_spans.push(span);
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(COLUMNS * 3 + 1))));

    let mut number_line = vec![Span::raw("   ")];
    for column in 0..COLUMNS {
        number_line.push(Span::styled(
            format!(" {} ", column + 1),
            Style::default().fg(Color::DarkGray),
        ));
    }
    number_line.push(Span::raw("  "));
    lines.push(Line::from(number_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, app: &App, area: Rect) {
    // Notices take priority over the computer's outlook
    let text = match (&app.message, app.outlook) {
        (Some(message), _) => message.as_str(),
        (None, Some(Outlook::WinImminent)) => "Uh oh, computer is feeling saucy!",
        (None, Some(Outlook::LossImminent)) => "Computer is unsure. Now's your chance!",
        (None, None) => "",
    };
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, phase: &Phase, area: Rect) {
    let text = match phase {
        Phase::Setup => "←/→: Difficulty  |  Enter: Start  |  Q: Quit",
        Phase::GameOver(_) => "Enter: Play again  |  Q: Quit",
        Phase::HumanTurn => "←/→: Move  |  Enter: Drop  |  Q: Quit",
        _ => "Q: Quit",
    };

    let controls = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
