use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four_deepening::config::AppConfig;
use connect_four_deepening::engine::EngineHandle;
use connect_four_deepening::logging;
use connect_four_deepening::ui::App;

/// Play Connect Four against a forced-outcome search.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Override the starting difficulty (search depth)
    #[arg(long)]
    depth: Option<usize>,

    /// Seed the computer's tie-breaks for a repeatable game
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.engine.max_depth = depth;
    }
    if let Some(seed) = cli.seed {
        config.engine.seed = Some(seed);
    }
    config.validate().context("invalid configuration")?;

    if cli.print_config {
        print!(
            "{}",
            toml::to_string_pretty(&config).context("serializing config")?
        );
        return Ok(());
    }

    logging::init(&config.logging).context("setting up logging")?;

    let engine = EngineHandle::spawn(config.engine.seed).context("starting engine")?;
    let mut app = App::new(engine, &config);

    run(&mut app).context("terminal UI failed")
}

fn run(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal even when the game loop failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
