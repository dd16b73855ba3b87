//! mealpick - local meal recommendations in the terminal.
//!
//! Sign in, pick a health condition and a budget, and get the meals from the
//! catalog whose cost sits within 20% of that budget, along with the foods
//! the condition should avoid.

mod app;
mod cli;
mod ui;
mod utils;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mealpick_core::{Config, MealContext};

use app::{App, AppState};
use cli::{Cli, Command, Shell};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 250;

/// Log file name inside the log directory
const LOG_FILE: &str = "mealpick.log";

/// Where log output goes
enum LogTarget {
    /// Full-screen mode owns the terminal, so logs go to a file
    File,
    Stderr,
}

/// Initialize the tracing subscriber for logging.
///
/// `RUST_LOG` wins over the configured level, which wins over `warn`.
fn init_tracing(config: &Config, target: LogTarget) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.as_deref().unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            None
        }
        LogTarget::File => {
            let log_dir = config
                .log_dir()
                .ok()
                .filter(|dir| std::fs::create_dir_all(dir).is_ok());
            match log_dir {
                Some(dir) => {
                    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
                    let (writer, guard) = tracing_appender::non_blocking(appender);
                    tracing_subscriber::registry()
                        .with(fmt::layer().with_writer(writer).with_ansi(false))
                        .with(filter)
                        .init();
                    Some(guard)
                }
                None => {
                    // Nowhere to write; keep the screen clean
                    tracing_subscriber::registry()
                        .with(fmt::layer().with_writer(io::sink))
                        .with(filter)
                        .init();
                    None
                }
            }
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {:#}. Using defaults.", e);
        Config::default()
    });

    let target = match cli.command {
        None => LogTarget::File,
        Some(_) => LogTarget::Stderr,
    };
    let _log_guard = init_tracing(&config, target);
    info!("mealpick starting");

    let mut context = MealContext::with_default_store();

    match cli.command {
        Some(Command::Conditions) => cli::print_conditions(&mut io::stdout()),
        Some(Command::Recommend {
            condition,
            budget,
            json,
            password,
        }) => cli::run_recommend(
            &mut context,
            cli.user,
            password,
            &condition,
            budget,
            json,
            &mut io::stdout(),
        ),
        Some(Command::Shell) => {
            let stdin = io::stdin();
            Shell::new(&mut context, stdin.lock(), io::stdout(), true).run()
        }
        None => run_tui(App::new(config, context, cli.user)),
    }
}

fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start_login();

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        warn!(error = %e, "Event loop ended with an error");
        eprintln!("Error: {}", e);
    }

    info!("mealpick shutting down");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
