use std::panic;
use std::process::ExitCode;

use clap::Parser;
use termsnake::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GridSize};
use termsnake::game::GameState;
use termsnake::terminal_runtime::{
    RuntimeError, TerminalSession, restore_terminal_after_panic, run_session,
};
use termsnake::theme::Theme;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Color theme: classic, ocean, or neon.
    #[arg(long, default_value = "classic")]
    theme: String,

    /// Seed the food-placement RNG for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    install_panic_hook();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("termsnake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RuntimeError> {
    let theme =
        Theme::by_name(&cli.theme).ok_or_else(|| RuntimeError::UnknownTheme(cli.theme.clone()))?;

    let bounds = GridSize {
        width: DEFAULT_GRID_WIDTH,
        height: DEFAULT_GRID_HEIGHT,
    };
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(bounds, seed),
        None => GameState::new(bounds),
    };

    let mut session = TerminalSession::enter()?;
    run_session(&mut session, state, theme)?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}
