use std::io;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;

use thiserror::Error;

use crate::config::TICK_INTERVAL_MS;
use crate::game::{GameState, RenderedFrame};
use crate::input::{Direction, GameInput};
use crate::theme::Theme;

/// Failures originating outside the engine.
///
/// The engine itself has no error taxonomy: collisions are the terminal
/// `GameOver` state. Everything that can actually fail lives here, and all
/// of it is fatal to the process.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] io::Error),
    #[error("unknown theme {0:?}, available: classic, ocean, neon")]
    UnknownTheme(String),
}

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

/// Restores the terminal without a session handle, for panic hooks.
pub fn restore_terminal_after_panic() {
    let _ = cleanup_terminal_best_effort();
}

/// Drives one game session until quit.
///
/// Events reach the engine strictly in arrival order, one at a time: key
/// events as soon as they are read, a timer event every
/// [`TICK_INTERVAL_MS`] of wall-clock time. Quit breaks out immediately
/// regardless of game status.
pub fn run_session(
    session: &mut TerminalSession,
    mut state: GameState,
    theme: &Theme,
) -> io::Result<()> {
    let tick_interval = Duration::from_millis(TICK_INTERVAL_MS);
    let mut last_tick = Instant::now();

    loop {
        let rendered = state.render();
        session
            .terminal_mut()
            .draw(|frame| paint(frame, &rendered, theme))?;

        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key_event(key) {
                    Some(GameInput::Quit) => break,
                    Some(GameInput::Direction(direction)) => {
                        state = state.apply_direction(direction);
                    }
                    None => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_interval {
            state = state.advance_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Paints one engine frame, colorizing each cell through the theme.
fn paint(frame: &mut Frame<'_>, rendered: &RenderedFrame, theme: &Theme) {
    let lines: Vec<Line<'_>> = rendered
        .rows
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| Span::styled(cell.ch.to_string(), theme.style_for(cell.tag)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(Text::from(lines)), frame.area());
}

/// Maps a physical key event to a logical game input.
///
/// WASD and arrow keys steer; `q`, Esc, and Ctrl+C quit. Everything else
/// is ignored, as are key releases on platforms that report them.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameInput::Direction(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameInput::Direction(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameInput::Direction(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}
