//! Terminal Snake split into a pure game-state engine and a thin terminal
//! runtime.
//!
//! The engine ([`game`]) owns the snake, food, and tick counter and exposes
//! pure transition functions plus a render function that projects state to a
//! tagged character grid. The runtime ([`terminal_runtime`]) owns the
//! terminal lifecycle, delivers input and timer events to the engine one at
//! a time, and colorizes the engine's frame through a [`theme::Theme`].

pub mod config;
pub mod game;
pub mod input;
pub mod terminal_runtime;
pub mod theme;
