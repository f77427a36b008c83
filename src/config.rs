/// Logical grid dimensions passed through the game as a named type.
///
/// Replaces an anonymous `(u16, u16)` tuple for bounds, making width vs.
/// height unambiguous at every call site.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

/// Default playfield width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default playfield height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 10;

/// Timer event period in milliseconds delivered by the runtime.
pub const TICK_INTERVAL_MS: u64 = 100;

/// The snake moves once per this many timer events.
///
/// Decouples the raw timer rate from the movement cadence: ticks arrive at
/// [`TICK_INTERVAL_MS`] but the snake advances at half that rate.
pub const TICKS_PER_MOVE: u64 = 2;
