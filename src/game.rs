use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GridSize, TICKS_PER_MOVE};
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighboring position one cell along `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Current high-level gameplay state.
///
/// `GameOver` is absorbing: every transition on a finished state returns it
/// unchanged.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Complete game state for one session.
///
/// Transitions consume the previous state and return the next one, so the
/// event loop owns exactly one state value between events and tests never
/// need a live terminal.
#[derive(Debug, Clone)]
pub struct GameState {
    body: VecDeque<Position>,
    heading: Direction,
    food: Position,
    bounds: GridSize,
    status: GameStatus,
    tick_count: u64,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh session: one-segment snake at the board center,
    /// heading right, food placed uniformly at random.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::from_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::from_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn from_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        assert!(
            bounds.width > 0 && bounds.height > 0,
            "grid must have positive dimensions ({}×{})",
            bounds.width,
            bounds.height,
        );

        let start = Position {
            x: i32::from(bounds.width / 2),
            y: i32::from(bounds.height / 2),
        };
        let mut body = VecDeque::new();
        body.push_front(start);
        let food = random_food(&mut rng, bounds);

        Self {
            body,
            heading: Direction::Right,
            food,
            bounds,
            status: GameStatus::Running,
            tick_count: 0,
            rng,
        }
    }

    /// Replaces the snake body and heading. Segments are head-first.
    ///
    /// Used to stage specific layouts in tests and simulations.
    #[must_use]
    pub fn with_snake(mut self, segments: Vec<Position>, heading: Direction) -> Self {
        assert!(!segments.is_empty(), "snake must have at least one segment");
        self.body = VecDeque::from(segments);
        self.heading = heading;
        self
    }

    /// Replaces the food position.
    #[must_use]
    pub fn with_food(mut self, position: Position) -> Self {
        self.food = position;
        self
    }

    /// Applies one direction input.
    ///
    /// The heading changes only when the request is not the exact reverse of
    /// the current heading; a reversal would walk the head straight into the
    /// first body segment. No-op on finished states. Never fails.
    #[must_use]
    pub fn apply_direction(mut self, requested: Direction) -> Self {
        if self.status == GameStatus::GameOver {
            return self;
        }

        if requested != self.heading.opposite() {
            self.heading = requested;
        }
        self
    }

    /// Applies one timer event.
    ///
    /// The tick counter advances on every call, but the snake moves only
    /// every [`TICKS_PER_MOVE`]th tick. Collisions flip the state to
    /// `GameOver` instead of returning an error; there is nothing fallible
    /// here.
    #[must_use]
    pub fn advance_tick(mut self) -> Self {
        if self.status == GameStatus::GameOver {
            return self;
        }

        self.tick_count += 1;
        if self.tick_count % TICKS_PER_MOVE != 0 {
            return self;
        }

        let next_head = self.head().stepped(self.heading);

        if !next_head.is_within_bounds(self.bounds) {
            self.status = GameStatus::GameOver;
            return self;
        }

        // The tail cell counts too, even though it is about to move away.
        if self.body.contains(&next_head) {
            self.status = GameStatus::GameOver;
            return self;
        }

        self.body.push_front(next_head);
        if next_head == self.food {
            // Tail stays: eating grows the snake by one segment.
            self.food = random_food(&mut self.rng, self.bounds);
        } else {
            let _ = self.body.pop_back();
        }
        self
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments. Never happens in practice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement heading.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the current food position.
    #[must_use]
    pub fn food(&self) -> Position {
        self.food
    }

    /// Returns the grid dimensions for this session.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Returns the gameplay status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the number of timer events applied so far.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Projects the state onto a bordered character grid.
    ///
    /// Pure: the frame is `(height+2) × (width+2)` cells, each carrying a
    /// [`CellTag`] so the runtime can colorize without the engine knowing
    /// about any rendering library. Food is drawn after the snake and
    /// overwrites whatever occupies its cell. Finished sessions render a
    /// fixed farewell message instead of the board.
    #[must_use]
    pub fn render(&self) -> RenderedFrame {
        if self.status == GameStatus::GameOver {
            return RenderedFrame::plain_message(&["Game Over!", "Press q to quit."]);
        }

        let width = usize::from(self.bounds.width);
        let height = usize::from(self.bounds.height);

        let mut rows = Vec::with_capacity(height + 2);
        for y in 0..height + 2 {
            let mut row = Vec::with_capacity(width + 2);
            for x in 0..width + 2 {
                row.push(if y == 0 || y == height + 1 {
                    Cell::new('-', CellTag::Border)
                } else if x == 0 || x == width + 1 {
                    Cell::new('|', CellTag::Border)
                } else {
                    Cell::new(' ', CellTag::Plain)
                });
            }
            rows.push(row);
        }

        for (index, segment) in self.body.iter().enumerate() {
            let Some((x, y)) = grid_index(*segment, self.bounds) else {
                continue;
            };
            rows[y][x] = if index == 0 {
                Cell::new('0', CellTag::Head)
            } else {
                Cell::new('O', CellTag::Body)
            };
        }

        if let Some((x, y)) = grid_index(self.food, self.bounds) {
            rows[y][x] = Cell::new('X', CellTag::Food);
        }

        RenderedFrame { rows }
    }
}

/// Picks a food cell uniformly at random within bounds.
///
/// Placement ignores snake occupancy: food may land on a body cell and
/// stays there until eaten. Deliberate, observed placement policy.
fn random_food<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    Position {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}

/// Maps a logical position to its border-offset frame row/column.
fn grid_index(position: Position, bounds: GridSize) -> Option<(usize, usize)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x = usize::try_from(position.x).ok()?;
    let y = usize::try_from(position.y).ok()?;
    Some((x + 1, y + 1))
}

/// Visual kind of a rendered cell, derived purely from the glyph drawn.
///
/// The runtime maps tags to display attributes; the engine never picks
/// colors.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CellTag {
    Plain,
    Border,
    Body,
    Head,
    Food,
}

/// One character of a rendered frame together with its visual kind.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub tag: CellTag,
}

impl Cell {
    #[must_use]
    pub const fn new(ch: char, tag: CellTag) -> Self {
        Self { ch, tag }
    }
}

/// A full frame as rows of tagged cells, head row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    pub rows: Vec<Vec<Cell>>,
}

impl RenderedFrame {
    /// Builds a frame of untagged text lines, one row per line.
    #[must_use]
    pub fn plain_message(lines: &[&str]) -> Self {
        let rows = lines
            .iter()
            .map(|line| {
                line.chars()
                    .map(|ch| Cell::new(ch, CellTag::Plain))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Flattens the frame to newline-terminated text, dropping style tags.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.extend(row.iter().map(|cell| cell.ch));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{CellTag, GameState, GameStatus, Position};

    fn bounds(width: u16, height: u16) -> GridSize {
        GridSize { width, height }
    }

    #[test]
    fn new_session_starts_centered_heading_right() {
        let state = GameState::new_with_seed(bounds(20, 10), 1);

        assert_eq!(state.head(), Position { x: 10, y: 5 });
        assert_eq!(state.len(), 1);
        assert_eq!(state.heading(), Direction::Right);
        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.tick_count(), 0);
        assert!(state.food().is_within_bounds(state.bounds()));
    }

    #[test]
    fn head_moves_only_on_even_ticks() {
        let mut state = GameState::new_with_seed(bounds(20, 10), 1)
            .with_food(Position { x: 0, y: 0 });

        state = state.advance_tick();
        assert_eq!(state.head(), Position { x: 10, y: 5 });
        assert_eq!(state.tick_count(), 1);

        state = state.advance_tick();
        assert_eq!(state.head(), Position { x: 11, y: 5 });
        assert_eq!(state.len(), 1);

        state = state.advance_tick();
        assert_eq!(state.head(), Position { x: 11, y: 5 });

        state = state.advance_tick();
        assert_eq!(state.head(), Position { x: 12, y: 5 });
    }

    #[test]
    fn reversal_request_is_ignored() {
        let state = GameState::new_with_seed(bounds(20, 10), 1)
            .with_snake(vec![Position { x: 5, y: 5 }], Direction::Down)
            .apply_direction(Direction::Up);

        assert_eq!(state.heading(), Direction::Down);
    }

    #[test]
    fn perpendicular_turn_is_applied() {
        let state = GameState::new_with_seed(bounds(20, 10), 1)
            .apply_direction(Direction::Up);

        assert_eq!(state.heading(), Direction::Up);
    }

    #[test]
    fn wall_collision_finishes_the_session() {
        let mut state = GameState::new_with_seed(bounds(20, 10), 2)
            .with_snake(vec![Position { x: 0, y: 5 }], Direction::Left);

        state = state.advance_tick().advance_tick();

        assert_eq!(state.status(), GameStatus::GameOver);
        // The out-of-bounds head was never applied.
        assert_eq!(state.head(), Position { x: 0, y: 5 });
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn self_collision_finishes_the_session() {
        let mut state = GameState::new_with_seed(bounds(20, 10), 3).with_snake(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 3, y: 3 },
                Position { x: 3, y: 2 },
            ],
            Direction::Down,
        );

        state = state.advance_tick().advance_tick();

        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn eating_food_grows_by_one_and_respawns() {
        let mut state = GameState::new_with_seed(bounds(20, 10), 4)
            .with_snake(vec![Position { x: 1, y: 1 }], Direction::Right)
            .with_food(Position { x: 2, y: 1 });

        state = state.advance_tick();
        assert_eq!(state.len(), 1);

        state = state.advance_tick();
        assert_eq!(state.len(), 2);
        assert_eq!(state.head(), Position { x: 2, y: 1 });
        assert!(state.food().is_within_bounds(state.bounds()));
    }

    #[test]
    fn finished_state_absorbs_all_transitions() {
        let mut state = GameState::new_with_seed(bounds(20, 10), 5)
            .with_snake(vec![Position { x: 0, y: 5 }], Direction::Left)
            .advance_tick()
            .advance_tick();
        assert_eq!(state.status(), GameStatus::GameOver);

        let head = state.head();
        let food = state.food();
        let ticks = state.tick_count();
        let heading = state.heading();

        for _ in 0..5 {
            state = state.advance_tick().apply_direction(Direction::Up);
        }

        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.head(), head);
        assert_eq!(state.food(), food);
        assert_eq!(state.tick_count(), ticks);
        assert_eq!(state.heading(), heading);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn random_walk_preserves_engine_invariants() {
        let mut driver = StdRng::seed_from_u64(99);
        let mut state = GameState::new_with_seed(bounds(12, 8), 7);

        for _ in 0..500 {
            if driver.gen_bool(0.3) {
                let requested = match driver.gen_range(0..4) {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                state = state.apply_direction(requested);
            }
            state = state.advance_tick();

            assert!(state.len() >= 1);
            assert!(state.food().is_within_bounds(state.bounds()));
            for segment in state.segments() {
                assert!(segment.is_within_bounds(state.bounds()));
            }
            if state.status() == GameStatus::Running {
                let distinct: HashSet<Position> = state.segments().copied().collect();
                assert_eq!(distinct.len(), state.len());
            }
        }
    }

    #[test]
    fn frame_has_bordered_dimensions() {
        let state = GameState::new_with_seed(bounds(6, 4), 11);
        let frame = state.render();

        assert_eq!(frame.rows.len(), 6);
        for row in &frame.rows {
            assert_eq!(row.len(), 8);
        }

        for cell in &frame.rows[0] {
            assert_eq!(cell.ch, '-');
            assert_eq!(cell.tag, CellTag::Border);
        }
        for cell in &frame.rows[5] {
            assert_eq!(cell.ch, '-');
        }
        for row in &frame.rows[1..5] {
            assert_eq!(row[0].ch, '|');
            assert_eq!(row[7].ch, '|');
            assert_eq!(row[0].tag, CellTag::Border);
        }
    }

    #[test]
    fn frame_draws_head_body_and_food_with_tags() {
        let state = GameState::new_with_seed(bounds(6, 4), 12)
            .with_snake(
                vec![
                    Position { x: 2, y: 1 },
                    Position { x: 1, y: 1 },
                ],
                Direction::Right,
            )
            .with_food(Position { x: 4, y: 2 });
        let frame = state.render();

        assert_eq!(frame.rows[2][3].ch, '0');
        assert_eq!(frame.rows[2][3].tag, CellTag::Head);
        assert_eq!(frame.rows[2][2].ch, 'O');
        assert_eq!(frame.rows[2][2].tag, CellTag::Body);
        assert_eq!(frame.rows[3][5].ch, 'X');
        assert_eq!(frame.rows[3][5].tag, CellTag::Food);
    }

    #[test]
    fn food_is_drawn_over_occupied_cells() {
        // The placement policy lets food land on the snake; the draw order
        // puts food on top.
        let state = GameState::new_with_seed(bounds(6, 4), 13)
            .with_snake(
                vec![
                    Position { x: 2, y: 1 },
                    Position { x: 1, y: 1 },
                ],
                Direction::Right,
            )
            .with_food(Position { x: 1, y: 1 });
        let frame = state.render();

        assert_eq!(frame.rows[2][2].ch, 'X');
        assert_eq!(frame.rows[2][2].tag, CellTag::Food);
    }

    #[test]
    fn finished_session_renders_fixed_message() {
        let state = GameState::new_with_seed(bounds(20, 10), 14)
            .with_snake(vec![Position { x: 0, y: 5 }], Direction::Left)
            .advance_tick()
            .advance_tick();

        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(
            state.render().to_plain_string(),
            "Game Over!\nPress q to quit.\n"
        );
        for row in &state.render().rows {
            for cell in row {
                assert_eq!(cell.tag, CellTag::Plain);
            }
        }
    }
}
