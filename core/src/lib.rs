#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Physnake engine.
//!
//! This crate defines the message surface that connects the controller, the
//! authoritative world, and the simulation systems. The controller submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what actually changed. Systems read immutable views such as
//! [`SnakeView`] and [`FoodSnapshot`] and never mutate the world directly.

mod config;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use config::{ConfigError, GameConfig, PhysicsConfig, SpawnPolicy};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Physnake.";

/// Cardinal directions the snake can travel in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing y coordinates.
    Up,
    /// Movement toward increasing y coordinates.
    Down,
    /// Movement toward decreasing x coordinates.
    Left,
    /// Movement toward increasing x coordinates.
    Right,
}

impl Direction {
    /// Every direction in clockwise order starting from [`Direction::Up`].
    pub const CLOCKWISE: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the direction pointing the exact opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Next direction in clockwise order.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Next direction in counter-clockwise order.
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }

    /// Reports whether `other` would reverse travel along the same axis.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit offset of the direction expressed in whole cells.
    #[must_use]
    pub const fn unit(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Location on the playfield expressed in world units aligned to the grid.
///
/// Coordinates are always multiples of the configured grid size and compare
/// exactly; there is no tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    x: i32,
    y: i32,
}

impl GridPosition {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the position one grid cell away in the provided direction.
    #[must_use]
    pub fn offset(self, direction: Direction, grid_size: u32) -> Self {
        let step = i32::try_from(grid_size).unwrap_or(i32::MAX);
        let (dx, dy) = direction.unit();
        Self {
            x: self.x.saturating_add(dx.saturating_mul(step)),
            y: self.y.saturating_add(dy.saturating_mul(step)),
        }
    }

    /// Converts the position into continuous world space.
    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Kinds of food that can be spawned, each carrying a consumption effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    /// Regular food that awards points and grows the snake.
    Ordinary,
    /// Rare food that removes trailing segments without awarding points.
    Shrink,
}

/// Lifecycle phases of a single game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    /// The session exists but has not been started.
    Ready,
    /// The simulation advances on every clock step.
    Running,
    /// Clock steps are consumed without effect until resumed.
    Paused,
    /// Terminal state reached after a fatal collision.
    GameOver,
}

impl PlayState {
    /// Reports whether the session reached its terminal state.
    #[must_use]
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver)
    }

    /// Reports whether the session is paused.
    #[must_use]
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }
}

/// Collisions that end a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FatalCollision {
    /// The head landed on one of the snake's own segments.
    SelfCollision,
    /// The head left the playfield.
    Boundary,
}

/// Rectangular playfield subdivided into square grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Playfield {
    width: u32,
    height: u32,
    grid_size: u32,
}

impl Playfield {
    /// Creates a playfield descriptor from world-unit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32, grid_size: u32) -> Self {
        Self {
            width,
            height,
            grid_size,
        }
    }

    /// Width of the playfield in world units.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the playfield in world units.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Edge length of a single grid cell in world units.
    #[must_use]
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Number of whole cells along the horizontal axis.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        if self.grid_size == 0 {
            0
        } else {
            self.width / self.grid_size
        }
    }

    /// Number of whole cells along the vertical axis.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        if self.grid_size == 0 {
            0
        } else {
            self.height / self.grid_size
        }
    }

    /// Reports whether the position lies within `[0, width) x [0, height)`.
    #[must_use]
    pub fn contains(&self, position: GridPosition) -> bool {
        let inside_x = u32::try_from(position.x()).map_or(false, |x| x < self.width);
        let inside_y = u32::try_from(position.y()).map_or(false, |y| y < self.height);
        inside_x && inside_y
    }

    /// Grid-aligned cell closest to the centre of the playfield.
    #[must_use]
    pub fn center_cell(&self) -> GridPosition {
        if self.grid_size == 0 {
            return GridPosition::new(0, 0);
        }
        let x = (self.width / 2) / self.grid_size * self.grid_size;
        let y = (self.height / 2) / self.grid_size * self.grid_size;
        GridPosition::new(
            i32::try_from(x).unwrap_or(i32::MAX),
            i32::try_from(y).unwrap_or(i32::MAX),
        )
    }

    /// Number of cells available for spawning along each axis once a
    /// one-cell margin is reserved on every side.
    ///
    /// Degenerate playfields still report at least one cell per axis so
    /// spawning never has an empty range to sample from.
    #[must_use]
    pub const fn inset_cells(&self) -> (u32, u32) {
        if self.grid_size == 0 {
            return (1, 1);
        }
        let margin = 2 * self.grid_size;
        let columns = self.width.saturating_sub(margin) / self.grid_size;
        let rows = self.height.saturating_sub(margin) / self.grid_size;
        (
            if columns == 0 { 1 } else { columns },
            if rows == 0 { 1 } else { rows },
        )
    }

    /// Converts an inset cell index into the grid position of its corner.
    #[must_use]
    pub fn inset_cell_position(&self, column: u32, row: u32) -> GridPosition {
        let margin = u64::from(self.grid_size);
        let x = margin + u64::from(column) * u64::from(self.grid_size);
        let y = margin + u64::from(row) * u64::from(self.grid_size);
        GridPosition::new(
            i32::try_from(x).unwrap_or(i32::MAX),
            i32::try_from(y).unwrap_or(i32::MAX),
        )
    }

    /// Reports whether the position is a grid-aligned cell inside the inset
    /// spawning rectangle.
    #[must_use]
    pub fn is_inset_cell(&self, position: GridPosition) -> bool {
        if self.grid_size == 0 {
            return false;
        }
        let size = i64::from(self.grid_size);
        let (columns, rows) = self.inset_cells();
        let x = i64::from(position.x()) - size;
        let y = i64::from(position.y()) - size;
        x >= 0
            && y >= 0
            && x % size == 0
            && y % size == 0
            && x / size < i64::from(columns)
            && y / size < i64::from(rows)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Moves a ready session into the running state.
    Start,
    /// Flips between the running and paused states.
    TogglePause,
    /// Queues a turn for the next snake step.
    SetDirection {
        /// Direction requested by the player.
        direction: Direction,
    },
    /// Advances the snake by a single grid cell.
    StepSnake,
    /// Appends a duplicate of the tail segment.
    GrowSnake,
    /// Removes trailing segments, never dropping below one.
    ShrinkSnake {
        /// Number of segments to remove.
        segments: u32,
    },
    /// Adds points to the session score.
    AwardPoints {
        /// Points to add.
        points: u32,
    },
    /// Installs a freshly spawned food item.
    PlaceFood {
        /// Kind of the new food item.
        kind: FoodKind,
        /// Top-left corner of the food's cell in world units.
        position: Vec2,
    },
    /// Refreshes the cached food projection from its physics body.
    SyncFood {
        /// Top-left anchored position derived from the body centre.
        position: Vec2,
        /// Rotation of the body in radians.
        angle: f32,
    },
    /// Ends the session after a fatal collision.
    EndGame {
        /// Collision that ended the session.
        cause: FatalCollision,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Reports that the session left the ready state.
    Started,
    /// Reports that the session was paused or resumed.
    PauseToggled {
        /// Whether the session is now paused.
        paused: bool,
    },
    /// Confirms that a turn was queued for the next step.
    DirectionQueued {
        /// Direction that will be committed on the next step.
        direction: Direction,
    },
    /// Reports that a reversal request was dropped.
    DirectionRejected {
        /// Direction that was requested.
        requested: Direction,
        /// Direction the snake is currently travelling in.
        current: Direction,
    },
    /// Confirms that the snake advanced one cell.
    SnakeStepped {
        /// Head position after the step.
        head: GridPosition,
        /// Direction committed for the step.
        direction: Direction,
    },
    /// Reports a change to the number of snake segments.
    SnakeResized {
        /// Segment count before the change.
        from: usize,
        /// Segment count after the change.
        to: usize,
    },
    /// Reports a change to the session score.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// Confirms that a food item was installed.
    FoodPlaced {
        /// Kind of the new food item.
        kind: FoodKind,
        /// Top-left corner of the food's cell.
        position: Vec2,
    },
    /// Reports that the session ended.
    GameEnded {
        /// Collision that ended the session.
        cause: FatalCollision,
        /// Final score of the session.
        score: u32,
    },
    /// Reports that a command was dropped because of the current play state.
    CommandIgnored {
        /// State the world was in when the command arrived.
        state: PlayState,
    },
}

/// Read-only view of the snake used by systems.
#[derive(Clone, Copy, Debug)]
pub struct SnakeView<'a> {
    segments: &'a [GridPosition],
    direction: Direction,
}

impl<'a> SnakeView<'a> {
    /// Captures a new snake view backed by the provided segments.
    #[must_use]
    pub const fn new(segments: &'a [GridPosition], direction: Direction) -> Self {
        Self {
            segments,
            direction,
        }
    }

    /// Head segment, if the snake has any segments at all.
    #[must_use]
    pub fn head(&self) -> Option<GridPosition> {
        self.segments.first().copied()
    }

    /// Every segment except the head.
    #[must_use]
    pub fn body(&self) -> &'a [GridPosition] {
        self.segments.get(1..).unwrap_or(&[])
    }

    /// All segments ordered from head to tail.
    #[must_use]
    pub const fn segments(&self) -> &'a [GridPosition] {
        self.segments
    }

    /// Number of segments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    /// Reports whether the snake has no segments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Direction committed by the most recent step.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// Immutable copy of the cached food projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodSnapshot {
    /// Kind of the food item.
    pub kind: FoodKind,
    /// Top-left anchored position in world units.
    pub position: Vec2,
    /// Rotation of the underlying physics body in radians.
    pub angle: f32,
}

#[cfg(test)]
mod tests {
    use super::{Direction, GridPosition, Playfield};

    #[test]
    fn every_direction_has_a_distinct_opposite() {
        for direction in Direction::CLOCKWISE {
            assert_ne!(direction, direction.opposite());
            assert_eq!(direction.opposite().opposite(), direction);
            assert!(direction.is_opposite(direction.opposite()));
        }
    }

    #[test]
    fn rotation_follows_the_clockwise_cycle() {
        for (index, direction) in Direction::CLOCKWISE.iter().enumerate() {
            let next = Direction::CLOCKWISE[(index + 1) % 4];
            assert_eq!(direction.clockwise(), next);
            assert_eq!(next.counter_clockwise(), *direction);
            assert!(!direction.is_opposite(direction.clockwise()));
        }
    }

    #[test]
    fn offset_moves_a_single_grid_cell() {
        let origin = GridPosition::new(40, 40);
        assert_eq!(origin.offset(Direction::Up, 20), GridPosition::new(40, 20));
        assert_eq!(origin.offset(Direction::Down, 20), GridPosition::new(40, 60));
        assert_eq!(origin.offset(Direction::Left, 20), GridPosition::new(20, 40));
        assert_eq!(origin.offset(Direction::Right, 20), GridPosition::new(60, 40));
    }

    #[test]
    fn playfield_contains_is_half_open() {
        let playfield = Playfield::new(200, 100, 20);
        assert!(playfield.contains(GridPosition::new(0, 0)));
        assert!(playfield.contains(GridPosition::new(180, 80)));
        assert!(!playfield.contains(GridPosition::new(200, 0)));
        assert!(!playfield.contains(GridPosition::new(-20, 0)));
        assert!(!playfield.contains(GridPosition::new(0, 100)));
    }

    #[test]
    fn center_cell_snaps_to_grid() {
        let playfield = Playfield::new(210, 130, 20);
        assert_eq!(playfield.center_cell(), GridPosition::new(100, 60));
    }

    #[test]
    fn inset_cells_reserve_a_margin() {
        let playfield = Playfield::new(200, 120, 20);
        assert_eq!(playfield.inset_cells(), (8, 4));
        assert_eq!(playfield.inset_cell_position(0, 0), GridPosition::new(20, 20));
        assert_eq!(playfield.inset_cell_position(7, 3), GridPosition::new(160, 80));
        assert!(playfield.is_inset_cell(GridPosition::new(160, 80)));
        assert!(!playfield.is_inset_cell(GridPosition::new(180, 80)));
        assert!(!playfield.is_inset_cell(GridPosition::new(0, 20)));
        assert!(!playfield.is_inset_cell(GridPosition::new(25, 20)));
    }

    #[test]
    fn inset_cells_never_collapse_to_zero() {
        let playfield = Playfield::new(40, 40, 20);
        assert_eq!(playfield.inset_cells(), (1, 1));
    }
}
