//! Grid-stepped snake body.

use physnake_core::{Direction, GridPosition, SnakeView};

/// Segment chain that advances one grid cell per step.
///
/// Index 0 is the head. A turn requested through [`Snake::set_direction`] is
/// only committed by the next [`Snake::step`], and a request that would
/// reverse the committed direction is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<GridPosition>,
    direction: Direction,
    next_direction: Direction,
    grid_size: u32,
}

impl Snake {
    /// Creates a straight snake whose body trails behind the head.
    #[must_use]
    pub fn new(head: GridPosition, length: u32, direction: Direction, grid_size: u32) -> Self {
        let trailing = direction.opposite();
        let mut segments = Vec::with_capacity(usize::try_from(length).unwrap_or(0));
        let mut cursor = head;
        for _ in 0..length {
            segments.push(cursor);
            cursor = cursor.offset(trailing, grid_size);
        }
        Self::from_segments(segments, direction, grid_size)
    }

    /// Creates a snake from explicit segments ordered head first.
    #[must_use]
    pub fn from_segments(
        segments: Vec<GridPosition>,
        direction: Direction,
        grid_size: u32,
    ) -> Self {
        Self {
            segments,
            direction,
            next_direction: direction,
            grid_size,
        }
    }

    /// Queues a turn for the next step.
    ///
    /// Returns `false` when the request reverses the committed direction and
    /// was therefore ignored.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.direction.is_opposite(requested) {
            return false;
        }
        self.next_direction = requested;
        true
    }

    /// Commits the queued direction and advances the head by one cell.
    ///
    /// The tail is dropped so the length is unchanged. An empty snake only
    /// commits its direction.
    pub fn step(&mut self) {
        self.direction = self.next_direction;
        let Some(head) = self.segments.first().copied() else {
            return;
        };
        self.segments.insert(0, head.offset(self.direction, self.grid_size));
        let _ = self.segments.pop();
    }

    /// Appends a duplicate of the tail segment.
    ///
    /// The duplicate separates from the tail on the following step, so the
    /// snake is one segment longer from then on.
    pub fn grow(&mut self) {
        if let Some(tail) = self.segments.last().copied() {
            self.segments.push(tail);
        }
    }

    /// Removes up to `segments` trailing segments, keeping at least one.
    ///
    /// Returns the number of segments removed.
    pub fn shrink(&mut self, segments: u32) -> usize {
        let requested = usize::try_from(segments).unwrap_or(usize::MAX);
        let removable = self.segments.len().saturating_sub(1);
        let removed = requested.min(removable);
        self.segments.truncate(self.segments.len() - removed);
        removed
    }

    /// Segments ordered from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[GridPosition] {
        &self.segments
    }

    /// Head segment, if any.
    #[must_use]
    pub fn head(&self) -> Option<GridPosition> {
        self.segments.first().copied()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Reports whether the snake has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Direction committed by the most recent step.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction that the next step will commit.
    #[must_use]
    pub const fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Captures a read-only view for systems.
    #[must_use]
    pub fn view(&self) -> SnakeView<'_> {
        SnakeView::new(&self.segments, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new(GridPosition::new(100, 100), 3, Direction::Right, 20);
        assert_eq!(
            snake.segments(),
            &[
                GridPosition::new(100, 100),
                GridPosition::new(80, 100),
                GridPosition::new(60, 100),
            ]
        );
    }

    #[test]
    fn empty_snake_steps_without_panicking() {
        let mut snake = Snake::from_segments(Vec::new(), Direction::Up, 20);
        assert!(snake.set_direction(Direction::Left));
        snake.step();
        snake.grow();
        assert_eq!(snake.shrink(3), 0);
        assert!(snake.is_empty());
        assert_eq!(snake.direction(), Direction::Left);
    }

    #[test]
    fn single_segment_snake_moves_its_head() {
        let mut snake = Snake::from_segments(vec![GridPosition::new(20, 20)], Direction::Down, 20);
        snake.step();
        assert_eq!(snake.segments(), &[GridPosition::new(20, 40)]);
    }
}
