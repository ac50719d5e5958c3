#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure collision checks evaluated once per game step.

use physnake_core::{
    Command, FatalCollision, FoodKind, FoodSnapshot, GridPosition, Playfield, SnakeView,
};

/// Configuration parameters describing the effect of each food kind.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    points_per_food: u32,
    shrink_segments: u32,
}

impl Config {
    /// Creates a new configuration from the ordinary reward and shrink amount.
    #[must_use]
    pub const fn new(points_per_food: u32, shrink_segments: u32) -> Self {
        Self {
            points_per_food,
            shrink_segments,
        }
    }
}

/// Outcome of evaluating a single step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Kind of food consumed by the head, if any.
    pub consumed: Option<FoodKind>,
    /// Collision that ends the session, if any.
    pub fatal: Option<FatalCollision>,
}

/// Stateless resolver translating collisions into world commands.
#[derive(Debug)]
pub struct CollisionResolver {
    config: Config,
}

impl CollisionResolver {
    /// Creates a new resolver using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Evaluates the snake against the food, itself and the playfield bounds,
    /// appending the resulting commands in application order.
    ///
    /// Consumption effects are emitted before any fatal collision so that a
    /// terminal step can still score. Respawning the consumed food is left to
    /// the caller.
    pub fn handle(
        &self,
        snake: SnakeView<'_>,
        food: Option<&FoodSnapshot>,
        playfield: Playfield,
        out: &mut Vec<Command>,
    ) -> CollisionReport {
        let report = evaluate(snake, food, playfield);
        if let Some(kind) = report.consumed {
            self.consumption_effects(kind, out);
        }
        if let Some(cause) = report.fatal {
            out.push(Command::EndGame { cause });
        }
        report
    }

    /// Appends the commands that apply the effect of consuming `kind`.
    pub fn consumption_effects(&self, kind: FoodKind, out: &mut Vec<Command>) {
        match kind {
            FoodKind::Ordinary => {
                out.push(Command::AwardPoints {
                    points: self.config.points_per_food,
                });
                out.push(Command::GrowSnake);
            }
            FoodKind::Shrink => out.push(Command::ShrinkSnake {
                segments: self.config.shrink_segments,
            }),
        }
    }
}

/// Evaluates all collisions for the current step without side effects.
#[must_use]
pub fn evaluate(
    snake: SnakeView<'_>,
    food: Option<&FoodSnapshot>,
    playfield: Playfield,
) -> CollisionReport {
    let Some(head) = snake.head() else {
        return CollisionReport::default();
    };

    let consumed = food
        .filter(|food| reaches_food(head, food, playfield.grid_size()))
        .map(|food| food.kind);

    let fatal = if hits_body(head, snake.body()) {
        Some(FatalCollision::SelfCollision)
    } else if !playfield.contains(head) {
        Some(FatalCollision::Boundary)
    } else {
        None
    };

    CollisionReport { consumed, fatal }
}

/// Reports whether the head is strictly closer than one cell to the food.
#[must_use]
pub fn reaches_food(head: GridPosition, food: &FoodSnapshot, grid_size: u32) -> bool {
    head.as_vec2().distance(food.position) < grid_size as f32
}

/// Reports whether the head lies exactly on any body segment.
#[must_use]
pub fn hits_body(head: GridPosition, body: &[GridPosition]) -> bool {
    body.iter().any(|segment| *segment == head)
}
