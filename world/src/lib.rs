#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Physnake.

mod snake;

use physnake_core::{
    Command, Direction, Event, FoodSnapshot, GameConfig, PlayState, Playfield, WELCOME_BANNER,
};

pub use snake::Snake;

const INITIAL_DIRECTION: Direction = Direction::Right;

/// Represents the authoritative state of one game session.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    playfield: Playfield,
    snake: Snake,
    food: Option<FoodSnapshot>,
    score: u32,
    play_state: PlayState,
}

impl World {
    /// Creates a world in the ready state with the snake centred on the playfield.
    ///
    /// No food is present until a [`Command::PlaceFood`] is applied.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let playfield = config.playfield();
        let snake = Snake::new(
            playfield.center_cell(),
            config.initial_snake_length,
            INITIAL_DIRECTION,
            playfield.grid_size(),
        );
        Self::with_snake(playfield, snake)
    }

    /// Creates a ready world around an explicitly shaped snake.
    #[must_use]
    pub fn with_snake(playfield: Playfield, snake: Snake) -> Self {
        Self {
            banner: WELCOME_BANNER,
            playfield,
            snake,
            food: None,
            score: 0,
            play_state: PlayState::Ready,
        }
    }

    fn ignore(&self, out_events: &mut Vec<Event>) {
        out_events.push(Event::CommandIgnored {
            state: self.play_state,
        });
    }

    fn resized(&self, from: usize, out_events: &mut Vec<Event>) {
        let to = self.snake.len();
        if from != to {
            out_events.push(Event::SnakeResized { from, to });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Snake and score mutations are only honoured while running, food updates
/// are honoured until the session ends, and nothing mutates the world once it
/// reached [`PlayState::GameOver`].
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let state = world.play_state;
    match command {
        Command::Start => {
            if state == PlayState::Ready {
                world.play_state = PlayState::Running;
                out_events.push(Event::Started);
            } else {
                world.ignore(out_events);
            }
        }
        Command::TogglePause => {
            let next = match state {
                PlayState::Running => PlayState::Paused,
                PlayState::Paused => PlayState::Running,
                PlayState::Ready | PlayState::GameOver => {
                    world.ignore(out_events);
                    return;
                }
            };
            world.play_state = next;
            out_events.push(Event::PauseToggled {
                paused: next.is_paused(),
            });
        }
        Command::SetDirection { direction } => {
            if state.is_game_over() {
                world.ignore(out_events);
                return;
            }
            if world.snake.set_direction(direction) {
                out_events.push(Event::DirectionQueued { direction });
            } else {
                out_events.push(Event::DirectionRejected {
                    requested: direction,
                    current: world.snake.direction(),
                });
            }
        }
        Command::StepSnake => {
            if state != PlayState::Running {
                world.ignore(out_events);
                return;
            }
            world.snake.step();
            if let Some(head) = world.snake.head() {
                out_events.push(Event::SnakeStepped {
                    head,
                    direction: world.snake.direction(),
                });
            }
        }
        Command::GrowSnake => {
            if state != PlayState::Running {
                world.ignore(out_events);
                return;
            }
            let before = world.snake.len();
            world.snake.grow();
            world.resized(before, out_events);
        }
        Command::ShrinkSnake { segments } => {
            if state != PlayState::Running {
                world.ignore(out_events);
                return;
            }
            let before = world.snake.len();
            let _ = world.snake.shrink(segments);
            world.resized(before, out_events);
        }
        Command::AwardPoints { points } => {
            if state != PlayState::Running {
                world.ignore(out_events);
                return;
            }
            world.score = world.score.saturating_add(points);
            out_events.push(Event::ScoreChanged { score: world.score });
        }
        Command::PlaceFood { kind, position } => {
            if state.is_game_over() {
                world.ignore(out_events);
                return;
            }
            world.food = Some(FoodSnapshot {
                kind,
                position,
                angle: 0.0,
            });
            out_events.push(Event::FoodPlaced { kind, position });
        }
        Command::SyncFood { position, angle } => {
            if state.is_game_over() {
                world.ignore(out_events);
                return;
            }
            if let Some(food) = world.food.as_mut() {
                food.position = position;
                food.angle = angle;
            }
        }
        Command::EndGame { cause } => {
            if state != PlayState::Running {
                world.ignore(out_events);
                return;
            }
            world.play_state = PlayState::GameOver;
            out_events.push(Event::GameEnded {
                cause,
                score: world.score,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use physnake_core::{FoodSnapshot, GridPosition, PlayState, Playfield, SnakeView};

    use super::{Snake, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the playfield the session is played on.
    #[must_use]
    pub fn playfield(world: &World) -> Playfield {
        world.playfield
    }

    /// Provides read-only access to the snake.
    #[must_use]
    pub fn snake(world: &World) -> &Snake {
        &world.snake
    }

    /// Captures a read-only view of the snake for systems.
    #[must_use]
    pub fn snake_view(world: &World) -> SnakeView<'_> {
        world.snake.view()
    }

    /// Segments of the snake ordered from head to tail.
    #[must_use]
    pub fn snake_segments(world: &World) -> &[GridPosition] {
        world.snake.segments()
    }

    /// Cached projection of the current food item, if one was placed.
    #[must_use]
    pub fn food(world: &World) -> Option<FoodSnapshot> {
        world.food
    }

    /// Cached food position, if one was placed.
    #[must_use]
    pub fn food_position(world: &World) -> Option<Vec2> {
        world.food.map(|food| food.position)
    }

    /// Current session score.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Current lifecycle phase of the session.
    #[must_use]
    pub fn play_state(world: &World) -> PlayState {
        world.play_state
    }
}
