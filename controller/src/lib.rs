#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Orchestrates one Physnake session.
//!
//! [`GameController`] owns the world, the physics simulation, the clock and
//! the food spawner. Every clock step while running performs a snake step, a
//! physics update, a food projection and a collision evaluation, in that
//! order. All world mutation goes through `physnake_world::apply`.

mod input;
mod session;

use std::time::Duration;

use physnake_core::{
    Command, ConfigError, Direction, Event, FoodSnapshot, GameConfig, GridPosition, PlayState,
    Playfield,
};
use physnake_system_clock::{self as clock, SimulationClock};
use physnake_system_collision::{self as collision, CollisionResolver};
use physnake_system_physics::{FoodBody, PhysicsWorld};
use physnake_system_spawning::{self as spawning, FoodSpawner};
use physnake_world::{self as world, query, World};
use tracing::{debug, info, trace};

pub use input::{dispatch, InputEvent, InputHandler};
pub use session::SessionHost;

/// One-shot copy of everything a renderer needs to draw a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    /// Playfield the session is played on.
    pub playfield: Playfield,
    /// Snake segments ordered from head to tail.
    pub segments: Vec<GridPosition>,
    /// Direction committed by the most recent step.
    pub direction: Direction,
    /// Current food projection, if any.
    pub food: Option<FoodSnapshot>,
    /// Session score.
    pub score: u32,
    /// Lifecycle phase of the session.
    pub play_state: PlayState,
    /// Snake steps per second.
    pub speed: u32,
}

/// Drives a single game session from frame timestamps and player input.
#[derive(Debug)]
pub struct GameController {
    config: GameConfig,
    world: World,
    physics: PhysicsWorld,
    food: Option<FoodBody>,
    clock: SimulationClock,
    spawner: FoodSpawner,
    resolver: CollisionResolver,
    speed: u32,
    destroyed: bool,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl GameController {
    /// Builds a ready session with a snake in the centre and one food item.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let playfield = config.playfield();
        let speed = config.clamp_fps(config.fps);
        let mut controller = Self {
            world: World::new(&config),
            physics: PhysicsWorld::new(playfield, &config.physics),
            food: None,
            clock: SimulationClock::new(clock::Config::new(speed, config.max_catch_up_steps)),
            spawner: FoodSpawner::new(spawning::Config::new(
                config.spawn_policy,
                config.physics.max_impulse,
                config.seed,
            )),
            resolver: CollisionResolver::new(collision::Config::new(
                config.points_per_food,
                config.shrink_segments,
            )),
            speed,
            destroyed: false,
            commands: Vec::new(),
            events: Vec::new(),
            config,
        };
        controller.spawn_food();
        debug!(
            width = playfield.width(),
            height = playfield.height(),
            grid = playfield.grid_size(),
            speed,
            "session created"
        );
        Ok(controller)
    }

    /// Moves a ready session into the running state and restarts the clock.
    pub fn start(&mut self) {
        if self.destroyed {
            return;
        }
        self.apply(Command::Start);
        if query::play_state(&self.world) == PlayState::Running {
            self.clock.reset();
        }
    }

    /// Queues a turn; reversals are ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.destroyed {
            return;
        }
        self.apply(Command::SetDirection { direction });
    }

    /// Flips between running and paused; ignored before start and after game over.
    pub fn toggle_pause(&mut self) {
        if self.destroyed {
            return;
        }
        self.apply(Command::TogglePause);
    }

    /// Changes the step rate, clamped to the configured bounds.
    ///
    /// Time already accumulated by the clock is kept as is.
    pub fn set_speed(&mut self, fps: u32) {
        if self.destroyed {
            return;
        }
        let clamped = self.config.clamp_fps(fps);
        if clamped != fps {
            debug!(requested = fps, applied = clamped, "speed clamped");
        }
        if clamped == self.speed {
            return;
        }
        self.speed = clamped;
        self.clock.set_fps(clamped);
        debug!(speed = clamped, "speed changed");
    }

    /// Changes the step rate by a signed delta, clamped to the configured bounds.
    pub fn adjust_speed(&mut self, delta: i32) {
        let target = i64::from(self.speed) + i64::from(delta);
        let target = u32::try_from(target.max(0)).unwrap_or(u32::MAX);
        self.set_speed(target);
    }

    /// Advances the session to `timestamp`, running every step that is due.
    ///
    /// The clock is not advanced before the session starts. While paused or
    /// after game over, due steps are consumed without effect.
    pub fn on_frame(&mut self, timestamp: Duration) {
        if self.destroyed || query::play_state(&self.world) == PlayState::Ready {
            return;
        }
        let steps = self.clock.advance(timestamp);
        for _ in 0..steps {
            self.step();
        }
    }

    /// Routes an input event through the [`InputHandler`] implementation.
    pub fn dispatch(&mut self, event: InputEvent) {
        dispatch(self, event);
    }

    /// Releases the physics simulation and leaves the controller inert.
    ///
    /// Calling this more than once has no further effect.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        if let Some(mut food) = self.food.take() {
            self.physics.remove_body(&mut food);
        }
        self.physics.destroy();
        info!(score = query::score(&self.world), "session destroyed");
    }

    fn step(&mut self) {
        if query::play_state(&self.world) != PlayState::Running {
            return;
        }

        self.apply(Command::StepSnake);
        self.physics.update();
        self.sync_food();

        let playfield = query::playfield(&self.world);
        let food = query::food(&self.world);
        let mut commands = std::mem::take(&mut self.commands);
        let report = self.resolver.handle(
            query::snake_view(&self.world),
            food.as_ref(),
            playfield,
            &mut commands,
        );
        for command in commands.drain(..) {
            self.apply(command);
        }
        self.commands = commands;

        if let Some(kind) = report.consumed {
            debug!(?kind, "food consumed");
            // A finished session keeps its last food in place.
            if report.fatal.is_none() {
                self.respawn_food();
            }
        }
    }

    fn sync_food(&mut self) {
        let Some(food) = self.food.as_mut() else {
            return;
        };
        food.update(&self.physics);
        let position = food.position();
        let angle = food.angle();
        self.apply(Command::SyncFood { position, angle });
    }

    fn respawn_food(&mut self) {
        if let Some(mut previous) = self.food.take() {
            self.physics.remove_body(&mut previous);
        }
        self.spawn_food();
    }

    fn spawn_food(&mut self) {
        let playfield = query::playfield(&self.world);
        let spawn = self.spawner.next(playfield);
        let mut food = FoodBody::new(spawn.kind, spawn.cell, spawn.velocity, playfield.grid_size());
        let _ = self.physics.add_body(&mut food);
        let position = food.position();
        self.food = Some(food);
        self.apply(Command::PlaceFood {
            kind: spawn.kind,
            position,
        });
    }

    fn apply(&mut self, command: Command) {
        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events);
        for event in &self.events {
            log_event(event);
        }
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        query::score(&self.world)
    }

    /// Reports whether the session has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        query::play_state(&self.world).is_game_over()
    }

    /// Reports whether the session is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        query::play_state(&self.world).is_paused()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn play_state(&self) -> PlayState {
        query::play_state(&self.world)
    }

    /// Current step rate in steps per second.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Snake segments ordered from head to tail.
    #[must_use]
    pub fn snake_segments(&self) -> &[GridPosition] {
        query::snake_segments(&self.world)
    }

    /// Direction committed by the most recent step.
    #[must_use]
    pub fn snake_direction(&self) -> Direction {
        query::snake(&self.world).direction()
    }

    /// Current food projection.
    #[must_use]
    pub fn food(&self) -> Option<FoodSnapshot> {
        query::food(&self.world)
    }

    /// Playfield the session is played on.
    #[must_use]
    pub fn playfield(&self) -> Playfield {
        query::playfield(&self.world)
    }

    /// Banner adapters may show when the session boots.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    /// Configuration the session was built from.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reports whether [`GameController::destroy`] has been called.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Copies the state a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            playfield: self.playfield(),
            segments: self.snake_segments().to_vec(),
            direction: self.snake_direction(),
            food: self.food(),
            score: self.score(),
            play_state: self.play_state(),
            speed: self.speed,
        }
    }
}

impl InputHandler for GameController {
    fn on_direction_request(&mut self, direction: Direction) {
        self.set_direction(direction);
    }

    fn on_pause_toggle(&mut self) {
        self.toggle_pause();
    }

    fn on_speed_change(&mut self, fps: u32) {
        self.set_speed(fps);
    }

    fn on_speed_step(&mut self, delta: i32) {
        self.adjust_speed(delta);
    }
}

fn log_event(event: &Event) {
    match event {
        Event::Started => info!("game started"),
        Event::PauseToggled { paused } => info!(paused, "pause toggled"),
        Event::GameEnded { cause, score } => info!(?cause, score, "game over"),
        Event::DirectionQueued { direction } => trace!(?direction, "direction queued"),
        Event::DirectionRejected { requested, current } => {
            debug!(?requested, ?current, "reversal ignored");
        }
        Event::SnakeStepped { head, direction } => trace!(?head, ?direction, "snake stepped"),
        Event::SnakeResized { from, to } => debug!(from, to, "snake resized"),
        Event::ScoreChanged { score } => debug!(score, "score changed"),
        Event::FoodPlaced { kind, position } => debug!(?kind, ?position, "food placed"),
        Event::CommandIgnored { state } => debug!(?state, "command ignored"),
    }
}
