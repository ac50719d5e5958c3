use std::time::Duration;

use glam::Vec2;
use physnake_controller::{GameController, InputEvent, SessionHost};
use physnake_core::{
    ConfigError, Direction, FoodKind, GameConfig, GridPosition, PhysicsConfig, PlayState,
    SpawnPolicy,
};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn still_config() -> GameConfig {
    GameConfig {
        width: 200,
        height: 200,
        physics: PhysicsConfig {
            gravity: Vec2::ZERO,
            max_impulse: 0.0,
            ..PhysicsConfig::default()
        },
        ..GameConfig::default()
    }
}

fn running(config: GameConfig) -> GameController {
    let mut controller = GameController::new(config).expect("valid config");
    controller.start();
    controller.on_frame(ms(0));
    controller
}

fn head(controller: &GameController) -> GridPosition {
    controller.snake_segments()[0]
}

fn food_cell(controller: &GameController) -> GridPosition {
    let position = controller.food().expect("food present").position;
    GridPosition::new(position.x.round() as i32, position.y.round() as i32)
}

/// Picks a turn that brings the head closer to `target` without reversing.
fn steer(controller: &GameController, target: GridPosition) -> Direction {
    let head = head(controller);
    let current = controller.snake_direction();
    let playfield = controller.playfield();
    let centre = playfield.center_cell();

    let horizontal = match head.x().cmp(&target.x()) {
        std::cmp::Ordering::Less => Some(Direction::Right),
        std::cmp::Ordering::Greater => Some(Direction::Left),
        std::cmp::Ordering::Equal => None,
    };
    let vertical = match head.y().cmp(&target.y()) {
        std::cmp::Ordering::Less => Some(Direction::Down),
        std::cmp::Ordering::Greater => Some(Direction::Up),
        std::cmp::Ordering::Equal => None,
    };
    let towards_centre_vertically = if head.y() < centre.y() {
        Direction::Down
    } else {
        Direction::Up
    };
    let towards_centre_horizontally = if head.x() < centre.x() {
        Direction::Right
    } else {
        Direction::Left
    };

    match (horizontal, vertical) {
        (Some(wanted), _) if !current.is_opposite(wanted) => wanted,
        (Some(_), Some(wanted)) => wanted,
        (Some(_), None) => towards_centre_vertically,
        (None, Some(wanted)) if !current.is_opposite(wanted) => wanted,
        (None, Some(_)) => towards_centre_horizontally,
        (None, None) => current,
    }
}

/// Steps the session one cell at a time until something is eaten.
fn chase_food(controller: &mut GameController, mut now: u64) -> u64 {
    let score = controller.score();
    let length = controller.snake_segments().len();
    for _ in 0..64 {
        let target = food_cell(controller);
        let direction = steer(controller, target);
        controller.set_direction(direction);
        now += 100;
        controller.on_frame(ms(now));
        assert!(!controller.is_game_over(), "steering left the playfield");
        if controller.score() != score || controller.snake_segments().len() != length {
            return now;
        }
    }
    panic!("failed to reach food at {:?}", food_cell(controller));
}

#[test]
fn invalid_configuration_is_rejected() {
    let config = GameConfig {
        grid_size: 0,
        ..GameConfig::default()
    };
    assert!(matches!(
        GameController::new(config),
        Err(ConfigError::ZeroGridSize)
    ));
}

#[test]
fn new_session_is_ready_with_food_on_an_inset_cell() {
    let controller = GameController::new(still_config()).expect("valid config");

    assert_eq!(controller.play_state(), PlayState::Ready);
    assert_eq!(controller.score(), 0);
    assert_eq!(head(&controller), GridPosition::new(100, 100));
    assert_eq!(controller.snake_segments().len(), 3);
    assert_eq!(controller.snake_direction(), Direction::Right);

    let food = controller.food().expect("food spawned at construction");
    assert_eq!(food.kind, FoodKind::Ordinary);
    assert!(controller.playfield().is_inset_cell(food_cell(&controller)));
}

#[test]
fn ready_session_ignores_frames_until_started() {
    let mut controller = GameController::new(still_config()).expect("valid config");
    let before = controller.snapshot();

    controller.on_frame(ms(0));
    controller.on_frame(ms(1_000));
    controller.toggle_pause();

    assert_eq!(controller.snapshot(), before);

    controller.start();
    controller.on_frame(ms(5_000));
    assert_eq!(head(&controller), GridPosition::new(100, 100));
    controller.on_frame(ms(5_100));
    assert_eq!(head(&controller), GridPosition::new(120, 100));
}

#[test]
fn paused_frames_change_nothing() {
    let mut controller = running(GameConfig::default());
    controller.on_frame(ms(100));
    controller.toggle_pause();
    assert!(controller.is_paused());
    let frozen = controller.snapshot();

    for frame in 1..=50 {
        controller.on_frame(ms(100 + frame * 37));
    }

    let after = controller.snapshot();
    assert_eq!(after.segments, frozen.segments);
    assert_eq!(after.score, frozen.score);
    assert_eq!(after.food, frozen.food);

    controller.toggle_pause();
    assert_eq!(controller.play_state(), PlayState::Running);
}

#[test]
fn leaving_the_playfield_ends_the_game() {
    let mut controller = running(still_config());

    controller.on_frame(ms(500));

    assert!(controller.is_game_over());
    assert_eq!(head(&controller), GridPosition::new(200, 100));

    let ended = controller.snapshot();
    controller.set_direction(Direction::Up);
    controller.toggle_pause();
    controller.on_frame(ms(2_000));
    assert_eq!(controller.snapshot(), ended);
}

#[test]
fn reversal_requests_are_ignored() {
    let mut controller = running(GameConfig::default());
    controller.dispatch(InputEvent::DirectionRequest(Direction::Left));
    controller.on_frame(ms(100));

    assert_eq!(controller.snake_direction(), Direction::Right);
    assert_eq!(head(&controller), GridPosition::new(320, 200));
}

#[test]
fn long_stalls_are_capped() {
    let config = GameConfig {
        max_catch_up_steps: 4,
        ..GameConfig::default()
    };
    let mut controller = running(config);

    controller.on_frame(ms(10_000));

    assert_eq!(head(&controller), GridPosition::new(380, 200));
}

#[test]
fn eating_ordinary_food_scores_and_grows() {
    let config = GameConfig {
        initial_snake_length: 1,
        ..still_config()
    };
    let mut controller = running(config);

    let _ = chase_food(&mut controller, 0);

    assert_eq!(controller.score(), 10);
    assert_eq!(controller.snake_segments().len(), 2);
    let food = controller.food().expect("food respawned");
    assert_eq!(food.kind, FoodKind::Ordinary);
    let cell = food_cell(&controller);
    assert_eq!(food.position, Vec2::new(cell.x() as f32, cell.y() as f32));
    assert!(controller.playfield().is_inset_cell(cell));
}

#[test]
fn repeated_meals_apply_the_configured_reward_each_time() {
    let config = GameConfig {
        initial_snake_length: 1,
        points_per_food: 25,
        ..still_config()
    };
    let mut controller = running(config);

    let now = chase_food(&mut controller, 0);
    assert_eq!(controller.score(), 25);
    assert_eq!(controller.snake_segments().len(), 2);

    let _ = chase_food(&mut controller, now);
    assert_eq!(controller.score(), 50);
    assert_eq!(controller.snake_segments().len(), 3);
    assert!(!controller.is_game_over());
}

#[test]
fn eating_shrink_food_removes_segments_without_scoring() {
    let config = GameConfig {
        initial_snake_length: 4,
        spawn_policy: SpawnPolicy::ShrinkChance { probability: 1.0 },
        ..still_config()
    };
    let mut controller = running(config);
    assert_eq!(controller.food().map(|food| food.kind), Some(FoodKind::Shrink));

    let now = chase_food(&mut controller, 0);

    assert_eq!(controller.score(), 0);
    assert_eq!(controller.snake_segments().len(), 2);

    let _ = chase_food(&mut controller, now);
    assert_eq!(controller.snake_segments().len(), 1);
}

#[test]
fn speed_is_clamped_and_steppable() {
    let mut controller = running(GameConfig::default());

    controller.set_speed(50);
    assert_eq!(controller.speed(), 30);
    controller.set_speed(1);
    assert_eq!(controller.speed(), 3);
    controller.adjust_speed(3);
    assert_eq!(controller.speed(), 6);
    controller.dispatch(InputEvent::SpeedChange(12));
    assert_eq!(controller.speed(), 12);
    controller.dispatch(InputEvent::SpeedStep(-30));
    assert_eq!(controller.speed(), 3);
}

#[test]
fn faster_speed_takes_more_steps() {
    let mut controller = running(GameConfig::default());
    controller.set_speed(20);

    controller.on_frame(ms(100));

    assert_eq!(head(&controller), GridPosition::new(340, 200));
}

#[test]
fn destroyed_controller_is_inert() {
    let mut controller = running(GameConfig::default());
    controller.destroy();
    controller.destroy();
    let frozen = controller.snapshot();

    controller.on_frame(ms(1_000));
    controller.set_direction(Direction::Up);
    controller.toggle_pause();
    controller.set_speed(20);
    controller.dispatch(InputEvent::SpeedStep(3));
    controller.start();

    assert!(controller.is_destroyed());
    assert_eq!(controller.snapshot(), frozen);
}

#[test]
fn session_host_replaces_sessions() {
    let mut host = SessionHost::new(GameConfig::default());
    assert!(host.current().is_none());

    let first = host.new_session().expect("valid config");
    first.on_frame(ms(0));
    first.on_frame(ms(300));
    assert_ne!(first.snake_segments()[0], GridPosition::new(300, 200));

    host.set_speed(99);
    let second = host.new_session().expect("valid config");
    assert_eq!(second.play_state(), PlayState::Running);
    assert_eq!(second.snake_segments()[0], GridPosition::new(300, 200));
    assert_eq!(second.score(), 0);
    assert_eq!(second.speed(), 30);
    assert_eq!(host.sessions_started(), 2);

    host.shutdown();
    assert!(host.current().is_none());
}

#[test]
fn session_host_surfaces_configuration_errors() {
    let mut host = SessionHost::new(GameConfig {
        width: 205,
        ..GameConfig::default()
    });
    assert!(matches!(
        host.new_session(),
        Err(ConfigError::MisalignedPlayfield { .. })
    ));
}
