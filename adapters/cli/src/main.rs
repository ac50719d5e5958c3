#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Physnake experience.

mod options;
mod rotation;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use physnake_controller::{GameSnapshot, InputEvent, SessionHost};
use physnake_rendering::{
    Color, FoodPresentation, FrameInput, PlayfieldPresentation, Presentation, RenderingBackend,
    RenderingError, Scene, SnakePresentation,
};
use physnake_rendering_macroquad::MacroquadBackend;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{options::Cli, rotation::AutoRotation};

const WINDOW_TITLE: &str = "Physnake";
const CLEAR_COLOR: Color = Color::from_rgb_u8(0x12, 0x12, 0x18);
const PLAYFIELD_COLOR: Color = Color::from_rgb_u8(0x1c, 0x1f, 0x26);

/// Entry point for the Physnake command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;

    let mut host = SessionHost::new(config);
    let controller = host
        .new_session()
        .context("failed to start the first session")?;
    info!("{}", controller.welcome_banner());
    let scene = scene_from_snapshot(&controller.snapshot())
        .context("failed to describe the playfield")?;

    let presentation = Presentation::new(WINDOW_TITLE, CLEAR_COLOR, scene);
    let backend = MacroquadBackend::new()
        .with_vsync(!cli.no_vsync)
        .with_show_fps(cli.show_fps);

    let mut rotation = AutoRotation::default();
    backend.run(presentation, move |elapsed, input, scene| {
        if let Some(snapshot) = advance_session(&mut host, &mut rotation, elapsed, &input) {
            update_scene(scene, &snapshot);
        }
    })
}

/// Applies one frame of input to the live session and advances it to `elapsed`.
///
/// Auto-rotation turns are dispatched before the frame's own input so an
/// explicit direction request wins.
fn advance_session(
    host: &mut SessionHost,
    rotation: &mut AutoRotation,
    elapsed: Duration,
    input: &FrameInput,
) -> Option<GameSnapshot> {
    if input.new_session {
        rotation.stop();
        if let Err(error) = host.new_session() {
            warn!(%error, "could not start a new session");
        }
    }
    if let Some(request) = input.rotation {
        rotation.request(request, elapsed);
    }

    let controller = host.current_mut()?;
    let turn = rotation.tick(
        elapsed,
        controller.snake_direction(),
        controller.play_state(),
    );
    if let Some(direction) = turn {
        controller.dispatch(InputEvent::DirectionRequest(direction));
    }
    for event in input_events(input) {
        controller.dispatch(event);
    }
    controller.on_frame(elapsed);
    let snapshot = controller.snapshot();

    // Later sessions keep the speed the player settled on.
    host.set_speed(snapshot.speed);
    Some(snapshot)
}

fn input_events(input: &FrameInput) -> Vec<InputEvent> {
    let mut events = Vec::new();
    if let Some(direction) = input.direction {
        events.push(InputEvent::DirectionRequest(direction));
    }
    if input.pause_toggle {
        events.push(InputEvent::PauseToggle);
    }
    if let Some(fps) = input.selected_speed() {
        events.push(InputEvent::SpeedChange(fps));
    }
    if let Some(delta) = input.speed_step {
        events.push(InputEvent::SpeedStep(delta));
    }
    events
}

fn scene_from_snapshot(snapshot: &GameSnapshot) -> Result<Scene, RenderingError> {
    let playfield = PlayfieldPresentation::new(
        snapshot.playfield.width() as f32,
        snapshot.playfield.height() as f32,
        snapshot.playfield.grid_size() as f32,
        PLAYFIELD_COLOR,
        PLAYFIELD_COLOR.lighten(0.06),
    )?;
    let mut scene = Scene::new(
        playfield,
        SnakePresentation::new(Vec::new()),
        None,
        0,
        0,
        snapshot.play_state,
    );
    update_scene(&mut scene, snapshot);
    Ok(scene)
}

fn update_scene(scene: &mut Scene, snapshot: &GameSnapshot) {
    scene.snake.segments.clear();
    scene
        .snake
        .segments
        .extend(snapshot.segments.iter().map(|segment| segment.as_vec2()));
    scene.food = snapshot
        .food
        .map(|food| FoodPresentation::for_kind(food.kind, food.position, food.angle));
    scene.score = snapshot.score;
    scene.speed = snapshot.speed;
    scene.play_state = snapshot.play_state;
}
