#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Physnake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use physnake_core::Direction;
use physnake_rendering::{
    Color, FoodPresentation, FrameInput, PlayfieldPresentation, Presentation, RenderingBackend,
    RotationRequest, Scene, SnakePresentation,
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

const HUD_HEIGHT: f32 = 36.0;
const HUD_FONT_SIZE: f32 = 24.0;
const STATUS_FONT_SIZE: f32 = 32.0;
const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

/// Edge-triggered keys observed during a single frame.
///
/// Exposed so the key-to-input mapping can be exercised without a window.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    pub quit_requested: bool,
    /// Arrow keys in `[up, down, left, right]` order.
    pub arrows: [bool; 4],
    /// `Space` pauses or resumes.
    pub pause: bool,
    /// Digit keys `1` through `9`.
    pub digits: [bool; 9],
    /// `+` speeds up.
    pub faster: bool,
    /// `-` slows down.
    pub slower: bool,
    /// `Enter` starts a new session.
    pub new_session: bool,
    /// `O` starts turning clockwise.
    pub rotate_clockwise: bool,
    /// `E` starts turning counter-clockwise.
    pub rotate_counter_clockwise: bool,
    /// `S` stops turning.
    pub stop_rotation: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let arrows = [
            is_key_pressed(KeyCode::Up),
            is_key_pressed(KeyCode::Down),
            is_key_pressed(KeyCode::Left),
            is_key_pressed(KeyCode::Right),
        ];
        let pause = is_key_pressed(KeyCode::Space);
        let mut digits = [false; 9];
        for (pressed, key) in digits.iter_mut().zip(DIGIT_KEYS) {
            *pressed = is_key_pressed(key);
        }
        let faster = is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd);
        let slower = is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract);
        let new_session = is_key_pressed(KeyCode::Enter);
        let rotate_clockwise = is_key_pressed(KeyCode::O);
        let rotate_counter_clockwise = is_key_pressed(KeyCode::E);
        let stop_rotation = is_key_pressed(KeyCode::S);

        Self {
            quit_requested,
            arrows,
            pause,
            digits,
            faster,
            slower,
            new_session,
            rotate_clockwise,
            rotate_counter_clockwise,
            stop_rotation,
        }
    }

    /// Converts the observed keys into a backend-agnostic frame input.
    ///
    /// When several arrows are pressed on the same frame the first one in
    /// up, down, left, right order wins; likewise the lowest digit wins.
    /// Rotation keys resolve clockwise, then counter-clockwise, then stop.
    #[must_use]
    pub fn frame_input(&self) -> FrameInput {
        const ARROW_DIRECTIONS: [Direction; 4] = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        let direction = self
            .arrows
            .iter()
            .zip(ARROW_DIRECTIONS)
            .find_map(|(pressed, direction)| pressed.then_some(direction));
        let speed_digit = self
            .digits
            .iter()
            .position(|pressed| *pressed)
            .and_then(|index| u8::try_from(index + 1).ok());
        let speed_step = match (self.faster, self.slower) {
            (true, false) => Some(FrameInput::SPEED_STEP),
            (false, true) => Some(-FrameInput::SPEED_STEP),
            _ => None,
        };
        let rotation = if self.rotate_clockwise {
            Some(RotationRequest::Clockwise)
        } else if self.rotate_counter_clockwise {
            Some(RotationRequest::CounterClockwise)
        } else if self.stop_rotation {
            Some(RotationRequest::Stop)
        } else {
            None
        };

        FrameInput {
            direction,
            pause_toggle: self.pause,
            speed_digit,
            speed_step,
            new_session: self.new_session,
            rotation,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    render: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += breakdown.simulation;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            let Some(removed) = self.frame_times.pop_front() else {
                break;
            };
            self.window_duration = self.window_duration.saturating_sub(removed);
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_simulation: self.simulation_accum / frames.max(1),
            avg_render: self.render_accum / frames.max(1),
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.simulation_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let (window_width, window_height) = preferred_window_size(&scene.playfield);
        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let started = Instant::now();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let frame_dt =
                    Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));

                let simulation_start = Instant::now();
                update_scene(started.elapsed(), keyboard.frame_input(), &mut scene);
                let simulation = simulation_start.elapsed();

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let metrics =
                    SceneMetrics::from_playfield(&scene.playfield, screen_width, screen_height);

                let render_start = Instant::now();
                draw_playfield(&scene.playfield, &metrics);
                draw_snake(&scene.snake, &metrics);
                if let Some(food) = scene.food {
                    draw_food(food, &metrics);
                }
                draw_hud(&scene, &metrics);
                let render = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation,
                    render,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_simulation,
                        avg_render,
                    }) = fps_metrics
                    {
                        println!(
                            "FPS: {:.2} (10s avg: {:.2}) | sim: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_simulation.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn preferred_window_size(playfield: &PlayfieldPresentation) -> (i32, i32) {
    let width = playfield.width.ceil().max(1.0) as i32;
    let height = (playfield.height + HUD_HEIGHT).ceil().max(1.0) as i32;
    (width, height)
}

/// Maps world units onto screen pixels, letterboxing the playfield below the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_playfield(
        playfield: &PlayfieldPresentation,
        screen_width: f32,
        screen_height: f32,
    ) -> Self {
        let available_height = (screen_height - HUD_HEIGHT).max(0.0);
        let scale = if playfield.width <= 0.0 || playfield.height <= 0.0 {
            1.0
        } else {
            (screen_width / playfield.width).min(available_height / playfield.height)
        };

        let scaled_width = playfield.width * scale;
        let scaled_height = playfield.height * scale;
        let offset_x = ((screen_width - scaled_width) * 0.5).max(0.0);
        let offset_y = HUD_HEIGHT + ((available_height - scaled_height) * 0.5).max(0.0);

        Self {
            scale,
            offset_x,
            offset_y,
            cell_step: playfield.cell_size * scale,
        }
    }

    fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + world.x * self.scale,
            self.offset_y + world.y * self.scale,
        )
    }
}

fn draw_playfield(playfield: &PlayfieldPresentation, metrics: &SceneMetrics) {
    let origin = metrics.to_screen(Vec2::ZERO);
    let width = playfield.width * metrics.scale;
    let height = playfield.height * metrics.scale;
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        width,
        height,
        to_macroquad_color(playfield.background),
    );

    let line_color = to_macroquad_color(playfield.line_color);
    for column in 1..playfield.columns() {
        let x = origin.x + column as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(x, origin.y, x, origin.y + height, 1.0, line_color);
    }
    for row in 1..playfield.rows() {
        let y = origin.y + row as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(origin.x, y, origin.x + width, y, 1.0, line_color);
    }
}

fn draw_snake(snake: &SnakePresentation, metrics: &SceneMetrics) {
    let inset = metrics.cell_step * 0.05;
    let size = (metrics.cell_step - inset * 2.0).max(1.0);
    // Tail first so the head stays on top of duplicated segments.
    for (index, segment) in snake.segments.iter().enumerate().rev() {
        let color = if index == 0 {
            snake.head_color
        } else {
            snake.body_color
        };
        let corner = metrics.to_screen(*segment);
        macroquad::shapes::draw_rectangle(
            corner.x + inset,
            corner.y + inset,
            size,
            size,
            to_macroquad_color(color),
        );
    }
}

fn draw_food(food: FoodPresentation, metrics: &SceneMetrics) {
    let center = metrics.to_screen(food.position) + Vec2::splat(metrics.cell_step * 0.5);
    let radius = metrics.cell_step * 0.5;
    let color = to_macroquad_color(food.color);
    macroquad::shapes::draw_circle(center.x, center.y, radius, color);
    macroquad::shapes::draw_poly(
        center.x,
        center.y,
        5,
        radius * 0.6,
        food.angle.to_degrees(),
        to_macroquad_color(food.color.lighten(0.5)),
    );
}

fn draw_hud(scene: &Scene, metrics: &SceneMetrics) {
    let text_color = to_macroquad_color(Color::from_rgb_u8(0xee, 0xee, 0xee));
    let _ = macroquad::text::draw_text(
        &scene.hud_line(),
        metrics.offset_x + 8.0,
        HUD_HEIGHT * 0.7,
        HUD_FONT_SIZE,
        text_color,
    );

    let status = scene.status_line();
    if status.is_empty() {
        return;
    }
    let centre = metrics.to_screen(Vec2::new(
        scene.playfield.width * 0.5,
        scene.playfield.height * 0.5,
    ));
    let dimensions = macroquad::text::measure_text(status, None, STATUS_FONT_SIZE as u16, 1.0);
    let _ = macroquad::text::draw_text(
        status,
        centre.x - dimensions.width * 0.5,
        centre.y,
        STATUS_FONT_SIZE,
        text_color,
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
