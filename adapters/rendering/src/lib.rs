#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Physnake adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use physnake_core::{Direction, FoodKind, PlayState};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Request to start or stop turning the snake on a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationRequest {
    /// Turn clockwise on every tick.
    Clockwise,
    /// Turn counter-clockwise on every tick.
    CounterClockwise,
    /// Stop turning.
    Stop,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Direction requested by the player on this frame.
    pub direction: Option<Direction>,
    /// Whether the player asked to pause or resume on this frame.
    pub pause_toggle: bool,
    /// Digit key in `1..=9` pressed on this frame, selecting an absolute speed.
    pub speed_digit: Option<u8>,
    /// Signed speed nudge requested on this frame.
    pub speed_step: Option<i32>,
    /// Whether the player asked to abandon the session and start a new one.
    pub new_session: bool,
    /// Auto-rotation change requested on this frame.
    pub rotation: Option<RotationRequest>,
}

impl FrameInput {
    /// Steps per second selected by a digit key.
    pub const SPEED_PER_DIGIT: u32 = 3;

    /// Speed nudge applied by the faster/slower keys.
    pub const SPEED_STEP: i32 = 3;

    /// Absolute speed selected on this frame, if any.
    #[must_use]
    pub fn selected_speed(&self) -> Option<u32> {
        self.speed_digit
            .filter(|digit| (1..=9).contains(digit))
            .map(|digit| u32::from(digit) * Self::SPEED_PER_DIGIT)
    }
}

/// Playfield geometry and background styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayfieldPresentation {
    /// Width in world units.
    pub width: f32,
    /// Height in world units.
    pub height: f32,
    /// Grid cell edge length in world units.
    pub cell_size: f32,
    /// Fill color of the playfield.
    pub background: Color,
    /// Color of the faint grid lines.
    pub line_color: Color,
}

impl PlayfieldPresentation {
    /// Creates a playfield descriptor, rejecting empty geometry.
    pub fn new(
        width: f32,
        height: f32,
        cell_size: f32,
        background: Color,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RenderingError::EmptyPlayfield { width, height });
        }
        Ok(Self {
            width,
            height,
            cell_size,
            background,
            line_color,
        })
    }

    /// Number of whole columns.
    #[must_use]
    pub fn columns(&self) -> u32 {
        (self.width / self.cell_size).floor() as u32
    }

    /// Number of whole rows.
    #[must_use]
    pub fn rows(&self) -> u32 {
        (self.height / self.cell_size).floor() as u32
    }
}

/// Snake segments and their colors.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakePresentation {
    /// Top-left corners of each segment, head first, in world units.
    pub segments: Vec<Vec2>,
    /// Fill color of the head.
    pub head_color: Color,
    /// Fill color of the remaining segments.
    pub body_color: Color,
}

impl SnakePresentation {
    /// Default head color.
    pub const HEAD_COLOR: Color = Color::from_rgb_u8(0x7c, 0xe0, 0x6a);
    /// Default body color.
    pub const BODY_COLOR: Color = Color::from_rgb_u8(0x3d, 0xa3, 0x4a);

    /// Creates a snake descriptor using the default palette.
    #[must_use]
    pub fn new(segments: Vec<Vec2>) -> Self {
        Self {
            segments,
            head_color: Self::HEAD_COLOR,
            body_color: Self::BODY_COLOR,
        }
    }
}

/// Food item drawn on top of the playfield.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodPresentation {
    /// Top-left corner of the item's cell in world units.
    pub position: Vec2,
    /// Rotation in radians.
    pub angle: f32,
    /// Fill color.
    pub color: Color,
}

impl FoodPresentation {
    /// Color of ordinary food.
    pub const ORDINARY_COLOR: Color = Color::from_rgb_u8(0xe8, 0x4a, 0x3c);
    /// Color of shrink food.
    pub const SHRINK_COLOR: Color = Color::from_rgb_u8(0x9b, 0x59, 0xd0);

    /// Creates a food descriptor colored by its kind.
    #[must_use]
    pub const fn for_kind(kind: FoodKind, position: Vec2, angle: f32) -> Self {
        let color = match kind {
            FoodKind::Ordinary => Self::ORDINARY_COLOR,
            FoodKind::Shrink => Self::SHRINK_COLOR,
        };
        Self {
            position,
            angle,
            color,
        }
    }

    /// Centre of the item given the playfield cell size.
    #[must_use]
    pub fn center(&self, cell_size: f32) -> Vec2 {
        self.position + Vec2::splat(cell_size * 0.5)
    }
}

/// Scene description combining the playfield, the snake, the food and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Playfield geometry.
    pub playfield: PlayfieldPresentation,
    /// Snake drawn on the playfield.
    pub snake: SnakePresentation,
    /// Food item, if one exists.
    pub food: Option<FoodPresentation>,
    /// Current score.
    pub score: u32,
    /// Current speed in steps per second.
    pub speed: u32,
    /// Lifecycle phase shown in the status line.
    pub play_state: PlayState,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        playfield: PlayfieldPresentation,
        snake: SnakePresentation,
        food: Option<FoodPresentation>,
        score: u32,
        speed: u32,
        play_state: PlayState,
    ) -> Self {
        Self {
            playfield,
            snake,
            food,
            score,
            speed,
            play_state,
        }
    }

    /// Status line describing the lifecycle phase.
    #[must_use]
    pub fn status_line(&self) -> &'static str {
        match self.play_state {
            PlayState::Ready => "Press Enter to start",
            PlayState::Running => "",
            PlayState::Paused => "Paused - Space to resume",
            PlayState::GameOver => "Game over - Enter to play again",
        }
    }

    /// Score and speed line shown above the playfield.
    #[must_use]
    pub fn hud_line(&self) -> String {
        format!("Score: {}   Speed: {}", self.score, self.speed)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Physnake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the time elapsed since the
    /// backend started, the input captured on this frame, and may mutate the
    /// scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must have a positive, finite edge length.
    InvalidCellSize {
        /// Provided cell size that failed validation.
        cell_size: f32,
    },
    /// The playfield must have a positive area.
    EmptyPlayfield {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell size must be positive (received {cell_size})")
            }
            Self::EmptyPlayfield { width, height } => {
                write!(f, "playfield {width}x{height} has no area")
            }
        }
    }
}

impl Error for RenderingError {}
