//! Ownership of the controller across consecutive game sessions.

use physnake_core::{ConfigError, GameConfig};
use tracing::info;

use crate::GameController;

/// Owns at most one live controller and replaces it on request.
#[derive(Debug)]
pub struct SessionHost {
    config: GameConfig,
    current: Option<GameController>,
    sessions_started: u32,
}

impl SessionHost {
    /// Creates a host that builds every session from `config`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            current: None,
            sessions_started: 0,
        }
    }

    /// Destroys the current session, if any, then creates and starts a new one.
    ///
    /// Each session receives a distinct seed derived from the configured one
    /// so food placement differs between rounds but stays reproducible.
    pub fn new_session(&mut self) -> Result<&mut GameController, ConfigError> {
        if let Some(mut previous) = self.current.take() {
            previous.destroy();
        }

        let mut config = self.config.clone();
        config.seed = config.seed.wrapping_add(u64::from(self.sessions_started));
        let mut controller = GameController::new(config)?;
        controller.start();
        self.sessions_started = self.sessions_started.saturating_add(1);
        info!(session = self.sessions_started, "session started");

        Ok(self.current.insert(controller))
    }

    /// Live controller, if a session has been started.
    #[must_use]
    pub fn current(&self) -> Option<&GameController> {
        self.current.as_ref()
    }

    /// Mutable access to the live controller.
    pub fn current_mut(&mut self) -> Option<&mut GameController> {
        self.current.as_mut()
    }

    /// Updates the speed used by the live session and every later one.
    pub fn set_speed(&mut self, fps: u32) {
        self.config.fps = self.config.clamp_fps(fps);
        if let Some(controller) = self.current.as_mut() {
            controller.set_speed(fps);
        }
    }

    /// Number of sessions started so far.
    #[must_use]
    pub const fn sessions_started(&self) -> u32 {
        self.sessions_started
    }

    /// Destroys the live session, if any.
    pub fn shutdown(&mut self) {
        if let Some(mut controller) = self.current.take() {
            controller.destroy();
        }
    }
}
