//! Player input expressed as plain events routed through named handlers.

use physnake_core::Direction;

/// Input gathered by an adapter, independent of the device that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The player asked the snake to turn.
    DirectionRequest(Direction),
    /// The player asked to pause or resume.
    PauseToggle,
    /// The player picked an absolute speed in steps per second.
    SpeedChange(u32),
    /// The player nudged the speed by a signed number of steps per second.
    SpeedStep(i32),
}

/// Receiver for [`InputEvent`] values.
pub trait InputHandler {
    /// Handles a turn request.
    fn on_direction_request(&mut self, direction: Direction);

    /// Handles a pause toggle.
    fn on_pause_toggle(&mut self);

    /// Handles an absolute speed change.
    fn on_speed_change(&mut self, fps: u32);

    /// Handles a relative speed change.
    fn on_speed_step(&mut self, delta: i32);
}

/// Routes `event` to the matching handler method.
pub fn dispatch<H>(handler: &mut H, event: InputEvent)
where
    H: InputHandler + ?Sized,
{
    match event {
        InputEvent::DirectionRequest(direction) => handler.on_direction_request(direction),
        InputEvent::PauseToggle => handler.on_pause_toggle(),
        InputEvent::SpeedChange(fps) => handler.on_speed_change(fps),
        InputEvent::SpeedStep(delta) => handler.on_speed_step(delta),
    }
}
