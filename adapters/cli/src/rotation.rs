//! Timer that keeps turning the snake while auto-rotation is active.

use std::time::Duration;

use physnake_core::{Direction, PlayState};
use physnake_rendering::RotationRequest;
use tracing::debug;

/// Time between two automatic turns.
pub(crate) const ROTATION_PERIOD: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    const fn apply(self, direction: Direction) -> Direction {
        match self {
            Self::Clockwise => direction.clockwise(),
            Self::CounterClockwise => direction.counter_clockwise(),
        }
    }
}

/// Turns the snake by a quarter every [`ROTATION_PERIOD`] until stopped.
#[derive(Debug, Default)]
pub(crate) struct AutoRotation {
    turn: Option<Turn>,
    next_tick: Option<Duration>,
}

impl AutoRotation {
    /// Applies a start or stop request received at `now`.
    ///
    /// Changing the turn while active keeps the running timer.
    pub(crate) fn request(&mut self, request: RotationRequest, now: Duration) {
        let turn = match request {
            RotationRequest::Clockwise => Turn::Clockwise,
            RotationRequest::CounterClockwise => Turn::CounterClockwise,
            RotationRequest::Stop => {
                self.stop();
                return;
            }
        };
        self.turn = Some(turn);
        if self.next_tick.is_none() {
            self.next_tick = Some(now.saturating_add(ROTATION_PERIOD));
            debug!(?turn, "auto-rotation started");
        }
    }

    /// Stops turning and forgets the timer.
    pub(crate) fn stop(&mut self) {
        if self.turn.take().is_some() {
            debug!("auto-rotation stopped");
        }
        self.next_tick = None;
    }

    /// Returns the direction to request when a tick falls due at `now`.
    ///
    /// A due tick is consumed without a turn unless the session is running.
    /// Ticks missed during a stall fire once.
    pub(crate) fn tick(
        &mut self,
        now: Duration,
        current: Direction,
        play_state: PlayState,
    ) -> Option<Direction> {
        let turn = self.turn?;
        let due = self.next_tick?;
        if now < due {
            return None;
        }

        let mut next = due;
        while next <= now {
            next = next.saturating_add(ROTATION_PERIOD);
        }
        self.next_tick = Some(next);

        (play_state == PlayState::Running).then(|| turn.apply(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn clockwise_turns_once_per_period() {
        let mut rotation = AutoRotation::default();
        rotation.request(RotationRequest::Clockwise, ms(100));

        assert_eq!(rotation.tick(ms(400), Direction::Up, PlayState::Running), None);
        assert_eq!(
            rotation.tick(ms(600), Direction::Up, PlayState::Running),
            Some(Direction::Right)
        );
        assert_eq!(rotation.tick(ms(900), Direction::Right, PlayState::Running), None);
        assert_eq!(
            rotation.tick(ms(1_100), Direction::Right, PlayState::Running),
            Some(Direction::Down)
        );
    }

    #[test]
    fn switching_turn_keeps_the_timer() {
        let mut rotation = AutoRotation::default();
        rotation.request(RotationRequest::Clockwise, ms(0));
        rotation.request(RotationRequest::CounterClockwise, ms(300));

        assert_eq!(rotation.tick(ms(499), Direction::Up, PlayState::Running), None);
        assert_eq!(
            rotation.tick(ms(500), Direction::Up, PlayState::Running),
            Some(Direction::Left)
        );
    }

    #[test]
    fn ticks_are_skipped_unless_running() {
        let mut rotation = AutoRotation::default();
        rotation.request(RotationRequest::Clockwise, ms(0));

        assert_eq!(rotation.tick(ms(500), Direction::Up, PlayState::Paused), None);
        assert_eq!(rotation.tick(ms(1_000), Direction::Up, PlayState::GameOver), None);
        assert_eq!(
            rotation.tick(ms(1_500), Direction::Up, PlayState::Running),
            Some(Direction::Right)
        );
    }

    #[test]
    fn stall_fires_a_single_turn() {
        let mut rotation = AutoRotation::default();
        rotation.request(RotationRequest::Clockwise, ms(0));

        assert_eq!(
            rotation.tick(ms(2_200), Direction::Left, PlayState::Running),
            Some(Direction::Up)
        );
        assert_eq!(rotation.tick(ms(2_400), Direction::Up, PlayState::Running), None);
        assert!(rotation.tick(ms(2_500), Direction::Up, PlayState::Running).is_some());
    }

    #[test]
    fn stop_cancels_pending_turns() {
        let mut rotation = AutoRotation::default();
        rotation.request(RotationRequest::CounterClockwise, ms(0));
        rotation.request(RotationRequest::Stop, ms(200));

        assert_eq!(rotation.tick(ms(1_000), Direction::Up, PlayState::Running), None);
    }
}
