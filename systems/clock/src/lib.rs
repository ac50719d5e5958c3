#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep accumulator that turns frame timestamps into whole simulation steps.

use std::time::Duration;

use tracing::trace;

/// Configuration parameters required to construct the clock.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    fps: u32,
    max_steps_per_advance: u32,
}

impl Config {
    /// Creates a new configuration using the provided step rate and catch-up cap.
    #[must_use]
    pub const fn new(fps: u32, max_steps_per_advance: u32) -> Self {
        Self {
            fps,
            max_steps_per_advance,
        }
    }
}

/// Accumulates elapsed wall time and releases it in fixed-size steps.
///
/// Changing the rate only affects how the accumulator is drained from then
/// on; time already accumulated is never rescaled.
#[derive(Debug)]
pub struct SimulationClock {
    last_timestamp: Option<Duration>,
    accumulator: Duration,
    fps: u32,
    step_duration: Duration,
    max_steps_per_advance: u32,
}

impl SimulationClock {
    /// Creates a new clock using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let fps = config.fps.max(1);
        Self {
            last_timestamp: None,
            accumulator: Duration::ZERO,
            fps,
            step_duration: step_duration(fps),
            max_steps_per_advance: config.max_steps_per_advance.max(1),
        }
    }

    /// Records a frame timestamp and returns the number of whole steps due.
    ///
    /// The first timestamp after construction or [`SimulationClock::reset`]
    /// only primes the clock. Timestamps earlier than the previous one count
    /// as zero elapsed time.
    pub fn advance(&mut self, timestamp: Duration) -> u32 {
        let Some(last) = self.last_timestamp.replace(timestamp) else {
            return 0;
        };

        let delta = timestamp.saturating_sub(last);
        self.accumulator = self.accumulator.saturating_add(delta);

        let mut steps = 0;
        while self.accumulator >= self.step_duration && steps < self.max_steps_per_advance {
            self.accumulator -= self.step_duration;
            steps += 1;
        }

        if self.accumulator >= self.step_duration {
            let discarded = u64::try_from(
                self.accumulator.as_nanos() / self.step_duration.as_nanos(),
            )
            .unwrap_or(u64::MAX);
            self.accumulator = remainder(self.accumulator, self.step_duration);
            trace!(discarded, "clock dropped steps beyond catch-up cap");
        }

        steps
    }

    /// Changes the step rate for subsequent steps.
    ///
    /// A rate of zero is treated as one step per second.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.max(1);
        self.step_duration = step_duration(self.fps);
    }

    /// Forgets the last timestamp and empties the accumulator.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.accumulator = Duration::ZERO;
    }

    /// Current step rate in steps per second.
    #[must_use]
    pub const fn fps(&self) -> u32 {
        self.fps
    }

    /// Duration of a single step at the current rate.
    #[must_use]
    pub const fn step_duration(&self) -> Duration {
        self.step_duration
    }

    /// Time accumulated but not yet released as a step.
    #[must_use]
    pub const fn accumulated(&self) -> Duration {
        self.accumulator
    }
}

fn step_duration(fps: u32) -> Duration {
    Duration::from_secs(1) / fps
}

fn remainder(value: Duration, divisor: Duration) -> Duration {
    let nanos = value.as_nanos() % divisor.as_nanos();
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
