use std::time::Duration;

use physnake_system_clock::{Config, SimulationClock};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn ten_fps_releases_two_steps_twice() {
    let mut clock = SimulationClock::new(Config::new(10, 8));

    assert_eq!(clock.advance(ms(0)), 0);
    assert_eq!(clock.advance(ms(250)), 2);
    assert_eq!(clock.accumulated(), ms(50));
    assert_eq!(clock.advance(ms(400)), 2);
    assert_eq!(clock.accumulated(), ms(0));
}

#[test]
fn first_timestamp_only_primes_the_clock() {
    let mut clock = SimulationClock::new(Config::new(10, 8));
    assert_eq!(clock.advance(ms(5_000)), 0);
    assert_eq!(clock.accumulated(), Duration::ZERO);
    assert_eq!(clock.advance(ms(5_100)), 1);
}

#[test]
fn backwards_timestamps_add_no_time() {
    let mut clock = SimulationClock::new(Config::new(10, 8));
    assert_eq!(clock.advance(ms(1_000)), 0);
    assert_eq!(clock.advance(ms(900)), 0);
    assert_eq!(clock.accumulated(), Duration::ZERO);
    assert_eq!(clock.advance(ms(1_000)), 1);
}

#[test]
fn speed_change_applies_to_later_steps_without_rescaling() {
    let mut clock = SimulationClock::new(Config::new(10, 8));
    assert_eq!(clock.advance(ms(0)), 0);
    assert_eq!(clock.advance(ms(150)), 1);
    assert_eq!(clock.accumulated(), ms(50));

    clock.set_fps(20);

    assert_eq!(clock.accumulated(), ms(50));
    assert_eq!(clock.step_duration(), ms(50));
    assert_eq!(clock.advance(ms(200)), 2);
    assert_eq!(clock.accumulated(), Duration::ZERO);
}

#[test]
fn long_stall_is_capped_and_excess_discarded() {
    let mut clock = SimulationClock::new(Config::new(10, 3));
    assert_eq!(clock.advance(ms(0)), 0);
    assert_eq!(clock.advance(ms(1_030)), 3);
    assert_eq!(clock.accumulated(), ms(30));
    assert_eq!(clock.advance(ms(1_100)), 1);
}

#[test]
fn reset_forgets_the_previous_timestamp() {
    let mut clock = SimulationClock::new(Config::new(10, 8));
    assert_eq!(clock.advance(ms(0)), 0);
    assert_eq!(clock.advance(ms(180)), 1);

    clock.reset();

    assert_eq!(clock.accumulated(), Duration::ZERO);
    assert_eq!(clock.advance(ms(10_000)), 0);
    assert_eq!(clock.advance(ms(10_100)), 1);
}
