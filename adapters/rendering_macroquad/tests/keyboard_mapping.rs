use physnake_core::Direction;
use physnake_rendering::{FrameInput, RotationRequest};
use physnake_rendering_macroquad::KeyboardShortcuts;

fn arrows(up: bool, down: bool, left: bool, right: bool) -> KeyboardShortcuts {
    KeyboardShortcuts {
        arrows: [up, down, left, right],
        ..KeyboardShortcuts::default()
    }
}

#[test]
fn idle_keyboard_produces_empty_input() {
    assert_eq!(KeyboardShortcuts::default().frame_input(), FrameInput::default());
}

#[test]
fn each_arrow_maps_to_its_direction() {
    let cases = [
        (arrows(true, false, false, false), Direction::Up),
        (arrows(false, true, false, false), Direction::Down),
        (arrows(false, false, true, false), Direction::Left),
        (arrows(false, false, false, true), Direction::Right),
    ];
    for (keys, expected) in cases {
        assert_eq!(keys.frame_input().direction, Some(expected));
    }
}

#[test]
fn simultaneous_arrows_resolve_deterministically() {
    let first = arrows(false, true, true, true).frame_input();
    let second = arrows(false, true, true, true).frame_input();
    assert_eq!(first.direction, Some(Direction::Down));
    assert_eq!(first, second);
}

#[test]
fn digits_select_speed() {
    let mut keys = KeyboardShortcuts::default();
    keys.digits[4] = true;
    keys.digits[8] = true;
    let input = keys.frame_input();
    assert_eq!(input.speed_digit, Some(5));
    assert_eq!(input.selected_speed(), Some(15));
}

#[test]
fn opposing_speed_nudges_cancel_out() {
    let faster = KeyboardShortcuts {
        faster: true,
        ..KeyboardShortcuts::default()
    };
    let both = KeyboardShortcuts {
        faster: true,
        slower: true,
        ..KeyboardShortcuts::default()
    };
    assert_eq!(faster.frame_input().speed_step, Some(FrameInput::SPEED_STEP));
    assert_eq!(both.frame_input().speed_step, None);
}

#[test]
fn pause_and_new_session_pass_through() {
    let keys = KeyboardShortcuts {
        pause: true,
        new_session: true,
        ..KeyboardShortcuts::default()
    };
    let input = keys.frame_input();
    assert!(input.pause_toggle);
    assert!(input.new_session);
}

#[test]
fn rotation_keys_resolve_in_a_fixed_order() {
    let stop = KeyboardShortcuts {
        stop_rotation: true,
        ..KeyboardShortcuts::default()
    };
    let counter = KeyboardShortcuts {
        rotate_counter_clockwise: true,
        ..stop
    };
    let all = KeyboardShortcuts {
        rotate_clockwise: true,
        ..counter
    };
    assert_eq!(stop.frame_input().rotation, Some(RotationRequest::Stop));
    assert_eq!(
        counter.frame_input().rotation,
        Some(RotationRequest::CounterClockwise)
    );
    assert_eq!(all.frame_input().rotation, Some(RotationRequest::Clockwise));
}
