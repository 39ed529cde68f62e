use rccar_zenoh_runtime::actuator::sim::JOURNAL_CAPACITY;
use rccar_zenoh_runtime::actuator::{
    ActuatorWrite, DriveDirection, MotorChannel, SimActuators, SteeringPosition,
};
use rccar_zenoh_runtime::command::Command;
use rccar_zenoh_runtime::interpreter::CommandInterpreter;
use rccar_zenoh_runtime::state::MotionState;

const ALPHABET: &str = "FBLRGIHJSV Wwq0123456789";

fn interpreter() -> CommandInterpreter<SimActuators> {
    CommandInterpreter::new(SimActuators::new())
}

#[test]
fn test_forward_speed_then_forward_left() {
    let mut interp = interpreter();

    interp.interpret('F').unwrap();
    let snapshot = interp.actuators().snapshot();
    assert_eq!(snapshot.steering, Some(SteeringPosition::Neutral));
    assert_eq!(snapshot.duty(MotorChannel::A), Some(255));

    interp.interpret('5').unwrap();
    assert_eq!(interp.state().speed.get(), 50);
    assert_eq!(interp.actuators().snapshot().duty(MotorChannel::B), Some(127));

    let ack = interp.interpret('G').unwrap();
    assert_eq!(ack.command, Command::ForwardLeft);
    let snapshot = interp.actuators().snapshot();
    assert_eq!(snapshot.steering, Some(SteeringPosition::Left));
    assert_eq!(snapshot.direction(MotorChannel::A), Some(DriveDirection::Forward));
    assert_eq!(snapshot.direction(MotorChannel::B), Some(DriveDirection::Forward));
    // No differential without ultimate mode
    assert_eq!(snapshot.duty(MotorChannel::A), Some(127));
    assert_eq!(snapshot.duty(MotorChannel::B), Some(127));
}

#[test]
fn test_differential_forward_left_at_full_speed() {
    let mut interp = interpreter();
    interp.interpret('V').unwrap();
    interp.interpret('G').unwrap();

    let snapshot = interp.actuators().snapshot();
    assert_eq!(snapshot.duty(MotorChannel::A), Some(63));
    assert_eq!(snapshot.duty(MotorChannel::B), Some(255));
}

#[test]
fn test_diagonal_writes_base_before_bias() {
    let mut interp = interpreter();
    interp.interpret('V').unwrap();
    interp.interpret('J').unwrap();

    assert_eq!(
        interp.actuators().journal(),
        &[
            ActuatorWrite::Steer(SteeringPosition::Neutral),
            ActuatorWrite::Direction(MotorChannel::A, DriveDirection::Backward),
            ActuatorWrite::Direction(MotorChannel::B, DriveDirection::Backward),
            ActuatorWrite::Duty(MotorChannel::A, 255),
            ActuatorWrite::Duty(MotorChannel::B, 255),
            ActuatorWrite::Steer(SteeringPosition::Right),
            ActuatorWrite::Duty(MotorChannel::A, 255),
            ActuatorWrite::Duty(MotorChannel::B, 63),
        ]
    );
}

#[test]
fn test_unknown_characters_are_ignored() {
    let mut interp = interpreter();
    interp.interpret('3').unwrap();
    interp.interpret('W').unwrap();
    let state = *interp.state();
    let snapshot = interp.actuators().snapshot();
    let writes = interp.actuators().journal().len();

    for c in ['Z', 'f', 'Q', '!', '\n', 'x', '~'] {
        assert!(interp.interpret(c).is_err(), "{:?} should be invalid", c);
    }

    assert_eq!(*interp.state(), state);
    assert_eq!(interp.actuators().snapshot(), snapshot);
    assert_eq!(interp.actuators().journal().len(), writes);
}

#[test]
fn test_every_alphabet_character_is_accepted() {
    let mut interp = interpreter();
    for c in ALPHABET.chars() {
        assert!(interp.interpret(c).is_ok(), "{:?} should be accepted", c);
    }
}

#[test]
fn test_double_toggle_restores_pivot_behavior() {
    let mut before = interpreter();
    before.interpret('R').unwrap();

    let mut after = interpreter();
    after.interpret('V').unwrap();
    after.interpret('V').unwrap();
    after.interpret('R').unwrap();

    assert_eq!(*after.state(), MotionState::new());
    assert_eq!(after.actuators().journal(), before.actuators().journal());
}

#[test]
fn test_speed_persists_across_motion_commands() {
    let mut interp = interpreter();
    interp.interpret('2').unwrap();
    interp.interpret('B').unwrap();
    interp.interpret('S').unwrap();
    interp.interpret('F').unwrap();

    assert_eq!(interp.state().speed.get(), 20);
    assert_eq!(interp.actuators().snapshot().duty(MotorChannel::A), Some(51));
}

#[test]
fn test_long_simulated_session_keeps_bounded_journal() {
    let mut interp = interpreter();
    for _ in 0..10_000 {
        interp.interpret('F').unwrap();
    }
    assert!(interp.actuators().journal().len() <= JOURNAL_CAPACITY);
    assert_eq!(
        interp.actuators().journal().last(),
        Some(&ActuatorWrite::Duty(MotorChannel::B, 255))
    );
}
