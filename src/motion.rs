// Motion controller: turns a command into ordered actuator writes
//
// Every maneuver is built in two phases:
// 1. base motion   - steering, drive lines, duty for the straight part
// 2. turn bias     - steering override and, in ultimate mode, reduced inner duty
// The phases are kept separate so the order of effects can be inspected.

use tracing::{debug, warn};

use crate::actuator::{ActuatorWrite, Actuators, DriveDirection, MotorChannel, SteeringPosition};
use crate::command::Command;
use crate::config::{MAX_DUTY, PWM_FREQUENCY_HZ};
use crate::state::{MotionState, SpeedPercentage};

/// Which way a turn command bends the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnSide {
    Left,
    Right,
}

impl TurnSide {
    pub fn steering(self) -> SteeringPosition {
        match self {
            TurnSide::Left => SteeringPosition::Left,
            TurnSide::Right => SteeringPosition::Right,
        }
    }

    /// Channel slowed down during a differential turn.
    /// Follows the motor wiring: left turns slow A, right turns slow B.
    pub fn inner_channel(self) -> MotorChannel {
        match self {
            TurnSide::Left => MotorChannel::A,
            TurnSide::Right => MotorChannel::B,
        }
    }

    /// (A, B) directions for an in-place turn
    fn pivot_directions(self) -> (DriveDirection, DriveDirection) {
        match self {
            TurnSide::Left => (DriveDirection::Backward, DriveDirection::Forward),
            TurnSide::Right => (DriveDirection::Forward, DriveDirection::Backward),
        }
    }
}

/// Ordered writes for one command, split by phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Maneuver {
    pub base: Vec<ActuatorWrite>,
    pub bias: Vec<ActuatorWrite>,
}

impl Maneuver {
    /// All writes in issue order
    pub fn writes(&self) -> impl Iterator<Item = &ActuatorWrite> {
        self.base.iter().chain(self.bias.iter())
    }

    pub fn len(&self) -> usize {
        self.base.len() + self.bias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Both channels at the same duty
fn duty_both(speed: SpeedPercentage) -> [ActuatorWrite; 2] {
    let duty = speed.to_duty();
    debug!("Setting motor duty (0-{}) : {}", MAX_DUTY, duty);
    [
        ActuatorWrite::Duty(MotorChannel::A, duty),
        ActuatorWrite::Duty(MotorChannel::B, duty),
    ]
}

fn straight(direction: DriveDirection, speed: SpeedPercentage) -> Vec<ActuatorWrite> {
    let mut writes = vec![
        ActuatorWrite::Steer(SteeringPosition::Neutral),
        ActuatorWrite::Direction(MotorChannel::A, direction),
        ActuatorWrite::Direction(MotorChannel::B, direction),
    ];
    writes.extend(duty_both(speed));
    writes
}

fn pivot(side: TurnSide, state: &MotionState) -> Vec<ActuatorWrite> {
    let mut writes = vec![ActuatorWrite::Steer(side.steering())];
    if !state.ultimate_mode {
        return writes;
    }
    let (a, b) = side.pivot_directions();
    writes.push(ActuatorWrite::Direction(MotorChannel::A, a));
    writes.push(ActuatorWrite::Direction(MotorChannel::B, b));
    writes.extend(duty_both(state.speed));
    writes
}

fn turn_bias(side: TurnSide, state: &MotionState) -> Vec<ActuatorWrite> {
    let mut writes = vec![ActuatorWrite::Steer(side.steering())];
    if !state.ultimate_mode {
        return writes;
    }
    let inner = side.inner_channel();
    for channel in MotorChannel::ALL {
        let speed = if channel == inner {
            state.speed.turn_reduced()
        } else {
            state.speed
        };
        writes.push(ActuatorWrite::Duty(channel, speed.to_duty()));
    }
    writes
}

/// Plan the writes for `command`, given the state after the command's own
/// state change (speed, mode or light) has been applied
pub fn plan(command: Command, state: &MotionState) -> Maneuver {
    let (base, bias) = match command {
        Command::Forward => (straight(DriveDirection::Forward, state.speed), vec![]),
        Command::Backward => (straight(DriveDirection::Backward, state.speed), vec![]),
        Command::PivotLeft => (pivot(TurnSide::Left, state), vec![]),
        Command::PivotRight => (pivot(TurnSide::Right, state), vec![]),
        Command::ForwardLeft => (
            straight(DriveDirection::Forward, state.speed),
            turn_bias(TurnSide::Left, state),
        ),
        Command::ForwardRight => (
            straight(DriveDirection::Forward, state.speed),
            turn_bias(TurnSide::Right, state),
        ),
        Command::BackwardLeft => (
            straight(DriveDirection::Backward, state.speed),
            turn_bias(TurnSide::Left, state),
        ),
        Command::BackwardRight => (
            straight(DriveDirection::Backward, state.speed),
            turn_bias(TurnSide::Right, state),
        ),
        Command::Stop => (
            vec![
                ActuatorWrite::Direction(MotorChannel::A, DriveDirection::Brake),
                ActuatorWrite::Direction(MotorChannel::B, DriveDirection::Brake),
                ActuatorWrite::Steer(SteeringPosition::Neutral),
            ],
            vec![],
        ),
        Command::LightOn | Command::LightOff => (vec![ActuatorWrite::Light(state.light)], vec![]),
        Command::SetSpeed(_) => (duty_both(state.speed).to_vec(), vec![]),
        Command::ToggleUltimateMode | Command::HornOff => (vec![], vec![]),
    };
    Maneuver { base, bias }
}

/// Owns the actuator handles and issues planned maneuvers
pub struct MotionController<A: Actuators> {
    actuators: A,
}

impl<A: Actuators> MotionController<A> {
    pub fn new(actuators: A) -> Self {
        Self { actuators }
    }

    pub fn actuators(&self) -> &A {
        &self.actuators
    }

    pub fn actuators_mut(&mut self) -> &mut A {
        &mut self.actuators
    }

    /// Plan and issue every write for `command`. Returns the maneuver and the
    /// number of writes the actuators rejected.
    pub fn perform(&mut self, command: Command, state: &MotionState) -> (Maneuver, usize) {
        let maneuver = plan(command, state);
        let faults = self.execute(&maneuver);
        (maneuver, faults)
    }

    /// Issue all writes in order. A failed write is logged and skipped so the
    /// rest of the maneuver still reaches the hardware.
    pub fn execute(&mut self, maneuver: &Maneuver) -> usize {
        let mut faults = 0;
        for &write in maneuver.writes() {
            if let Err(e) = self.actuators.apply(write) {
                warn!("Actuator fault on {:?}: {}", write, e);
                faults += 1;
            }
        }
        faults
    }

    /// Apply the boot-time output state: PWM setup and default duty on both channels
    pub fn startup(&mut self, state: &MotionState) -> usize {
        let mut faults = 0;
        if let Err(e) = self.actuators.configure_pwm(PWM_FREQUENCY_HZ, MAX_DUTY) {
            warn!("Failed to configure PWM: {}", e);
            faults += 1;
        }
        let maneuver = Maneuver {
            base: duty_both(state.speed).to_vec(),
            bias: vec![],
        };
        faults + self.execute(&maneuver)
    }
}
