// Actuator capability layer for the RC car
//
// Provides:
// - The `Actuators` trait the motion controller drives (steering, drive lines, duty, light)
// - Serial pin-bridge backend for the physical L298N + servo wiring
// - In-memory backend that journals every write (simulation and tests)

pub mod bridge;
pub mod sim;

use serde::{Deserialize, Serialize};

use crate::config::{SERVO_ANGLE_LEFT, SERVO_ANGLE_NEUTRAL, SERVO_ANGLE_RIGHT};

pub use bridge::{BridgeActuators, PinBridge};
pub use sim::{ActuatorSnapshot, SimActuators};

/// One of the two independently driven motor pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotorChannel {
    A,
    B,
}

impl MotorChannel {
    pub const ALL: [MotorChannel; 2] = [MotorChannel::A, MotorChannel::B];

    pub fn index(self) -> usize {
        match self {
            MotorChannel::A => 0,
            MotorChannel::B => 1,
        }
    }
}

/// State of a channel's two H-bridge control lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveDirection {
    Forward,
    Backward,
    /// Both lines high: terminals shorted, active brake (not coast)
    Brake,
}

impl DriveDirection {
    /// Logic levels for (IN1, IN2)
    pub fn levels(self) -> (bool, bool) {
        match self {
            DriveDirection::Forward => (true, false),
            DriveDirection::Backward => (false, true),
            DriveDirection::Brake => (true, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringPosition {
    Left,
    Neutral,
    Right,
}

impl SteeringPosition {
    /// Servo angle in degrees
    pub fn angle(self) -> u16 {
        match self {
            SteeringPosition::Left => SERVO_ANGLE_LEFT,
            SteeringPosition::Neutral => SERVO_ANGLE_NEUTRAL,
            SteeringPosition::Right => SERVO_ANGLE_RIGHT,
        }
    }
}

/// A single logical output write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorWrite {
    Steer(SteeringPosition),
    Direction(MotorChannel, DriveDirection),
    Duty(MotorChannel, u16),
    Light(bool),
}

/// Error types for actuator output
#[derive(Debug, thiserror::Error)]
pub enum ActuatorError {
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Actuator unavailable: {reason}")]
    Unavailable { reason: String },
}

pub type Result<T> = std::result::Result<T, ActuatorError>;

/// Output capabilities of the vehicle
///
/// Implementations own the device handles only; all logical state lives in
/// the command interpreter.
pub trait Actuators {
    fn steer(&mut self, position: SteeringPosition) -> Result<()>;

    fn set_direction(&mut self, channel: MotorChannel, direction: DriveDirection) -> Result<()>;

    /// Write a raw duty value (0..=MAX_DUTY) to the channel's enable line
    fn set_duty(&mut self, channel: MotorChannel, duty: u16) -> Result<()>;

    fn light(&mut self, on: bool) -> Result<()>;

    /// Configure the PWM generator; backends without one ignore it
    fn configure_pwm(&mut self, _frequency_hz: u16, _range: u16) -> Result<()> {
        Ok(())
    }

    fn drive(&mut self, channel: MotorChannel, direction: DriveDirection, duty: u16) -> Result<()> {
        self.set_direction(channel, direction)?;
        self.set_duty(channel, duty)
    }

    fn apply(&mut self, write: ActuatorWrite) -> Result<()> {
        match write {
            ActuatorWrite::Steer(position) => self.steer(position),
            ActuatorWrite::Direction(channel, direction) => self.set_direction(channel, direction),
            ActuatorWrite::Duty(channel, duty) => self.set_duty(channel, duty),
            ActuatorWrite::Light(on) => self.light(on),
        }
    }
}
