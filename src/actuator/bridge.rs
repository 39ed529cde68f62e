// Serial pin-bridge protocol and the hardware actuator backend
//
// The bridge MCU exposes its pins over serial. Packet format:
// [0xFF, 0xFF, Pin, Instruction, Value_lo, Value_hi, Checksum]
// Writes are fire-and-forget, the bridge sends no response.

use serialport::{self, SerialPort};
use std::io::Write;
use tracing::{debug, info, warn};

use super::{Actuators, DriveDirection, MotorChannel, Result, SteeringPosition};
use crate::config::{
    BRIDGE_BAUDRATE, BRIDGE_TIMEOUT, LIGHT_PIN, MOTOR_A_ENABLE, MOTOR_A_IN1, MOTOR_A_IN2,
    MOTOR_B_ENABLE, MOTOR_B_IN1, MOTOR_B_IN2, SERVO_PIN,
};

/// Packet header bytes
const HEADER: [u8; 2] = [0xFF, 0xFF];

/// Pin id for instructions that apply to the whole PWM generator
const BROADCAST_PIN: u8 = 0xFE;

pub const PACKET_LEN: usize = 7;

/// Instruction set
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    DigitalWrite = 0x01,
    AnalogWrite = 0x02,
    ServoWrite = 0x03,
    AnalogFrequency = 0x04,
    AnalogRange = 0x05,
}

/// Control and enable pins of one L298N channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPins {
    pub in1: u8,
    pub in2: u8,
    pub enable: u8,
}

pub const CHANNEL_A_PINS: ChannelPins = ChannelPins {
    in1: MOTOR_A_IN1,
    in2: MOTOR_A_IN2,
    enable: MOTOR_A_ENABLE,
};

pub const CHANNEL_B_PINS: ChannelPins = ChannelPins {
    in1: MOTOR_B_IN1,
    in2: MOTOR_B_IN2,
    enable: MOTOR_B_ENABLE,
};

impl MotorChannel {
    pub fn pins(self) -> ChannelPins {
        match self {
            MotorChannel::A => CHANNEL_A_PINS,
            MotorChannel::B => CHANNEL_B_PINS,
        }
    }
}

/// Serial link to the pin bridge
pub struct PinBridge<P: Write = Box<dyn SerialPort>> {
    port: P,
}

impl PinBridge {
    /// Open a new connection to the pin bridge
    pub fn open(port_name: &str) -> Result<Self> {
        Self::open_with_baudrate(port_name, BRIDGE_BAUDRATE)
    }

    /// Open with custom baudrate
    pub fn open_with_baudrate(port_name: &str, baudrate: u32) -> Result<Self> {
        let port = serialport::new(port_name, baudrate)
            .timeout(BRIDGE_TIMEOUT)
            .open()?;

        Ok(Self { port })
    }
}

impl<P: Write> PinBridge<P> {
    /// Wrap an already opened writer
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Checksum over pin, instruction and value bytes
    fn checksum(data: &[u8]) -> u8 {
        let sum: u16 = data.iter().map(|&b| b as u16).sum();
        (!sum & 0xFF) as u8
    }

    fn build_packet(pin: u8, instruction: Instruction, value: u16) -> [u8; PACKET_LEN] {
        let [lo, hi] = value.to_le_bytes();
        let mut packet = [HEADER[0], HEADER[1], pin, instruction as u8, lo, hi, 0];
        packet[PACKET_LEN - 1] = Self::checksum(&packet[2..PACKET_LEN - 1]);
        packet
    }

    fn send(&mut self, pin: u8, instruction: Instruction, value: u16) -> Result<()> {
        let packet = Self::build_packet(pin, instruction, value);
        debug!("Bridge {:?} pin={} value={}", instruction, pin, value);
        self.port.write_all(&packet)?;
        self.port.flush()?;
        Ok(())
    }

    pub fn digital_write(&mut self, pin: u8, high: bool) -> Result<()> {
        self.send(pin, Instruction::DigitalWrite, u16::from(high))
    }

    pub fn analog_write(&mut self, pin: u8, duty: u16) -> Result<()> {
        self.send(pin, Instruction::AnalogWrite, duty)
    }

    pub fn servo_write(&mut self, pin: u8, angle: u16) -> Result<()> {
        self.send(pin, Instruction::ServoWrite, angle)
    }

    pub fn analog_frequency(&mut self, frequency_hz: u16) -> Result<()> {
        self.send(BROADCAST_PIN, Instruction::AnalogFrequency, frequency_hz)
    }

    pub fn analog_range(&mut self, range: u16) -> Result<()> {
        self.send(BROADCAST_PIN, Instruction::AnalogRange, range)
    }
}

/// Physical outputs: two L298N channels, steering servo, light
pub struct BridgeActuators<P: Write = Box<dyn SerialPort>> {
    bridge: PinBridge<P>,
}

impl BridgeActuators {
    /// Open the bridge on the specified serial port
    pub fn open(port: &str) -> Result<Self> {
        info!("Opening pin bridge on {}", port);
        Ok(Self::new(PinBridge::open(port)?))
    }
}

impl<P: Write> BridgeActuators<P> {
    pub fn new(bridge: PinBridge<P>) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &PinBridge<P> {
        &self.bridge
    }
}

impl<P: Write> Actuators for BridgeActuators<P> {
    fn steer(&mut self, position: SteeringPosition) -> Result<()> {
        self.bridge.servo_write(SERVO_PIN, position.angle())
    }

    fn set_direction(&mut self, channel: MotorChannel, direction: DriveDirection) -> Result<()> {
        let pins = channel.pins();
        let (in1, in2) = direction.levels();
        self.bridge.digital_write(pins.in1, in1)?;
        self.bridge.digital_write(pins.in2, in2)
    }

    fn set_duty(&mut self, channel: MotorChannel, duty: u16) -> Result<()> {
        self.bridge.analog_write(channel.pins().enable, duty)
    }

    fn light(&mut self, on: bool) -> Result<()> {
        self.bridge.digital_write(LIGHT_PIN, on)
    }

    fn configure_pwm(&mut self, frequency_hz: u16, range: u16) -> Result<()> {
        info!("Configuring PWM: {} Hz, range 0-{}", frequency_hz, range);
        self.bridge.analog_frequency(frequency_hz)?;
        self.bridge.analog_range(range)
    }
}

impl<P: Write> Drop for BridgeActuators<P> {
    fn drop(&mut self) {
        // Brake both channels when the backend goes away
        for channel in MotorChannel::ALL {
            if let Err(e) = self.set_direction(channel, DriveDirection::Brake) {
                warn!("Failed to brake channel {:?} on drop: {}", channel, e);
            }
        }
    }
}
