// Key expressions, pin map, duty range, steering angles
use std::time::Duration;

// Zenoh key expressions
pub const KEY_CMD_DRIVE: &str = "rccar/cmd/drive"; // queryable, one command per query
pub const TOPIC_STATE_MOTION: &str = "rccar/state/motion"; // motion report after each command

// Selector parameter carrying the command string, e.g. rccar/cmd/drive?State=F
pub const COMMAND_PARAM: &str = "State";

// Speed / duty
pub const DEFAULT_SPEED_PERCENTAGE: u8 = 100;
pub const MAX_DUTY: u16 = 255; // 8-bit PWM range
pub const PWM_FREQUENCY_HZ: u16 = 400;

// Inner wheel runs at 1/4 of the current speed while turning in ultimate mode
pub const TURN_RATIO_NUM: u8 = 1;
pub const TURN_RATIO_DEN: u8 = 4;

// Steering servo angles (degrees)
pub const SERVO_ANGLE_LEFT: u16 = 0;
pub const SERVO_ANGLE_NEUTRAL: u16 = 90;
pub const SERVO_ANGLE_RIGHT: u16 = 180;

// Pin map (ESP8266 GPIO numbers behind the NodeMCU D-labels), L298N wiring
pub const MOTOR_A_IN1: u8 = 16; // D0, IN1
pub const MOTOR_A_IN2: u8 = 5; // D1, IN2
pub const MOTOR_B_IN1: u8 = 12; // D6, IN3
pub const MOTOR_B_IN2: u8 = 13; // D7, IN4
pub const MOTOR_A_ENABLE: u8 = 4; // D2, ENA
pub const MOTOR_B_ENABLE: u8 = 2; // D4, ENB
pub const SERVO_PIN: u8 = 15; // D8
pub const LIGHT_PIN: u8 = 0; // D3

// Serial pin bridge
pub const BRIDGE_PORT: &str = "/dev/ttyUSB0";
pub const BRIDGE_BAUDRATE: u32 = 115_200;
pub const BRIDGE_TIMEOUT: Duration = Duration::from_millis(100);

// Drive the physical pins (set to false for simulation/testing)
pub const ACTUATORS_ENABLED: bool = true;
