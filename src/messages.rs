// Message types exchanged with the transport

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::state::MotionState;

/// Reply text for every processed command, valid or not
pub const REPLY_OK: &str = "OK";

/// Reply text when the query carries no command
pub const REPLY_MISSING_COMMAND: &str = "Missing State parameter";

/// Outcome of a recognized command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub command: Command,
    /// Actuator writes issued for the command
    pub writes: usize,
    /// Writes the actuators rejected (logged, not fatal)
    pub faults: usize,
}

/// Motion state published by runtime after each command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionReport {
    pub speed_percentage: u8,
    pub ultimate_mode: bool,
    pub light: bool,
    pub last_command: char,
    pub valid: bool,
}

impl MotionReport {
    pub fn new(state: &MotionState, last_command: char, valid: bool) -> Self {
        Self {
            speed_percentage: state.speed.get(),
            ultimate_mode: state.ultimate_mode,
            light: state.light,
            last_command,
            valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json() {
        let report = MotionReport::new(&MotionState::new(), 'F', true);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"speed_percentage":100,"ultimate_mode":false,"light":false,"last_command":"F","valid":true}"#
        );
    }

    #[test]
    fn test_ack_json_names_command() {
        let ack = Ack {
            command: Command::ForwardLeft,
            writes: 6,
            faults: 0,
        };
        let json = serde_json::to_value(ack).unwrap();
        assert_eq!(json["command"], "forward_left");
    }
}
