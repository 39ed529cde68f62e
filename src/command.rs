// Command alphabet received from the remote client
//
// One ASCII character per command, case-sensitive. Digits set the speed in
// steps of 10%, 'q' sets the maximum speed.

use serde::{Deserialize, Serialize};

use crate::state::SpeedPercentage;

/// Character with no meaning in the command alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid command {command:?}")]
pub struct InvalidCommand {
    pub command: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Forward,
    Backward,
    PivotLeft,
    PivotRight,
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
    Stop,
    ToggleUltimateMode,
    HornOff,
    LightOn,
    LightOff,
    SetSpeed(SpeedPercentage),
}

impl Command {
    /// Log label for the command
    pub fn label(&self) -> &'static str {
        match self {
            Command::Forward => "Forward",
            Command::Backward => "Backward",
            Command::PivotLeft => "Left",
            Command::PivotRight => "Right",
            Command::ForwardLeft => "Forward Left",
            Command::ForwardRight => "Forward Right",
            Command::BackwardLeft => "Backward Left",
            Command::BackwardRight => "Backward Right",
            Command::Stop => "Stop",
            Command::ToggleUltimateMode => "Ultimate mode",
            Command::HornOff => "Horn : off",
            Command::LightOn => "Light : on",
            Command::LightOff => "Light : off",
            Command::SetSpeed(_) => "Speed",
        }
    }
}

impl TryFrom<char> for Command {
    type Error = InvalidCommand;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let command = match c {
            'F' => Command::Forward,
            'B' => Command::Backward,
            'L' => Command::PivotLeft,
            'R' => Command::PivotRight,
            'G' => Command::ForwardLeft,
            'I' => Command::ForwardRight,
            'H' => Command::BackwardLeft,
            'J' => Command::BackwardRight,
            'S' => Command::Stop,
            'V' => Command::ToggleUltimateMode,
            ' ' => Command::HornOff,
            'W' => Command::LightOn,
            'w' => Command::LightOff,
            'q' => Command::SetSpeed(SpeedPercentage::MAX),
            '0'..='9' => {
                // '0'..='9' is ASCII, the subtraction cannot underflow
                let digit = c as u8 - b'0';
                Command::SetSpeed(SpeedPercentage::from_digit(digit))
            }
            _ => return Err(InvalidCommand { command: c }),
        };
        Ok(command)
    }
}
