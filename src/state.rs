// Motion state shared by every command
//
// Owned by the command interpreter; reset to defaults on every start.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_SPEED_PERCENTAGE, MAX_DUTY, TURN_RATIO_DEN, TURN_RATIO_NUM};

/// Drive speed in percent, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpeedPercentage(u8);

/// Percentage above 100 received from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Speed percentage {0} out of range 0-100")]
pub struct SpeedOutOfRange(pub u8);

impl SpeedPercentage {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Values above 100 saturate at 100
    pub fn new(percent: u8) -> Self {
        Self(percent.min(Self::MAX.0))
    }

    /// Speed selected by a digit key: '0' -> 0%, '9' -> 90%
    pub fn from_digit(digit: u8) -> Self {
        Self::new(digit.min(9) * 10)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Inner-wheel speed while turning, truncated toward zero
    pub fn turn_reduced(self) -> Self {
        let reduced = u16::from(self.0) * u16::from(TURN_RATIO_NUM) / u16::from(TURN_RATIO_DEN);
        // reduced <= self.0 because the ratio is below one
        Self::new(reduced as u8)
    }

    /// duty = floor(percent * MAX_DUTY / 100)
    pub fn to_duty(self) -> u16 {
        (u32::from(self.0) * u32::from(MAX_DUTY) / 100) as u16
    }
}

impl TryFrom<u8> for SpeedPercentage {
    type Error = SpeedOutOfRange;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        if percent > Self::MAX.0 {
            return Err(SpeedOutOfRange(percent));
        }
        Ok(Self(percent))
    }
}

impl From<SpeedPercentage> for u8 {
    fn from(speed: SpeedPercentage) -> Self {
        speed.0
    }
}

impl Default for SpeedPercentage {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_PERCENTAGE)
    }
}

/// Process-wide motion state, read and mutated one command at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MotionState {
    pub speed: SpeedPercentage,
    /// Turn commands also drive the wheels differentially
    pub ultimate_mode: bool,
    pub light: bool,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip ultimate mode and return the new value
    pub fn toggle_ultimate_mode(&mut self) -> bool {
        self.ultimate_mode = !self.ultimate_mode;
        self.ultimate_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = MotionState::new();
        assert_eq!(state.speed.get(), 100);
        assert!(!state.ultimate_mode);
        assert!(!state.light);
    }

    #[test]
    fn test_speed_saturates() {
        assert_eq!(SpeedPercentage::new(250).get(), 100);
        assert_eq!(SpeedPercentage::from_digit(12).get(), 90);
    }

    #[test]
    fn test_duty_truncates() {
        assert_eq!(SpeedPercentage::new(100).to_duty(), 255);
        assert_eq!(SpeedPercentage::new(50).to_duty(), 127);
        assert_eq!(SpeedPercentage::new(10).to_duty(), 25);
        assert_eq!(SpeedPercentage::new(0).to_duty(), 0);
    }

    #[test]
    fn test_turn_reduced_speed() {
        // 100 * 1/4 = 25 -> duty 63
        assert_eq!(SpeedPercentage::MAX.turn_reduced().get(), 25);
        assert_eq!(SpeedPercentage::MAX.turn_reduced().to_duty(), 63);
        // 50 * 1/4 = 12.5 -> 12, not rounded up
        assert_eq!(SpeedPercentage::new(50).turn_reduced().get(), 12);
        assert_eq!(SpeedPercentage::new(50).turn_reduced().to_duty(), 30);
        assert_eq!(SpeedPercentage::new(10).turn_reduced().get(), 2);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<SpeedPercentage>("200").is_err());
        let command = serde_json::from_str::<crate::command::Command>(r#"{"set_speed":250}"#);
        assert!(command.is_err());

        let speed: SpeedPercentage = serde_json::from_str("100").unwrap();
        assert_eq!(speed.to_duty(), 255);
        assert_eq!(serde_json::to_string(&SpeedPercentage::new(40)).unwrap(), "40");
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut state = MotionState::new();
        assert!(state.toggle_ultimate_mode());
        assert!(!state.toggle_ultimate_mode());
        assert_eq!(state, MotionState::new());
    }
}
