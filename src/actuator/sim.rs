// In-memory actuator backend
//
// Records recent writes in order and keeps the resulting output state. Used by
// `--simulate` and as the recording fake in tests.

use tracing::debug;

use super::{
    ActuatorError, ActuatorWrite, Actuators, DriveDirection, MotorChannel, Result,
    SteeringPosition,
};

/// Writes kept in the journal; older ones are dropped first
pub const JOURNAL_CAPACITY: usize = 512;

/// Last value written to each output (None = never written)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorSnapshot {
    pub steering: Option<SteeringPosition>,
    pub direction: [Option<DriveDirection>; 2],
    pub duty: [Option<u16>; 2],
    pub light: Option<bool>,
    pub pwm: Option<(u16, u16)>, // (frequency_hz, range)
}

impl ActuatorSnapshot {
    pub fn direction(&self, channel: MotorChannel) -> Option<DriveDirection> {
        self.direction[channel.index()]
    }

    pub fn duty(&self, channel: MotorChannel) -> Option<u16> {
        self.duty[channel.index()]
    }
}

#[derive(Debug, Default)]
pub struct SimActuators {
    journal: Vec<ActuatorWrite>,
    snapshot: ActuatorSnapshot,
    steering_faulty: bool,
}

impl SimActuators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent successful writes (up to JOURNAL_CAPACITY), oldest first
    pub fn journal(&self) -> &[ActuatorWrite] {
        &self.journal
    }

    /// Drain the journal, keeping the snapshot
    pub fn take_journal(&mut self) -> Vec<ActuatorWrite> {
        std::mem::take(&mut self.journal)
    }

    pub fn snapshot(&self) -> ActuatorSnapshot {
        self.snapshot
    }

    /// Make steering writes fail, as with a disconnected servo
    pub fn set_steering_faulty(&mut self, faulty: bool) {
        self.steering_faulty = faulty;
    }

    fn record(&mut self, write: ActuatorWrite) {
        debug!("Sim write: {:?}", write);
        if self.journal.len() >= JOURNAL_CAPACITY {
            self.journal.remove(0);
        }
        self.journal.push(write);
    }
}

impl Actuators for SimActuators {
    fn steer(&mut self, position: SteeringPosition) -> Result<()> {
        if self.steering_faulty {
            return Err(ActuatorError::Unavailable {
                reason: "steering servo not responding".to_string(),
            });
        }
        self.snapshot.steering = Some(position);
        self.record(ActuatorWrite::Steer(position));
        Ok(())
    }

    fn set_direction(&mut self, channel: MotorChannel, direction: DriveDirection) -> Result<()> {
        self.snapshot.direction[channel.index()] = Some(direction);
        self.record(ActuatorWrite::Direction(channel, direction));
        Ok(())
    }

    fn set_duty(&mut self, channel: MotorChannel, duty: u16) -> Result<()> {
        self.snapshot.duty[channel.index()] = Some(duty);
        self.record(ActuatorWrite::Duty(channel, duty));
        Ok(())
    }

    fn light(&mut self, on: bool) -> Result<()> {
        self.snapshot.light = Some(on);
        self.record(ActuatorWrite::Light(on));
        Ok(())
    }

    fn configure_pwm(&mut self, frequency_hz: u16, range: u16) -> Result<()> {
        debug!("Sim PWM: {} Hz, range 0-{}", frequency_hz, range);
        self.snapshot.pwm = Some((frequency_hz, range));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_tracks_last_write() {
        let mut sim = SimActuators::new();
        sim.set_duty(MotorChannel::A, 10).unwrap();
        sim.set_duty(MotorChannel::A, 200).unwrap();
        sim.light(true).unwrap();

        let snapshot = sim.snapshot();
        assert_eq!(snapshot.duty(MotorChannel::A), Some(200));
        assert_eq!(snapshot.duty(MotorChannel::B), None);
        assert_eq!(snapshot.light, Some(true));
        assert_eq!(sim.journal().len(), 3);
    }

    #[test]
    fn test_take_journal_keeps_snapshot() {
        let mut sim = SimActuators::new();
        sim.steer(SteeringPosition::Right).unwrap();
        let journal = sim.take_journal();
        assert_eq!(journal, vec![ActuatorWrite::Steer(SteeringPosition::Right)]);
        assert!(sim.journal().is_empty());
        assert_eq!(sim.snapshot().steering, Some(SteeringPosition::Right));
    }

    #[test]
    fn test_journal_is_bounded() {
        let mut sim = SimActuators::new();
        for duty in 0..10_000u16 {
            sim.set_duty(MotorChannel::B, duty).unwrap();
        }
        assert_eq!(sim.journal().len(), JOURNAL_CAPACITY);
        assert_eq!(
            sim.journal().last(),
            Some(&ActuatorWrite::Duty(MotorChannel::B, 9_999))
        );
        assert_eq!(
            sim.journal().first(),
            Some(&ActuatorWrite::Duty(MotorChannel::B, 10_000 - JOURNAL_CAPACITY as u16))
        );
    }

    #[test]
    fn test_faulty_steering() {
        let mut sim = SimActuators::new();
        sim.set_steering_faulty(true);
        assert!(sim.steer(SteeringPosition::Left).is_err());
        assert!(sim.journal().is_empty());
        assert!(sim.set_direction(MotorChannel::A, DriveDirection::Brake).is_ok());
    }
}
