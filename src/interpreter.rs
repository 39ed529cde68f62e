// Command interpreter: one character in, one action out
//
// Owns the motion state and the motion controller. Each call runs to
// completion (every actuator write issued) before returning, so callers that
// share an interpreter must serialize access to it.

use tracing::{info, warn};

use crate::actuator::Actuators;
use crate::command::{Command, InvalidCommand};
use crate::messages::Ack;
use crate::motion::MotionController;
use crate::state::MotionState;

pub struct CommandInterpreter<A: Actuators> {
    state: MotionState,
    controller: MotionController<A>,
}

impl<A: Actuators> CommandInterpreter<A> {
    /// Create an interpreter with default motion state
    pub fn new(actuators: A) -> Self {
        Self {
            state: MotionState::new(),
            controller: MotionController::new(actuators),
        }
    }

    /// Bring the outputs to their boot state (PWM setup, default duty)
    pub fn startup(&mut self) {
        let faults = self.controller.startup(&self.state);
        if faults > 0 {
            warn!("Startup finished with {} actuator fault(s)", faults);
        }
        info!("Motion core ready, speed {}%", self.state.speed.get());
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn actuators(&self) -> &A {
        self.controller.actuators()
    }

    pub fn actuators_mut(&mut self) -> &mut A {
        self.controller.actuators_mut()
    }

    /// Apply a single command character.
    ///
    /// Unrecognized characters return `InvalidCommand` and leave both the
    /// motion state and the actuators untouched.
    pub fn interpret(&mut self, c: char) -> Result<Ack, InvalidCommand> {
        let command = Command::try_from(c).inspect_err(|_| {
            warn!("Invalid Command Pressed !! ({:?})", c);
        })?;

        self.update_state(command);

        let (maneuver, faults) = self.controller.perform(command, &self.state);
        if faults > 0 {
            warn!(
                "{} of {} actuator writes failed for {:?}",
                faults,
                maneuver.len(),
                command
            );
        }

        Ok(Ack {
            command,
            writes: maneuver.len(),
            faults,
        })
    }

    fn update_state(&mut self, command: Command) {
        match command {
            Command::SetSpeed(speed) => {
                self.state.speed = speed;
                info!("Speed : {}%", speed.get());
            }
            Command::ToggleUltimateMode => {
                let on = self.state.toggle_ultimate_mode();
                info!("{}", ultimate_mode_label(on));
            }
            Command::LightOn => {
                self.state.light = true;
                info!("{}", command.label());
            }
            Command::LightOff => {
                self.state.light = false;
                info!("{}", command.label());
            }
            _ => info!("{}", command.label()),
        }
    }
}

fn ultimate_mode_label(on: bool) -> &'static str {
    if on {
        "Ultimate mode : on"
    } else {
        "Ultimate mode : off"
    }
}
