// Zenoh transport around the command interpreter
//
// Commands arrive as queries on KEY_CMD_DRIVE with the command string in the
// `State` selector parameter, e.g. `rccar/cmd/drive?State=F`. Queries are
// handled one at a time by this task, which is the only owner of the
// interpreter, so every command's writes finish before the next one starts.

use tracing::{debug, info, warn};

// local imports
use crate::actuator::Actuators;
use crate::config::{COMMAND_PARAM, TOPIC_STATE_MOTION};
use crate::interpreter::CommandInterpreter;
use crate::messages::{MotionReport, REPLY_MISSING_COMMAND, REPLY_OK};

/// Errors raised at the transport boundary, before the core is invoked
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Missing {param} parameter")]
    MissingInput { param: &'static str },
}

/// Extract the command character from the `State` parameter value.
/// Only the first character counts, the rest of the string is ignored. An
/// empty value yields '\0', which the interpreter treats as invalid.
pub fn command_char(value: Option<&str>) -> Result<char, TransportError> {
    let value = value.ok_or(TransportError::MissingInput {
        param: COMMAND_PARAM,
    })?;
    Ok(value.chars().next().unwrap_or('\0'))
}

/// Run one command through the interpreter and describe the result
pub fn process_command<A: Actuators>(
    interpreter: &mut CommandInterpreter<A>,
    command: char,
) -> MotionReport {
    // Invalid commands are acknowledged like any other, the interpreter logs them
    let valid = interpreter.interpret(command).is_ok();
    MotionReport::new(interpreter.state(), command, valid)
}

fn char_codes(value: &str) -> String {
    value
        .chars()
        .map(|c| (c as u32).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn run<A: Actuators>(
    actuators: A,
    key: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up queryable and publisher...");
    let queryable = session.declare_queryable(key).await?;
    let pub_state = session.declare_publisher(TOPIC_STATE_MOTION).await?;

    let mut interpreter = CommandInterpreter::new(actuators);
    interpreter.startup();

    info!("Serving commands on: {}?{}=<command>", key, COMMAND_PARAM);
    info!("Publishing to: {}", TOPIC_STATE_MOTION);

    while let Ok(query) = queryable.recv_async().await {
        let value = query.parameters().get(COMMAND_PARAM);
        if let Some(v) = value {
            debug!("{:?} ( {} )", v, char_codes(v));
        }

        let command = match command_char(value) {
            Ok(c) => c,
            Err(e) => {
                warn!("Rejecting query on {}: {}", query.key_expr(), e);
                if let Err(e) = query.reply_err(REPLY_MISSING_COMMAND).await {
                    warn!("Failed to send error reply: {}", e);
                }
                continue;
            }
        };

        // 1. Apply the command (all actuator writes complete here)
        let report = process_command(&mut interpreter, command);

        // 2. Acknowledge
        if let Err(e) = query.reply(query.key_expr().clone(), REPLY_OK).await {
            warn!("Failed to reply to command {:?}: {}", command, e);
        }

        // 3. Publish motion state
        let report_json = serde_json::to_string(&report)?;
        if let Err(e) = pub_state.put(report_json).await {
            warn!("Failed to publish motion report: {}", e);
        }
    }

    info!("Command queryable closed, shutting down");
    Ok(())
}
