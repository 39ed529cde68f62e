// Keyboard teleop: one key per drive command, Esc quits
//
// Usage: cargo run --example teleop
//
// w/x/a/d = forward/backward/left/right, q/e/z/c = diagonals, s = stop,
// 0-9 = speed, m = max speed, v = ultimate mode, l/k = light on/off
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::time::Duration;
use tracing::{info, warn};

use rccar_zenoh_runtime::config::{COMMAND_PARAM, KEY_CMD_DRIVE};

/// Map a key to a command character of the drive alphabet
fn key_to_command(code: KeyCode) -> Option<char> {
    let command = match code {
        KeyCode::Char('w') | KeyCode::Up => 'F',
        KeyCode::Char('x') | KeyCode::Down => 'B',
        KeyCode::Char('a') | KeyCode::Left => 'L',
        KeyCode::Char('d') | KeyCode::Right => 'R',
        KeyCode::Char('q') => 'G',
        KeyCode::Char('e') => 'I',
        KeyCode::Char('z') => 'H',
        KeyCode::Char('c') => 'J',
        KeyCode::Char('s') => 'S',
        KeyCode::Char('v') => 'V',
        KeyCode::Char('h') => ' ',
        KeyCode::Char('l') => 'W',
        KeyCode::Char('k') => 'w',
        KeyCode::Char('m') => 'q',
        KeyCode::Char(c @ '0'..='9') => c,
        _ => return None,
    };
    Some(command)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Controls: w/x/a/d=move, q/e/z/c=diagonal, s=stop, Esc=quit");
    info!("Speed: 0-9, m=max | v=ultimate mode | l/k=light on/off");

    enable_raw_mode()?;
    let result = run_teleop(&session).await;
    disable_raw_mode()?;

    result
}

async fn run_teleop(
    session: &zenoh::Session,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    loop {
        if !event::poll(Duration::from_millis(20))? {
            continue;
        }
        let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
            continue;
        };
        if kind != KeyEventKind::Press && kind != KeyEventKind::Repeat {
            continue;
        }
        if code == KeyCode::Esc {
            break;
        }
        let Some(command) = key_to_command(code) else {
            continue;
        };

        let selector = format!("{}?{}={}", KEY_CMD_DRIVE, COMMAND_PARAM, command);
        let replies = session.get(selector.as_str()).await?;
        while let Ok(reply) = replies.recv_async().await {
            match reply.result() {
                Ok(sample) => info!(
                    "{:?} -> {}",
                    command,
                    sample.payload().try_to_string().unwrap_or_default()
                ),
                Err(err) => warn!(
                    "{:?} -> {}",
                    command,
                    err.payload().try_to_string().unwrap_or_default()
                ),
            }
        }
    }

    Ok(())
}
