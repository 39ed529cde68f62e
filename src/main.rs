use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use rccar_zenoh_runtime::actuator::{BridgeActuators, SimActuators};
use rccar_zenoh_runtime::config::{ACTUATORS_ENABLED, BRIDGE_PORT, KEY_CMD_DRIVE};
use rccar_zenoh_runtime::runtime;

/// RC car motion runtime: single-character drive commands over Zenoh
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Serial port of the pin bridge
    #[arg(long, default_value = BRIDGE_PORT)]
    port: String,

    /// Run without hardware, logging every actuator write
    #[arg(long)]
    simulate: bool,

    /// Key expression to serve commands on
    #[arg(long, default_value = KEY_CMD_DRIVE)]
    key: String,
}

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let result = if args.simulate || !ACTUATORS_ENABLED {
        info!("Simulation mode: actuator writes are logged only");
        runtime::run(SimActuators::new(), &args.key).await
    } else {
        match BridgeActuators::open(&args.port) {
            Ok(actuators) => runtime::run(actuators, &args.key).await,
            Err(e) => Err(e.into()),
        }
    };

    if let Err(e) = result {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
