//! Chat room HTTP server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server -- --port 5000
//! ```

use std::time::Duration;

use clap::Parser;

use batepapo_rs::{ServerConfig, logger::setup_logger, scheduler::SweepConfig};

#[derive(Debug, Parser)]
#[command(name = "server", about = "Single-room chat backend")]
struct Args {
    /// TCP port to listen on
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Seconds between eviction sweeps
    #[arg(long, default_value_t = 15)]
    sweep_interval_secs: u64,

    /// Seconds of inactivity after which a participant is evicted
    #[arg(long, default_value_t = 10)]
    idle_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig {
        port: args.port,
        sweep: SweepConfig {
            interval: Duration::from_secs(args.sweep_interval_secs),
            idle_timeout: Duration::from_secs(args.idle_timeout_secs),
        },
    };

    // Run the server
    if let Err(e) = batepapo_rs::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
