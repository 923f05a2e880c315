//! WillItConnect CLI Binary
//!
//! Command-line interface for checking connectivity from inside Cloud Foundry.

use std::io::Write;
use std::process;
use tracing::{error, info};
use willitconnect::cli::{Cli, RunContext};
use willitconnect::config::{ConfigLoader, WillItConnectConfig};
use willitconnect::error::CheckError;
use willitconnect::logging::init_logging;

fn main() {
    let cli = match Cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    // Initialize logging early
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("WillItConnect CLI starting");

    let context = match RunContext::new(&config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing run context: {}", e);
            fail(&e);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match context.execute(&cli.check_args(), &mut out) {
        Ok(()) => info!("Command completed successfully"),
        Err(e) => {
            error!("Command failed: {}", e);
            let _ = writeln!(out, "{}", e);
            process::exit(1);
        }
    }
}

/// Load and validate configuration.
fn load_config() -> Result<WillItConnectConfig, CheckError> {
    let config = ConfigLoader::load()?;
    config.validate().map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        CheckError::Config(format!(
            "Configuration validation failed:\n{}",
            error_msgs.join("\n")
        ))
    })?;
    Ok(config)
}

fn fail(e: &CheckError) -> ! {
    println!("{}", e);
    process::exit(1);
}
