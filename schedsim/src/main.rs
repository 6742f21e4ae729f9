//! # schedsim
//!
//! Command-line entry point for the scheduler simulator.

use schedsim::{parse_args, usage, SimRuntime};
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("schedsim");

    let config = match parse_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{}", usage(program));
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", usage(program));
            process::exit(1);
        }
    };

    let mut runtime = match SimRuntime::new(config) {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to start: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = runtime.run() {
        error!("run failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
