//! Command-line parsing

use crate::runtime::{OutputFormat, SimRuntimeConfig};
use process_loader::InputFormat;
use std::path::PathBuf;
use std::time::Duration;

/// Parses `args` (including the program name) into a config
///
/// Positional arguments are `[FILE] [SLEEP_MS]`; anything else must be a
/// known option. Returns `Ok(None)` when help was requested.
pub fn parse_args(args: &[String]) -> Result<Option<SimRuntimeConfig>, String> {
    let mut config = SimRuntimeConfig::default();
    let mut positional = 0;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--max-ticks" => {
                let value = option_value(args, &mut i, "--max-ticks")?;
                config.max_ticks = value
                    .parse()
                    .map_err(|_| format!("Invalid max-ticks value: {}", value))?;
            }
            "--trace-json" => {
                let value = option_value(args, &mut i, "--trace-json")?;
                config.trace_path = Some(PathBuf::from(value));
            }
            "--format" => {
                let value = option_value(args, &mut i, "--format")?;
                config.output = match value {
                    "text" => OutputFormat::Text,
                    "json" => OutputFormat::JsonLines,
                    other => return Err(format!("Invalid output format: {}", other)),
                };
            }
            "--input-format" => {
                let value = option_value(args, &mut i, "--input-format")?;
                config.input_format = match value {
                    "text" => InputFormat::Text,
                    "json" => InputFormat::Json,
                    "auto" => InputFormat::Auto,
                    other => return Err(format!("Invalid input format: {}", other)),
                };
            }
            "--quiet" | "-q" => config.quiet = true,
            "--verbose" | "-v" => config.verbose = true,
            "--help" | "-h" => return Ok(None),
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            value => {
                match positional {
                    0 => config.input = PathBuf::from(value),
                    1 => {
                        let millis: u64 = value
                            .parse()
                            .map_err(|_| format!("Invalid sleep duration: {}", value))?;
                        config.sleep = Duration::from_millis(millis);
                    }
                    _ => return Err("incorrect number of command line arguments".to_string()),
                }
                positional += 1;
            }
        }
        i += 1;
    }

    Ok(Some(config))
}

fn option_value<'a>(args: &'a [String], i: &mut usize, name: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", name))
}

/// Usage text
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [FILE] [SLEEP_MS] [OPTIONS]

Arguments:
  FILE                     Process list (default: ./procList.txt)
  SLEEP_MS                 Milliseconds to pause between ticks (default: 50, 0 = none)

Options:
  --max-ticks <N>          Stop after N ticks (0 = unlimited)
  --format <text|json>     Per-tick output format (default: text)
  --input-format <FMT>     text, json or auto (default: auto, by extension)
  --trace-json <FILE>      Write the full run trace as JSON
  -q, --quiet              No per-tick output, summary only
  -v, --verbose            Print the process table first (text output)
  -h, --help               Show this help message

Logging is controlled with RUST_LOG (default: warn)."
    )
}
