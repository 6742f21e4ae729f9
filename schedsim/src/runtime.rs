//! # Host Runtime
//!
//! The tick loop that ties loader, simulation and reporters together.

use core_types::ProcessDescriptor;
use process_loader::{InputFormat, LoaderError};
use sched_report::{ConsoleReporter, JsonLinesReporter, RecordingReporter, ReportError, Reporter};
use sim_scheduler::{RunSummary, Simulation};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Host runtime error types
#[derive(Debug, Error)]
pub enum SimRuntimeError {
    #[error("Load error: {0}")]
    Load(#[from] LoaderError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Failed to write trace {}: {source}", .path.display())]
    Trace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-tick output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One aligned text line per tick
    Text,
    /// One JSON object per tick
    JsonLines,
}

/// Host runtime configuration
#[derive(Debug, Clone)]
pub struct SimRuntimeConfig {
    /// Process list to load
    pub input: PathBuf,
    /// Process list format
    pub input_format: InputFormat,
    /// Wall-clock pause between ticks (zero = none)
    pub sleep: Duration,
    /// Maximum ticks to run (0 = unlimited)
    pub max_ticks: u64,
    /// Per-tick output format
    pub output: OutputFormat,
    /// Where to write the full trace, if anywhere
    pub trace_path: Option<PathBuf>,
    /// Suppress per-tick output; the summary is still written
    pub quiet: bool,
    /// Print the process table before the first tick (text output only)
    pub verbose: bool,
}

impl Default for SimRuntimeConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./procList.txt"),
            input_format: InputFormat::Auto,
            sleep: Duration::from_millis(50),
            max_ticks: 0,
            output: OutputFormat::Text,
            trace_path: None,
            quiet: false,
            verbose: false,
        }
    }
}

/// Host runtime
pub struct SimRuntime {
    config: SimRuntimeConfig,
    descriptors: Vec<ProcessDescriptor>,
    simulation: Simulation,
}

impl SimRuntime {
    /// Loads the configured process list and prepares a simulation
    pub fn new(config: SimRuntimeConfig) -> Result<Self, SimRuntimeError> {
        let descriptors = process_loader::load_file(&config.input, config.input_format)?;
        Self::from_descriptors(config, descriptors)
    }

    /// Prepares a simulation over descriptors that did not come from a file
    pub fn from_descriptors(
        config: SimRuntimeConfig,
        descriptors: Vec<ProcessDescriptor>,
    ) -> Result<Self, SimRuntimeError> {
        process_loader::validate(&descriptors).map_err(LoaderError::from)?;
        let simulation = Simulation::new(&descriptors);
        Ok(Self {
            config,
            descriptors,
            simulation,
        })
    }

    pub fn config(&self) -> &SimRuntimeConfig {
        &self.config
    }

    pub fn descriptors(&self) -> &[ProcessDescriptor] {
        &self.descriptors
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Runs to completion, writing output to stdout
    pub fn run(&mut self) -> Result<RunSummary, SimRuntimeError> {
        let stdout = io::stdout();
        self.run_to(stdout.lock())
    }

    /// Runs to completion, writing output in the configured format to `out`
    pub fn run_to<W: Write>(&mut self, out: W) -> Result<RunSummary, SimRuntimeError> {
        match self.config.output {
            OutputFormat::Text => {
                let mut reporter =
                    ConsoleReporter::new(out).with_process_table(self.config.verbose);
                self.run_with_reporter(&mut reporter)
            }
            OutputFormat::JsonLines => {
                if self.config.verbose {
                    debug!("process table is only rendered in text output");
                }
                let mut reporter = JsonLinesReporter::new(out);
                self.run_with_reporter(&mut reporter)
            }
        }
    }

    /// Tick cap as the simulation takes it; `max_ticks == 0` means none
    pub fn tick_limit(&self) -> Option<u64> {
        (self.config.max_ticks > 0).then_some(self.config.max_ticks)
    }

    /// Runs to completion, sending every tick to `reporter`
    ///
    /// Stops early once `max_ticks` ticks have run. With `quiet` set the
    /// reporter sees the start and the summary but no ticks.
    pub fn run_with_reporter<R: Reporter>(
        &mut self,
        reporter: &mut R,
    ) -> Result<RunSummary, SimRuntimeError> {
        info!(
            processes = self.descriptors.len(),
            max_ticks = self.config.max_ticks,
            "simulation starting"
        );
        reporter.start(self.simulation.context())?;

        let limit = self.tick_limit();
        let quiet = self.config.quiet;
        let sleep = self.config.sleep;
        let mut recorder = self.config.trace_path.as_ref().map(|_| RecordingReporter::new());

        let ran = self.simulation.try_run_with(limit, |record| {
            if !quiet {
                reporter.report(record)?;
            }
            if let Some(recorder) = recorder.as_mut() {
                recorder.report(record)?;
            }
            if !sleep.is_zero() {
                thread::sleep(sleep);
            }
            Ok::<(), ReportError>(())
        })?;

        if !self.simulation.is_finished() {
            warn!(
                ticks = ran,
                "tick limit reached before every process finished"
            );
        }

        let summary = self.simulation.summary();
        reporter.finish(&summary)?;

        if let (Some(mut recorder), Some(path)) = (recorder, self.config.trace_path.as_ref()) {
            recorder.finish(&summary)?;
            write_trace(&recorder, path)?;
        }

        info!(
            ticks = summary.ticks,
            completed = summary.completed(),
            "simulation finished"
        );
        Ok(summary)
    }
}

fn write_trace(recorder: &RecordingReporter, path: &Path) -> Result<(), SimRuntimeError> {
    let trace_error = |source| SimRuntimeError::Trace {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(trace_error)?;
    let mut writer = BufWriter::new(file);
    recorder.write_json(&mut writer)?;
    writer.flush().map_err(trace_error)?;
    Ok(())
}
