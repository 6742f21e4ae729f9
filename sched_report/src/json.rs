//! Structured reporters

use crate::{ReportError, Reporter};
use serde::{Deserialize, Serialize};
use sim_scheduler::{RunSummary, TickRecord};
use std::io::Write;

/// Writes every tick record as one JSON object per line, then the summary
/// as a final line
pub struct JsonLinesReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn report(&mut self, record: &TickRecord) -> Result<(), ReportError> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        serde_json::to_writer(&mut self.out, summary)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Complete run: every tick plus the summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTrace {
    pub records: Vec<TickRecord>,
    pub summary: Option<RunSummary>,
}

/// Keeps every record in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    trace: RunTrace,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TickRecord] {
        &self.trace.records
    }

    pub fn into_trace(self) -> RunTrace {
        self.trace
    }

    /// Writes the recorded trace as pretty JSON
    pub fn write_json<W: Write>(&self, out: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(out, &self.trace)?;
        Ok(())
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, record: &TickRecord) -> Result<(), ReportError> {
        self.trace.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        self.trace.summary = Some(summary.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{ProcessDescriptor, StepAction};
    use sim_scheduler::Simulation;

    fn run_into<R: Reporter>(reporter: &mut R) {
        let mut sim = Simulation::new(&[ProcessDescriptor::new(0, 0, 2)]);
        sim.run_with(None, |record| reporter.report(record).unwrap());
        reporter.finish(&sim.summary()).unwrap();
    }

    #[test]
    fn test_json_lines_one_object_per_tick() {
        let mut reporter = JsonLinesReporter::new(Vec::new());
        run_into(&mut reporter);

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // four ticks plus the summary
        assert_eq!(lines.len(), 5);

        let first: TickRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.action, StepAction::Admit);
        assert!(lines[1].contains("\"action\":\"dispatch\""));
    }

    #[test]
    fn test_recording_trace_roundtrips() {
        let mut reporter = RecordingReporter::new();
        run_into(&mut reporter);
        assert_eq!(reporter.records().len(), 4);

        let mut buf = Vec::new();
        reporter.write_json(&mut buf).unwrap();
        let parsed: RunTrace = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, reporter.into_trace());
    }
}
