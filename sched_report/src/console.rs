//! Plain-text console reporter

use crate::format::{format_summary, format_tick_line, render_process_table};
use crate::{ReportError, Reporter};
use sim_scheduler::{RunSummary, SimContext, TickRecord};
use std::io::Write;

/// Writes one line per tick, optionally framed by the process table and a
/// summary block
pub struct ConsoleReporter<W: Write> {
    out: W,
    print_table: bool,
    print_summary: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            print_table: false,
            print_summary: true,
        }
    }

    /// Enables or disables the process table before the first tick
    pub fn with_process_table(mut self, enabled: bool) -> Self {
        self.print_table = enabled;
        self
    }

    /// Enables or disables the end-of-run summary block
    pub fn with_summary(mut self, enabled: bool) -> Self {
        self.print_summary = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn start(&mut self, ctx: &SimContext) -> Result<(), ReportError> {
        if self.print_table {
            write!(self.out, "{}", render_process_table(ctx.processes()))?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn report(&mut self, record: &TickRecord) -> Result<(), ReportError> {
        writeln!(self.out, "{}", format_tick_line(record))?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        if self.print_summary {
            writeln!(self.out)?;
            write!(self.out, "{}", format_summary(summary))?;
        }
        self.out.flush()?;
        Ok(())
    }
}
