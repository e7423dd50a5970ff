use std::io::{self, Write};

use super::{Report, ReportError, Reporter};

/// A reporter that prints the report as JSON, in the wire shape of the protocol types.
#[derive(Debug, Clone)]
pub struct JsonReporter {
    pretty: bool,
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Single-line output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    fn write_report(&self, writer: &mut impl Write, report: &Report) -> Result<(), ReportError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, report)?;
        } else {
            serde_json::to_writer(&mut *writer, report)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Reporter for JsonReporter {
    fn report(&self, report: &Report) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.write_report(&mut writer, report)
    }
}
