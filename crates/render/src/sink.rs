//! Render sinks.

use std::io::Write;

use tracing::debug;

use crate::error::RenderError;
use crate::workbook::Workbook;

/// Destination for rendered workbooks.
pub trait RenderSink {
    /// Writes one workbook.
    fn write(&mut self, workbook: &Workbook) -> Result<(), RenderError>;
}

/// Writes workbooks as JSON documents, one per call.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    /// Compact JSON sink.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Pretty-printed JSON sink.
    pub const fn pretty(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderSink for JsonSink<W> {
    fn write(&mut self, workbook: &Workbook) -> Result<(), RenderError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, workbook)?;
        } else {
            serde_json::to_writer(&mut self.writer, workbook)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        debug!(sheets = workbook.sheets.len(), "Wrote workbook");
        Ok(())
    }
}
