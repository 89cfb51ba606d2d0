//! Negation record sinks.

use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{NegexError, Result};

/// One negation verdict with document-level offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegationRecord {
    pub document_id: String,
    pub sentence: usize,
    pub begin: usize,
    pub end: usize,
    pub text: String,
    pub polarity: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line.
    #[default]
    Jsonl,
    /// Headered CSV.
    Csv,
}

enum Sink<W: Write> {
    Jsonl(W),
    Csv(csv::Writer<W>),
}

/// Streams records to a writer in the chosen format.
pub struct RecordWriter<W: Write> {
    sink: Sink<W>,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        let sink = match format {
            OutputFormat::Jsonl => Sink::Jsonl(writer),
            OutputFormat::Csv => Sink::Csv(csv::Writer::from_writer(writer)),
        };
        Self { sink, written: 0 }
    }

    pub fn write(&mut self, record: &NegationRecord) -> Result<()> {
        match &mut self.sink {
            Sink::Jsonl(writer) => {
                serde_json::to_writer(&mut *writer, record)?;
                writer.write_all(b"\n")?;
            }
            Sink::Csv(writer) => writer.serialize(record)?,
        }
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered output and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        match self.sink {
            Sink::Jsonl(mut writer) => {
                writer.flush()?;
                Ok(writer)
            }
            Sink::Csv(writer) => writer
                .into_inner()
                .map_err(|err| NegexError::Io(err.into_error())),
        }
    }
}
