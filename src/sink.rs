// src/sink.rs

//! The host's log channel.

use std::io::Write;

/// How the host should present a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Note,
    Normal,
    Error,
}

/// Receives report lines as they are produced.
///
/// Implementations must not buffer across calls; each line belongs to the
/// host as soon as it is written.
pub trait LogSink {
    fn write_line(&mut self, severity: Severity, text: &str);

    fn note(&mut self, text: &str) {
        self.write_line(Severity::Note, text);
    }

    fn normal(&mut self, text: &str) {
        self.write_line(Severity::Normal, text);
    }

    fn error(&mut self, text: &str) {
        self.write_line(Severity::Error, text);
    }
}

/// Writes note and normal lines to stdout, error lines to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&mut self, severity: Severity, text: &str) {
        // The sink contract has no failure path; a closed console drops lines.
        let _ = match severity {
            Severity::Note | Severity::Normal => write_flushed(&mut std::io::stdout().lock(), text),
            Severity::Error => write_flushed(&mut std::io::stderr().lock(), text),
        };
    }
}

fn write_flushed(w: &mut impl Write, text: &str) -> std::io::Result<()> {
    writeln!(w, "{text}")?;
    w.flush()
}
