use std::sync::{Arc, Mutex};

use syscmd::sink::{LogSink, Severity};

/// A log sink that remembers every line, in order.
///
/// Clones share the same buffer, so a copy can be handed to another thread
/// and inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn severities(&self) -> Vec<Severity> {
        self.lines().into_iter().map(|(s, _)| s).collect()
    }

    /// Text of every line written with `severity`.
    pub fn texts(&self, severity: Severity) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, t)| t)
            .collect()
    }

    /// Everything written, joined by newlines.
    pub fn joined(&self) -> String {
        self.lines()
            .into_iter()
            .map(|(_, t)| t)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl LogSink for RecordingSink {
    fn write_line(&mut self, severity: Severity, text: &str) {
        self.lines.lock().unwrap().push((severity, text.to_string()));
    }
}
