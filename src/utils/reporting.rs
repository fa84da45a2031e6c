use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::Path;
use crate::SanitizationResult;

enum LogSink {
    Console,
    File(LineWriter<File>),
}

/// Records one human-readable line per processed file, to the console or
/// to a log file. Logging is best-effort: an unwritable log file degrades
/// to console output and never fails the run.
pub struct Logger {
    sink: LogSink,
}

impl Logger {
    pub fn to_console() -> Self {
        Self {
            sink: LogSink::Console,
        }
    }

    pub fn to_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: LogSink::File(LineWriter::new(file)),
            },
            Err(e) => {
                log::warn!(
                    "cannot open log file {}, falling back to console: {}",
                    path.display(),
                    e
                );
                Self::to_console()
            }
        }
    }

    pub fn record(&mut self, result: &SanitizationResult) {
        let line = Self::format_line(result);
        if let LogSink::File(writer) = &mut self.sink {
            if writeln!(writer, "{}", line).is_ok() {
                return;
            }
            log::warn!("log file write failed, falling back to console");
            self.sink = LogSink::Console;
        }
        println!("{}", line);
    }

    /// Console-only batch summary.
    pub fn summarize(&self, processed: usize, failed: usize) {
        println!(
            "{} file(s) processed, {} failed",
            processed, failed
        );
    }

    fn format_line(result: &SanitizationResult) -> String {
        let format = result
            .format
            .map(|f| f.as_str())
            .unwrap_or("unknown");

        match &result.error {
            None => {
                if result.removed.is_empty() {
                    format!("ok   {} [{}] 0 fields removed", result.path.display(), format)
                } else {
                    format!(
                        "ok   {} [{}] {} field(s) removed: {}",
                        result.path.display(),
                        format,
                        result.removed.len(),
                        result.removed.join(", ")
                    )
                }
            }
            Some(error) => format!("fail {} [{}] {}", result.path.display(), format, error),
        }
    }
}
