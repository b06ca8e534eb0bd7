use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// File-backed logger. The terminal is the game screen, so nothing is ever
/// printed to stdout or stderr.
pub struct Logger {
    sink: Option<Mutex<File>>,
}

impl Logger {
    fn new(sink: Option<File>) -> Self {
        Self { sink: sink.map(Mutex::new) }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        if let Some(sink) = &self.sink {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            if let Ok(mut out) = sink.lock() {
                // Write failures are dropped
                let _ = writeln!(out, "{}", format_line(&timestamp, file, line, message));
            }
        }
    }
}

fn format_line(timestamp: &str, file: &str, line: u32, message: &str) -> String {
    let file_name = file.rsplit(&['/', '\\'][..]).next().unwrap_or(file);
    format!("[{}][{}:{}] {}", timestamp, file_name, line, message)
}

/// Opens `path` for appending, or keeps logging disabled when it is `None`.
pub fn init_logger(path: Option<&Path>) -> io::Result<()> {
    let sink = match path {
        Some(p) => Some(OpenOptions::new().create(true).append(true).open(p)?),
        None => None,
    };
    LOGGER.get_or_init(|| Logger::new(sink));
    Ok(())
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_strips_directories() {
        let line = format_line("2026-10-14 08:00:00", "src/state.rs", 12, "Game over");
        assert_eq!(line, "[2026-10-14 08:00:00][state.rs:12] Game over");

        let line = format_line("t", "C:\\snake\\src\\game.rs", 3, "x");
        assert_eq!(line, "[t][game.rs:3] x");
    }
}
