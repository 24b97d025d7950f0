//! Process-wide verbose log sink.
//!
//! Until `init_global_logger` is called every message is dropped, so library
//! code can log unconditionally.

use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Error as IoError, Write};
use std::path::Path;
use std::sync::Mutex;

static LOGGER: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

/// Direct log output to `path`, truncating any existing file.
pub fn init_global_logger(path: &Path) -> Result<(), IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    match LOGGER.lock() {
        Ok(mut guard) => *guard = Some(BufWriter::new(file)),
        Err(poisoned) => *poisoned.into_inner() = Some(BufWriter::new(file)),
    }
    Ok(())
}

fn write_line(prefix: &str, message: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(writer) = guard.as_mut() {
            if writeln!(writer, "{}{}", prefix, message).is_err() {
                eprintln!("Fallback (log write failed) {}{}", prefix, message);
            }
        }
    } else {
        eprintln!("Fallback (logger mutex error) {}{}", prefix, message);
    }
}

pub fn log_verbose_message(message: &str) {
    write_line("", message);
}

pub fn log_verbose_error(message: &str) {
    write_line("ERROR: ", message);
}

/// Flush buffered output; called before the process exits.
pub fn flush_global_logger() {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}
